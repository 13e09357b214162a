//! Minimal deterministic behavior tree.
//!
//! Every tick finishes immediately with [`Status::Success`] or
//! [`Status::Failure`]; there is no running state and no clock. Trees are
//! built once and evaluated against a mutable blackboard `C`, which is where
//! leaves record what they decided.
//!
//! - [`Selector`]: first child that succeeds wins (priority list)
//! - [`Sequence`]: every child must succeed (guard then act)
//! - [`Condition`] / [`Act`]: closure leaves

mod composite;
mod leaf;

pub use composite::{Selector, Sequence};
pub use leaf::{Act, Condition};

/// Outcome of ticking a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

/// A node evaluated against blackboard `C`.
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Boxed node, the unit composites are built from.
pub type Node<C> = Box<dyn Behavior<C>>;

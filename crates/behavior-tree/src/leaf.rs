use crate::{Behavior, Status};

/// Read-only predicate leaf.
pub struct Condition<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Condition<C> {
    pub fn new(predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from((self.predicate)(ctx))
    }
}

/// Leaf that may write to the blackboard. Returning `false` fails the node.
pub struct Act<C> {
    action: Box<dyn Fn(&mut C) -> bool + Send + Sync>,
}

impl<C> Act<C> {
    pub fn new(action: impl Fn(&mut C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl<C> Behavior<C> for Act<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from((self.action)(ctx))
    }
}

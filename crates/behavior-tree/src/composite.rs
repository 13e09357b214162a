use crate::{Behavior, Node, Status};

/// Ticks children in order and stops at the first success.
///
/// An empty selector fails.
pub struct Selector<C> {
    children: Vec<Node<C>>,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: Node<C>) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let won = self.children.iter().any(|child| child.tick(ctx).is_success());
        Status::from(won)
    }
}

/// Ticks children in order and stops at the first failure.
///
/// An empty sequence succeeds.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let held = self.children.iter().all(|child| child.tick(ctx).is_success());
        Status::from(held)
    }
}

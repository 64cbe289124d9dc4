//! Dependency snapshots and subscription flags

use std::{cell::Cell, rc::Rc};

/// Last dependency value seen by a resource.
///
/// `observe` is the explicit change check: it reports a change on the first
/// call and whenever the new value differs from the stored one.
#[derive(Debug, Clone)]
pub struct DependencySnapshot<D> {
    current: Option<D>,
}

impl<D> Default for DependencySnapshot<D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<D: PartialEq> DependencySnapshot<D> {
    /// An empty snapshot; the first observation always counts as a change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `next`, returning true if it differs from the previous snapshot.
    pub fn observe(&mut self, next: D) -> bool {
        if self.current.as_ref() == Some(&next) {
            return false;
        }
        self.current = Some(next);
        true
    }

    /// The last recorded dependency value.
    pub fn current(&self) -> Option<&D> {
        self.current.as_ref()
    }
}

/// Shared "still mounted" flag.
///
/// Clones share the flag, so in-flight settlements can check it after the owner
/// is gone. Once cancelled it never becomes active again.
#[derive(Debug, Clone)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// A new, active subscription.
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    /// True until `cancel` is called on any clone.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Mark inactive. Returns true if this call did the cancelling.
    pub fn cancel(&self) -> bool {
        self.active.replace(false)
    }
}

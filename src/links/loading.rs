//! Per-operation loading flags
//!
//! Each call holds a [`LoadingGuard`] for its whole duration. The flag for an
//! operation stays up while at least one call of that kind is in flight, and
//! the guard's `Drop` clears it on every exit path.

use dashmap::DashMap;

use super::LinkOp;

#[derive(Default)]
pub struct LoadingTracker {
    inflight: DashMap<LinkOp, usize>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, op: LinkOp) -> LoadingGuard<'_> {
        *self.inflight.entry(op).or_insert(0) += 1;
        LoadingGuard { tracker: self, op }
    }

    pub fn is_loading(&self, op: LinkOp) -> bool {
        self.inflight.get(&op).is_some_and(|n| *n > 0)
    }

    pub fn any(&self) -> bool {
        self.inflight.iter().any(|entry| *entry.value() > 0)
    }

    fn finish(&self, op: LinkOp) {
        self.inflight.remove_if_mut(&op, |_, n| {
            *n = n.saturating_sub(1);
            *n == 0
        });
    }
}

#[must_use = "the loading flag is cleared as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    tracker: &'a LoadingTracker,
    op: LinkOp,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.finish(self.op);
    }
}

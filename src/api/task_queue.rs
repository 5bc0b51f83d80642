use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Deferred layout work, keyed so repeated requests coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Relayout,
    PackRows,
    RegenerateGridlines,
    RebuildActivationZones,
}

/// Debounced FIFO of pending tasks.
///
/// Scheduling a kind that is already pending moves it to the back instead of
/// queueing a second copy.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    pending: IndexSet<TaskKind>,
}

impl TaskQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TaskKind) {
        let replaced = self.pending.shift_remove(&kind);
        self.pending.insert(kind);
        trace!(?kind, replaced, pending = self.pending.len(), "schedule task");
    }

    pub fn pop(&mut self) -> Option<TaskKind> {
        self.pending.shift_remove_index(0)
    }

    #[must_use]
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.pending.contains(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskKind> + '_ {
        self.pending.iter().copied()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

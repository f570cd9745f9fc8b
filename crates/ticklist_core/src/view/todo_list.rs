//! List presentation state.
//!
//! # Responsibility
//! - Compute the shown subset and completion counters from snapshots.
//! - Drive the single consumer loop over the live-query feed.
//!
//! # Invariants
//! - Counters are tallied over the full snapshot, never the shown subset.
//! - `clear_completed` and `change_status_all` judge the full snapshot
//!   regardless of the active filter.

use crate::id::IdGenerator;
use crate::model::todo::Todo;
use crate::repo::todo_repo::{RepoResult, TodoFeed, TodoRepository};
use crate::service::todo_service::TodoService;
use std::sync::mpsc::TryRecvError;

/// Completion counters over one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoCounts {
    pub complete: usize,
    pub incomplete: usize,
}

impl TodoCounts {
    /// Counts complete and incomplete entries in a single pass.
    pub fn tally(items: &[Todo]) -> Self {
        let mut counts = Self::default();
        for item in items {
            if item.is_complete() {
                counts.complete += 1;
            } else {
                counts.incomplete += 1;
            }
        }
        counts
    }

    /// Number of entries the counters were tallied over.
    pub fn total(&self) -> usize {
        self.complete + self.incomplete
    }
}

/// Derived view state for one snapshot and one filter setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoListProjection {
    /// Entries the list renders: everything, or the status-matching
    /// subset.
    pub shown: Vec<Todo>,
    /// Counters over the full snapshot.
    pub counts: TodoCounts,
}

impl TodoListProjection {
    /// Recomputes the projection for an immutable snapshot.
    pub fn compute(items: &[Todo], status_filter: Option<bool>) -> Self {
        let shown = match status_filter {
            None => items.to_vec(),
            Some(status) => items
                .iter()
                .filter(|item| item.status == status)
                .cloned()
                .collect(),
        };

        Self {
            shown,
            counts: TodoCounts::tally(items),
        }
    }
}

/// Stateful list consumer: one live-query subscription, one projection.
///
/// Construction subscribes to the collection and applies the snapshot the
/// subscription delivers immediately. Afterwards the owner decides when
/// to pump the feed via [`TodoListView::poll_updates`].
pub struct TodoListView<R: TodoRepository, G: IdGenerator> {
    service: TodoService<R, G>,
    feed: TodoFeed,
    items: Vec<Todo>,
    status_filter: Option<bool>,
    projection: TodoListProjection,
}

impl<R: TodoRepository, G: IdGenerator> TodoListView<R, G> {
    pub fn new(service: TodoService<R, G>) -> RepoResult<Self> {
        let feed = service.watch_todos()?;
        let mut view = Self {
            service,
            feed,
            items: Vec::new(),
            status_filter: None,
            projection: TodoListProjection::default(),
        };
        view.poll_updates();
        Ok(view)
    }

    /// Drains the feed and applies the newest pending snapshot.
    ///
    /// Intermediate snapshots are superseded without recomputing. Returns
    /// whether a snapshot was applied. A disconnected feed leaves the
    /// last applied state in place.
    pub fn poll_updates(&mut self) -> bool {
        let mut newest = None;
        loop {
            match self.feed.try_recv() {
                Ok(snapshot) => newest = Some(snapshot),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        match newest {
            Some(snapshot) => {
                self.items = snapshot;
                self.recompute();
                true
            }
            None => false,
        }
    }

    /// Switches the shown subset: `None` shows everything, `Some(v)` the
    /// entries whose status equals `v`. Recomputes from the held
    /// snapshot; the store is not consulted.
    pub fn set_status_filter(&mut self, status_filter: Option<bool>) {
        self.status_filter = status_filter;
        self.recompute();
    }

    pub fn status_filter(&self) -> Option<bool> {
        self.status_filter
    }

    /// Latest full snapshot, independent of the filter.
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Entries the list currently renders.
    pub fn shown(&self) -> &[Todo] {
        &self.projection.shown
    }

    pub fn counts(&self) -> TodoCounts {
        self.projection.counts
    }

    /// Adds a new incomplete entry with the given name.
    pub fn add(&self, name: &str) -> RepoResult<()> {
        self.service.add_todo(name)?;
        Ok(())
    }

    /// Rewrites one entry with the new completion status.
    pub fn set_status(&self, todo: &Todo, status: bool) -> RepoResult<()> {
        self.service.set_status(todo, status)
    }

    /// Removes one entry.
    pub fn remove(&self, todo: &Todo) -> RepoResult<()> {
        self.service.remove_todo(todo)
    }

    /// Removes every completed entry in the snapshot.
    pub fn clear_completed(&self) -> RepoResult<()> {
        let completed: Vec<Todo> = self
            .items
            .iter()
            .filter(|item| item.is_complete())
            .cloned()
            .collect();
        self.service.remove_todos(&completed)
    }

    /// Bulk toggle with the majority policy: if any entry is still open,
    /// every entry ends complete; otherwise every entry ends open. Only
    /// records whose status actually changes are rewritten.
    pub fn change_status_all(&self) -> RepoResult<()> {
        let target = self.projection.counts.incomplete > 0;
        let differing: Vec<Todo> = self
            .items
            .iter()
            .filter(|item| item.status != target)
            .cloned()
            .collect();
        self.service.set_status_many(&differing, target)
    }

    fn recompute(&mut self) {
        self.projection = TodoListProjection::compute(&self.items, self.status_filter);
    }
}

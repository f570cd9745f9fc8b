//! To-do domain model.
//!
//! # Responsibility
//! - Define the single record shape shared by storage, service and view.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - A freshly created record starts incomplete.

use serde::{Deserialize, Serialize};

/// Stable identifier for a to-do record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// The value is minted by an [`crate::id::IdGenerator`] before the record
/// is first written.
pub type TodoId = String;

/// One entry of the to-do collection.
///
/// The struct doubles as the document wire shape: field names `id`,
/// `name` and `status` are what the backing store persists and what
/// snapshots deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable document key.
    pub id: TodoId,
    /// Free-text label. Not validated; empty names are legal.
    pub name: String,
    /// Completion flag. `false` means the entry is still open.
    pub status: bool,
}

impl Todo {
    /// Creates a record for a caller-provided id.
    ///
    /// # Invariants
    /// - `status` starts as `false`.
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: false,
        }
    }

    /// Returns whether this entry has been completed.
    pub fn is_complete(&self) -> bool {
        self.status
    }
}

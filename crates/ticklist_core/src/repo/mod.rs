//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the document-store contract the access layer is written
//!   against: whole-record set, delete by id, one-shot and live queries.
//! - Isolate SQLite query details from service/view orchestration.
//!
//! # Invariants
//! - Mutations are last-write-wins; there is no read-modify-write guard.
//! - Every successful mutation re-delivers the full collection to all
//!   live watchers.

pub mod todo_repo;

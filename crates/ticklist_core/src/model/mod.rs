//! Domain model for the to-do collection.
//!
//! # Responsibility
//! - Define the canonical record persisted to and streamed from the store.
//! - Keep the in-memory shape identical to the document wire shape.
//!
//! # Invariants
//! - Every record is identified by a stable `TodoId`.
//! - Deletion is destruction: there is no tombstone state.

pub mod todo;

//! Presentation layer over the live collection feed.
//!
//! # Responsibility
//! - Reduce snapshots to derived view state through a pure projection.
//! - Forward user intents to the access layer untouched.
//!
//! # Invariants
//! - View state changes only when a snapshot is applied or the filter is
//!   switched; a write alone never updates it.

pub mod todo_list;

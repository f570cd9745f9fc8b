//! Identifier minting for new to-do records.
//!
//! # Responsibility
//! - Define the id-generation capability the access layer depends on.
//! - Provide the production random-id implementation.
//!
//! # Invariants
//! - Generated ids are non-empty.
//! - The production generator never returns the same id twice in practice.

use crate::model::todo::TodoId;
use uuid::Uuid;

/// Capability for minting document ids ahead of the first write.
///
/// The store itself never assigns ids; callers mint one, then write the
/// full record under it. Keeping this behind a trait lets tests and the
/// demo binary supply deterministic ids.
pub trait IdGenerator {
    fn create_id(&self) -> TodoId;
}

/// Production generator backed by random UUIDv4 values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn create_id(&self) -> TodoId {
        Uuid::new_v4().to_string()
    }
}

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the view invokes.
//! - Keep presentation code decoupled from storage details.

pub mod todo_service;

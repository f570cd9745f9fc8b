//! Core logic for Ticklist, a single-collection to-do list client.
//! This crate is the single source of truth for list behavior.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use id::{IdGenerator, UuidIdGenerator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{Todo, TodoId};
pub use repo::todo_repo::{
    RepoError, RepoResult, SqliteTodoRepository, TodoFeed, TodoListQuery, TodoRepository,
};
pub use service::todo_service::TodoService;
pub use view::todo_list::{TodoCounts, TodoListProjection, TodoListView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! To-do use-case service.
//!
//! # Responsibility
//! - Provide the operations user intents map onto: add, rewrite status,
//!   remove, and their bulk forms, plus the live and one-shot queries.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - No input validation: records are persisted exactly as assembled.
//! - Repository errors pass through untranslated.
//! - Mutations never read store state back; updated state reaches callers
//!   only through the live feed.

use crate::id::IdGenerator;
use crate::model::todo::Todo;
use crate::repo::todo_repo::{RepoResult, TodoFeed, TodoListQuery, TodoRepository};

/// Use-case service wrapper for the to-do collection.
///
/// The id generator is injected so callers control identity minting; see
/// [`crate::id::UuidIdGenerator`] for the production choice.
pub struct TodoService<R: TodoRepository, G: IdGenerator> {
    repo: R,
    ids: G,
}

impl<R: TodoRepository, G: IdGenerator> TodoService<R, G> {
    /// Creates a service over the provided repository and id generator.
    pub fn new(repo: R, ids: G) -> Self {
        Self { repo, ids }
    }

    /// Subscribes to the live query over the whole collection.
    pub fn watch_todos(&self) -> RepoResult<TodoFeed> {
        self.repo.watch_todos()
    }

    /// Lists to-dos once, optionally filtered by status.
    pub fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos(query)
    }

    /// Mints an id and persists a new incomplete entry.
    ///
    /// # Contract
    /// - The written record is `{id, name, status: false}`.
    /// - Returns the record as written, id included.
    pub fn add_todo(&self, name: impl Into<String>) -> RepoResult<Todo> {
        let todo = Todo::new(self.ids.create_id(), name);
        self.repo.set_todo(&todo)?;
        Ok(todo)
    }

    /// Rewrites the full record with the new completion status.
    pub fn set_status(&self, todo: &Todo, status: bool) -> RepoResult<()> {
        let mut next = todo.clone();
        next.status = status;
        self.repo.set_todo(&next)
    }

    /// Removes one entry. Only the id is consulted.
    pub fn remove_todo(&self, todo: &Todo) -> RepoResult<()> {
        self.repo.delete_todo(&todo.id)
    }

    /// Removes each entry in order, stopping at the first failure.
    pub fn remove_todos(&self, todos: &[Todo]) -> RepoResult<()> {
        for todo in todos {
            self.repo.delete_todo(&todo.id)?;
        }
        Ok(())
    }

    /// Rewrites each entry with the new status, stopping at the first
    /// failure.
    pub fn set_status_many(&self, todos: &[Todo], status: bool) -> RepoResult<()> {
        for todo in todos {
            self.set_status(todo, status)?;
        }
        Ok(())
    }
}

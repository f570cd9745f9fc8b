//! To-do repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the document-store surface of the `todos` collection.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set_todo` replaces the whole record; `delete_todo` is idempotent.
//! - List results and snapshots are ordered by `id` ascending, so equal
//!   store states produce equal snapshots.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::todo::Todo;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    name,
    status
FROM todos";

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot stream handed out by [`TodoRepository::watch_todos`]. Each
/// message is the full current collection.
pub type TodoFeed = Receiver<Vec<Todo>>;

/// Generic repository error for to-do persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    LockPoisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted to-do data: {message}"),
            Self::LockPoisoned => write!(f, "connection lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing to-dos.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoListQuery {
    /// `None` lists the whole collection; `Some(v)` exactly the subset
    /// whose status equals `v`.
    pub status: Option<bool>,
}

/// Repository interface for to-do document operations.
///
/// `watch_todos` is the live query: the returned feed carries the current
/// result set immediately and again after every mutation of the
/// collection.
pub trait TodoRepository {
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
    fn watch_todos(&self) -> RepoResult<TodoFeed>;
    fn set_todo(&self, todo: &Todo) -> RepoResult<()>;
    fn delete_todo(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed to-do repository with live-query support.
///
/// Owns its connection so that snapshot emission and mutation share one
/// serialization point. Watchers with a dropped receiver are discarded on
/// the next emission.
pub struct SqliteTodoRepository {
    conn: Mutex<Connection>,
    watchers: Mutex<Vec<Sender<Vec<Todo>>>>,
}

impl SqliteTodoRepository {
    /// Takes ownership of a connection prepared by
    /// [`crate::db::open_db`] or [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            watchers: Mutex::new(Vec::new()),
        }
    }

    fn conn(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::LockPoisoned)
    }

    fn watchers(&self) -> RepoResult<MutexGuard<'_, Vec<Sender<Vec<Todo>>>>> {
        self.watchers.lock().map_err(|_| RepoError::LockPoisoned)
    }

    /// Re-reads the collection and delivers it to every live watcher.
    ///
    /// Must not be called while the connection lock is held.
    fn emit_snapshot(&self) -> RepoResult<()> {
        let snapshot = self.list_todos(&TodoListQuery::default())?;
        let mut watchers = self.watchers()?;
        // A failed send means the watcher's receiver is gone.
        watchers.retain(|watcher| watcher.send(snapshot.clone()).is_ok());
        Ok(())
    }
}

impl TodoRepository for SqliteTodoRepository {
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let conn = self.conn()?;

        let mut sql = String::from(TODO_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" WHERE status = ?");
            bind_values.push(Value::Integer(bool_to_int(status)));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn watch_todos(&self) -> RepoResult<TodoFeed> {
        let snapshot = self.list_todos(&TodoListQuery::default())?;
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(snapshot);
        self.watchers()?.push(tx);
        Ok(rx)
    }

    fn set_todo(&self, todo: &Todo) -> RepoResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO todos (id, name, status) VALUES (?1, ?2, ?3);",
            params![
                todo.id.as_str(),
                todo.name.as_str(),
                bool_to_int(todo.status)
            ],
        )?;
        drop(conn);

        self.emit_snapshot()
    }

    fn delete_todo(&self, id: &str) -> RepoResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM todos WHERE id = ?1;", [id])?;
        drop(conn);

        self.emit_snapshot()
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let status = match row.get::<_, i64>("status")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid status value `{other}` in todos.status"
            )));
        }
    };

    Ok(Todo {
        id: row.get("id")?,
        name: row.get("name")?,
        status,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

//! CLI demo entry point.
//!
//! # Responsibility
//! - Drive the full pipeline end to end: store, access layer, live feed,
//!   list projection.
//! - Keep output deterministic for quick local sanity checks.

use std::cell::Cell;
use std::error::Error;

use ticklist_core::db::open_db_in_memory;
use ticklist_core::{
    default_log_level, init_logging, IdGenerator, SqliteTodoRepository, TodoId, TodoListView,
    TodoRepository, TodoService,
};

/// Sequential id generator.
// Why: random ids would reorder the list between runs; sequential ids keep
// the transcript byte-identical.
struct SeqIds(Cell<u32>);

impl IdGenerator for SeqIds {
    fn create_id(&self) -> TodoId {
        let next = self.0.get() + 1;
        self.0.set(next);
        format!("todo-{next:04}")
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("ticklist-logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    println!("ticklist_core version={}", ticklist_core::core_version());

    let conn = open_db_in_memory()?;
    let service = TodoService::new(SqliteTodoRepository::new(conn), SeqIds(Cell::new(0)));
    let mut view = TodoListView::new(service)?;

    view.add("water the plants")?;
    view.add("file the report")?;
    view.add("book the dentist")?;
    view.poll_updates();
    print_state("after add", &view);

    let first = view.shown()[0].clone();
    view.set_status(&first, true)?;
    view.poll_updates();
    print_state("after completing one", &view);

    view.set_status_filter(Some(false));
    print_state("open entries only", &view);

    view.set_status_filter(None);
    view.change_status_all()?;
    view.poll_updates();
    print_state("after change-status-all", &view);

    view.change_status_all()?;
    view.poll_updates();
    print_state("after change-status-all again", &view);

    let first = view.shown()[0].clone();
    view.set_status(&first, true)?;
    view.poll_updates();
    view.clear_completed()?;
    view.poll_updates();
    print_state("after clear-completed", &view);

    Ok(())
}

fn print_state<R: TodoRepository, G: IdGenerator>(label: &str, view: &TodoListView<R, G>) {
    let counts = view.counts();
    println!(
        "-- {label}: complete={} incomplete={}",
        counts.complete, counts.incomplete
    );
    for todo in view.shown() {
        let mark = if todo.status { "x" } else { " " };
        println!("   [{mark}] {} ({})", todo.name, todo.id);
    }
}

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use ticklist_core::db::open_db_in_memory;
use ticklist_core::{
    IdGenerator, SqliteTodoRepository, Todo, TodoId, TodoListView, TodoRepository, TodoService,
};

struct SeqIds(Cell<u32>);

impl SeqIds {
    fn new() -> Self {
        Self(Cell::new(0))
    }
}

impl IdGenerator for SeqIds {
    fn create_id(&self) -> TodoId {
        let next = self.0.get() + 1;
        self.0.set(next);
        format!("id-{next:03}")
    }
}

struct FixedIds(RefCell<VecDeque<TodoId>>);

impl FixedIds {
    fn new(ids: &[&str]) -> Self {
        Self(RefCell::new(ids.iter().map(|id| id.to_string()).collect()))
    }
}

impl IdGenerator for FixedIds {
    fn create_id(&self) -> TodoId {
        self.0
            .borrow_mut()
            .pop_front()
            .expect("ran out of fixed ids")
    }
}

fn view_with<G: IdGenerator>(ids: G) -> TodoListView<SqliteTodoRepository, G> {
    let repo = SqliteTodoRepository::new(open_db_in_memory().unwrap());
    TodoListView::new(TodoService::new(repo, ids)).unwrap()
}

#[test]
fn construction_applies_the_initial_snapshot() {
    let repo = SqliteTodoRepository::new(open_db_in_memory().unwrap());
    repo.set_todo(&Todo::new("id-001".to_string(), "seeded"))
        .unwrap();

    let view = TodoListView::new(TodoService::new(repo, SeqIds::new())).unwrap();

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.shown()[0].name, "seeded");
}

#[test]
fn add_creates_exactly_one_incomplete_entry() {
    let mut view = view_with(SeqIds::new());

    view.add("buy milk").unwrap();
    assert!(view.poll_updates());

    assert_eq!(view.items().len(), 1);
    let added = &view.items()[0];
    assert_eq!(added.name, "buy milk");
    assert!(!added.status);
    assert!(!added.id.is_empty());
}

#[test]
fn counts_always_partition_the_snapshot() {
    let mut view = view_with(SeqIds::new());
    for name in ["a", "b", "c", "d"] {
        view.add(name).unwrap();
    }
    view.poll_updates();

    let second = view.items()[1].clone();
    view.set_status(&second, true).unwrap();
    view.poll_updates();

    let counts = view.counts();
    assert_eq!(counts.complete, 1);
    assert_eq!(counts.incomplete, 3);
    assert_eq!(counts.total(), view.items().len());
}

#[test]
fn filter_shows_exact_subsets_and_keeps_full_counts() {
    let mut view = view_with(SeqIds::new());
    view.add("open one").unwrap();
    view.add("done one").unwrap();
    view.add("open two").unwrap();
    view.poll_updates();
    let done = view.items()[1].clone();
    view.set_status(&done, true).unwrap();
    view.poll_updates();

    view.set_status_filter(Some(true));
    assert_eq!(view.shown().len(), 1);
    assert!(view.shown().iter().all(|entry| entry.status));

    view.set_status_filter(Some(false));
    assert_eq!(view.shown().len(), 2);
    assert!(view.shown().iter().all(|entry| !entry.status));

    assert_eq!(view.counts().complete, 1);
    assert_eq!(view.counts().incomplete, 2);

    view.set_status_filter(None);
    assert_eq!(view.shown().len(), 3);
}

#[test]
fn clear_completed_removes_exactly_the_completed_entries() {
    let mut view = view_with(SeqIds::new());
    view.add("keep").unwrap();
    view.add("drop one").unwrap();
    view.add("drop two").unwrap();
    view.poll_updates();
    let drop_one = view.items()[1].clone();
    let drop_two = view.items()[2].clone();
    view.set_status(&drop_one, true).unwrap();
    view.set_status(&drop_two, true).unwrap();
    view.poll_updates();

    view.clear_completed().unwrap();
    view.poll_updates();

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "keep");
    assert!(!view.items()[0].status);
}

#[test]
fn clear_completed_judges_the_full_snapshot_even_while_filtered() {
    let mut view = view_with(SeqIds::new());
    view.add("open").unwrap();
    view.add("done").unwrap();
    view.poll_updates();
    let done = view.items()[1].clone();
    view.set_status(&done, true).unwrap();
    view.poll_updates();

    view.set_status_filter(Some(false));
    view.clear_completed().unwrap();
    view.poll_updates();

    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "open");
}

#[test]
fn change_status_all_completes_everything_when_any_entry_is_open() {
    let mut view = view_with(SeqIds::new());
    view.add("one").unwrap();
    view.add("two").unwrap();
    view.add("three").unwrap();
    view.poll_updates();
    let one = view.items()[0].clone();
    view.set_status(&one, true).unwrap();
    view.poll_updates();

    view.change_status_all().unwrap();
    view.poll_updates();

    assert!(view.items().iter().all(|entry| entry.status));
    assert_eq!(view.counts().incomplete, 0);
}

#[test]
fn change_status_all_reopens_a_fully_completed_set() {
    let mut view = view_with(SeqIds::new());
    view.add("one").unwrap();
    view.add("two").unwrap();
    view.poll_updates();

    view.change_status_all().unwrap();
    view.poll_updates();
    assert!(view.items().iter().all(|entry| entry.status));

    view.change_status_all().unwrap();
    view.poll_updates();
    assert!(view.items().iter().all(|entry| !entry.status));
}

#[test]
fn change_status_all_rewrites_only_differing_records() {
    let repo = SqliteTodoRepository::new(open_db_in_memory().unwrap());
    let probe = repo.watch_todos().unwrap();
    let mut view = TodoListView::new(TodoService::new(repo, SeqIds::new())).unwrap();

    view.add("already done").unwrap();
    view.add("still open").unwrap();
    view.poll_updates();
    let done = view.items()[0].clone();
    view.set_status(&done, true).unwrap();
    view.poll_updates();
    assert!(probe.try_iter().count() > 0);

    view.change_status_all().unwrap();

    // One differing record, so exactly one write and one re-delivery.
    assert_eq!(probe.try_iter().count(), 1);
}

#[test]
fn change_status_all_on_an_empty_collection_is_a_no_op() {
    let mut view = view_with(SeqIds::new());

    view.change_status_all().unwrap();

    assert!(!view.poll_updates());
    assert!(view.items().is_empty());
}

#[test]
fn worked_example_counts_and_clear() {
    let mut view = view_with(FixedIds::new(&["a", "b"]));
    view.add("x").unwrap();
    view.add("y").unwrap();
    view.poll_updates();
    let b = view.items()[1].clone();
    view.set_status(&b, true).unwrap();
    view.poll_updates();

    assert_eq!(view.counts().complete, 1);
    assert_eq!(view.counts().incomplete, 1);

    view.clear_completed().unwrap();
    view.poll_updates();

    let remaining = view.items();
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining[0],
        Todo {
            id: "a".to_string(),
            name: "x".to_string(),
            status: false,
        }
    );
}

#[test]
fn poll_without_pending_snapshots_reports_no_change() {
    let mut view = view_with(SeqIds::new());
    assert!(!view.poll_updates());

    view.add("x").unwrap();
    assert!(view.poll_updates());
    assert!(!view.poll_updates());
}

#[test]
fn intermediate_snapshots_are_superseded_by_one_poll() {
    let mut view = view_with(SeqIds::new());
    view.add("one").unwrap();
    view.add("two").unwrap();
    view.add("three").unwrap();

    assert!(view.poll_updates());
    assert_eq!(view.items().len(), 3);
    assert!(!view.poll_updates());
}

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use undo_manager::prelude::*;

type Items = Rc<RefCell<Vec<&'static str>>>;

/// Performs `item` on the host and records the command that reverses it.
fn draw(history: &HistoryManager, items: &Items, item: &'static str, group: Option<&str>) {
    items.borrow_mut().push(item);

    let (undo, redo) = (items.clone(), items.clone());
    let mut builder = FnCommand::builder()
        .undo(move || {
            undo.borrow_mut().pop();
        })
        .redo(move || redo.borrow_mut().push(item))
        .description(format!("draw {item}"));
    if let Some(group) = group {
        builder = builder.group(group);
    }

    history.add(builder.build().unwrap());
}

fn descriptions(history: &HistoryManager) -> Vec<String> {
    history
        .commands(None)
        .iter()
        .map(|command| command.description().into_owned())
        .collect()
}

#[test]
fn single_add() {
    let history = HistoryManager::new();
    let items = Items::default();

    draw(&history, &items, "A", None);

    assert_eq!(history.index(), Some(0));
    assert!(history.has_undo());
    assert!(!history.has_redo());
}

#[test]
fn undo_everything() {
    let history = HistoryManager::new();
    let items = Items::default();

    draw(&history, &items, "A", None);
    draw(&history, &items, "B", None);
    history.undo();
    history.undo();

    assert_eq!(history.index(), None);
    assert!(!history.has_undo());
    assert!(history.has_redo());
    assert_eq!(history.len(), 2);
    assert!(items.borrow().is_empty());
}

#[test]
fn group_undoes_as_one_step() {
    let history = HistoryManager::new();
    let items = Items::default();

    draw(&history, &items, "A", None);
    for item in ["B", "C", "D"] {
        draw(&history, &items, item, Some("G"));
    }
    assert_eq!(history.index(), Some(3));

    history.undo();
    assert_eq!(history.index(), Some(0));
    assert_eq!(history.commands(Some("G")).len(), 3);
    assert_eq!(*items.borrow(), vec!["A"]);

    history.undo();
    assert_eq!(history.index(), None);
}

#[test]
fn limit_of_one_keeps_latest() {
    let history = HistoryManager::new();
    let items = Items::default();
    history.set_limit(1);

    for item in ["A", "B", "C"] {
        draw(&history, &items, item, None);
    }

    assert_eq!(descriptions(&history), vec!["draw C"]);

    history.undo().undo().undo();
    assert!(!history.has_undo());
    assert!(history.has_redo());
    assert_eq!(history.len(), 1);
}

#[test]
fn unbounded_limit() {
    let history = HistoryManager::new();
    let items = Items::default();
    history.set_limit(0);

    for item in ["A", "B", "C"] {
        draw(&history, &items, item, None);
    }
    history.undo();
    history.undo();

    assert!(history.has_undo());
    assert!(history.has_redo());
    assert_eq!(history.len(), 3);
}

#[test]
fn limit_keeps_most_recent() {
    for (limit, extra) in [(1, 0), (3, 2), (5, 7)] {
        let history = HistoryManager::new();
        let items = Items::default();
        history.set_limit(limit);

        let all = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];
        for &item in &all[..limit + extra] {
            draw(&history, &items, item, None);
        }

        let expected: Vec<_> = all[extra..limit + extra]
            .iter()
            .map(|item| format!("draw {item}"))
            .collect();
        assert_eq!(descriptions(&history), expected);
    }
}

#[test]
fn add_after_undo_prunes_redo_branch() {
    let history = HistoryManager::new();
    let items = Items::default();

    for item in ["A", "B", "C", "D"] {
        draw(&history, &items, item, None);
    }
    history.undo().undo().undo();

    draw(&history, &items, "E", None);

    assert_eq!(history.len(), 2);
    assert!(!history.has_redo());
    assert_eq!(descriptions(&history), vec!["draw A", "draw E"]);
}

#[test]
fn undo_redo_round_trip() {
    let history = HistoryManager::new();
    let items = Items::default();

    draw(&history, &items, "A", None);
    draw(&history, &items, "B", Some("pair"));
    draw(&history, &items, "C", Some("pair"));
    let before = items.borrow().clone();

    history.undo().redo();
    assert_eq!(*items.borrow(), before);

    history.undo().undo().redo().redo();
    assert_eq!(*items.borrow(), before);
}

#[test]
fn callback_fires_once_per_operation() {
    let history = HistoryManager::new();
    let items = Items::default();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    history.set_callback(Some(Rc::new(move || counter.set(counter.get() + 1))));

    draw(&history, &items, "A", Some("G"));
    draw(&history, &items, "B", Some("G"));
    assert_eq!(calls.get(), 2);

    history.undo();
    history.redo();
    assert_eq!(calls.get(), 4);

    history.clear();
    history.clear();
    assert_eq!(calls.get(), 5);
}

#[test]
fn independent_histories() {
    let (first, second) = (HistoryManager::new(), HistoryManager::new());
    let (left, right) = (Items::default(), Items::default());

    draw(&first, &left, "A", None);
    draw(&second, &right, "B", None);
    first.undo();

    assert!(left.borrow().is_empty());
    assert_eq!(*right.borrow(), vec!["B"]);
    assert!(second.has_undo());
}

#[test]
fn invalid_input_is_reported() {
    assert_eq!(
        FnCommand::builder().redo(|| {}).build().unwrap_err(),
        HistoryError::InvalidCommand("missing undo operation")
    );
    assert_eq!(Limit::try_from(-2_i64), Err(HistoryError::InvalidLimit(-2)));

    let history = HistoryManager::<FnCommand>::new();
    history.set_history_limit("4".parse().unwrap());
    assert_eq!(history.limit().get(), 4);
}

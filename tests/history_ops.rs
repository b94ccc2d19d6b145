use std::sync::Arc;

use egui::Color32;
use inkboard::history::History;
use inkboard::snapshot::{Snapshot, SnapshotRef};
use inkboard::tool::BACKGROUND;

// Helper to make a tiny snapshot; the color only serves to tell them apart
fn snapshot(color: Color32) -> SnapshotRef {
    Arc::new(Snapshot::encode([2, 2], &vec![color; 4]).unwrap())
}

#[test]
fn n_strokes_give_n_plus_one_entries() {
    let mut history = History::new();
    history.push(snapshot(BACKGROUND)); // blank seed at mount

    let n = 5;
    for _ in 0..n {
        history.push(snapshot(Color32::RED));
    }

    assert_eq!(history.len(), n + 1);
    assert_eq!(history.cursor(), n as isize);
}

#[test]
fn undo_then_redo_is_a_net_noop() {
    let mut history = History::new();
    let blank = snapshot(BACKGROUND);
    let a = snapshot(Color32::RED);
    let b = snapshot(Color32::GREEN);
    history.push(blank);
    history.push(a.clone());
    history.push(b.clone());

    // cursor at 2; undo shows the middle entry, redo returns to the last
    let shown = history.undo().expect("undo from the last entry");
    assert_eq!(shown.id(), a.id());
    assert_eq!(history.cursor(), 1);

    let shown = history.redo().expect("redo after an undo");
    assert_eq!(shown.id(), b.id());
    assert_eq!(history.cursor(), 2);
}

#[test]
fn undo_at_the_first_entry_is_a_noop() {
    let mut history = History::new();
    history.push(snapshot(BACKGROUND));

    assert!(history.undo().is_none());
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
}

#[test]
fn undo_on_empty_history_is_a_noop() {
    let mut history = History::new();
    assert!(history.undo().is_none());
    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), -1);
}

#[test]
fn redo_at_the_last_entry_is_a_noop() {
    let mut history = History::new();
    history.push(snapshot(BACKGROUND));
    history.push(snapshot(Color32::RED));

    assert!(history.redo().is_none());
    assert_eq!(history.cursor(), 1);
    assert!(!history.can_redo());
}

#[test]
fn push_after_undo_discards_the_redo_branch() {
    let mut history = History::new();
    history.push(snapshot(BACKGROUND));
    history.push(snapshot(Color32::RED));
    history.push(snapshot(Color32::GREEN));
    history.push(snapshot(Color32::BLUE));

    // back to cursor 1, then a new snapshot replaces indices 2..
    history.undo();
    history.undo();
    assert_eq!(history.cursor(), 1);

    let replacement = snapshot(Color32::YELLOW);
    history.push(replacement.clone());

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.current().unwrap().id(), replacement.id());
    assert!(!history.can_redo());
}

#[test]
fn reset_empties_the_history() {
    let mut history = History::new();
    history.push(snapshot(BACKGROUND));
    history.push(snapshot(Color32::RED));

    history.reset();

    assert_eq!(history.len(), 0);
    assert_eq!(history.cursor(), -1);
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(history.current().is_none());

    // the first stroke after a reset becomes index 0
    history.push(snapshot(Color32::GREEN));
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 0);
    assert!(!history.can_undo());
}

#[test]
fn draw_undo_draw_scenario() {
    // draw A, draw B, undo, draw C => [blank, A, C]
    let mut history = History::new();
    let blank = snapshot(BACKGROUND);
    let a = snapshot(Color32::RED);
    let b = snapshot(Color32::GREEN);
    let c = snapshot(Color32::BLUE);

    history.push(blank.clone());
    history.push(a.clone());
    history.push(b);
    assert_eq!(history.cursor(), 2);

    let shown = history.undo().expect("undo to A");
    assert_eq!(shown.id(), a.id());
    assert_eq!(history.cursor(), 1);

    history.push(c.clone());

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.current().unwrap().id(), c.id());

    // the surviving sequence is blank, A, C
    let mut ids = Vec::new();
    while let Some(shown) = history.undo() {
        ids.push(shown.id());
    }
    assert_eq!(ids, vec![a.id(), blank.id()]);
}

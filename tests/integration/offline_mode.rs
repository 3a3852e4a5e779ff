//! Integration tests for offline demo mode.
//!
//! With no API configured the app runs entirely against the seeded
//! in-memory list: all CRUD and filtering works locally and no command
//! is ever emitted for dispatch.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck::app::{App, DashboardFocus, Modal, Screen};
use taskdeck_core::filter::StatusFilter;
use taskdeck_core::task::TaskStatus;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Feed a string one key at a time, asserting nothing gets dispatched.
fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        assert!(app.handle_key_event(key(KeyCode::Char(c))).is_none());
    }
}

// ---------------------------------------------------------------------------
// Full offline session
// ---------------------------------------------------------------------------

#[test]
fn demo_starts_on_dashboard_with_seed_data() {
    let app = App::offline_demo();
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(!app.online);
    assert!(!app.tasks.is_empty());
    assert!(app.status_message.is_some());
}

#[test]
fn add_edit_delete_cycle_stays_local() {
    let mut app = App::offline_demo();
    let seed_count = app.tasks.len();

    // Add.
    assert!(app.handle_key_event(key(KeyCode::Char('a'))).is_none());
    assert_eq!(app.modal, Modal::TaskForm);
    type_str(&mut app, "Water the plants");
    assert!(app.handle_key_event(key(KeyCode::Tab)).is_none());
    assert!(app.handle_key_event(key(KeyCode::Tab)).is_none());
    type_str(&mut app, "2023-11-05");
    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert_eq!(app.tasks.len(), seed_count + 1);
    assert_eq!(
        app.tasks.last().unwrap().due_date,
        "2023-11-05T23:59:59.999Z"
    );

    // Edit the first task: toggle its status.
    assert!(app.handle_key_event(key(KeyCode::Char('e'))).is_none());
    app.task_form.focus = 3;
    assert!(app.handle_key_event(key(KeyCode::Char(' '))).is_none());
    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert_eq!(app.tasks[0].status, TaskStatus::Completed);

    // Delete.
    assert!(app.handle_key_event(key(KeyCode::Char('d'))).is_none());
    assert_eq!(app.tasks.len(), seed_count);
}

#[test]
fn search_then_filter_narrows_and_recovers() {
    let mut app = App::offline_demo();
    let all = app.visible_tasks().len();

    assert!(app.handle_key_event(key(KeyCode::Char('/'))).is_none());
    assert_eq!(app.focus, DashboardFocus::Search);
    type_str(&mut app, "task");
    assert_eq!(app.visible_tasks().len(), all);

    type_str(&mut app, " 1");
    assert_eq!(app.visible_tasks().len(), 1);

    // Leave search, cycle the status filter on top of the search term.
    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert_eq!(app.focus, DashboardFocus::List);
    assert!(app.handle_key_event(key(KeyCode::Char('f'))).is_none());
    assert_eq!(app.status_filter, StatusFilter::Pending);
    assert_eq!(app.visible_tasks().len(), 1);
    assert!(app.handle_key_event(key(KeyCode::Char('f'))).is_none());
    assert_eq!(app.status_filter, StatusFilter::Completed);
    assert!(app.visible_tasks().is_empty());

    // Clearing the term restores the completed subset.
    assert!(app.handle_key_event(key(KeyCode::Char('/'))).is_none());
    for _ in 0..6 {
        assert!(app.handle_key_event(key(KeyCode::Backspace)).is_none());
    }
    assert!(
        app.visible_tasks()
            .iter()
            .all(|t| t.status == TaskStatus::Completed)
    );
}

#[test]
fn refresh_is_a_no_op_offline() {
    let mut app = App::offline_demo();
    assert!(app.handle_key_event(key(KeyCode::Char('r'))).is_none());
}

#[test]
fn delete_on_empty_filtered_view_does_nothing() {
    let mut app = App::offline_demo();
    assert!(app.handle_key_event(key(KeyCode::Char('/'))).is_none());
    type_str(&mut app, "no such task");
    assert!(app.handle_key_event(key(KeyCode::Esc)).is_none());

    let before = app.tasks.len();
    assert!(app.handle_key_event(key(KeyCode::Char('d'))).is_none());
    assert_eq!(app.tasks.len(), before);
}

#[test]
fn validation_errors_keep_the_form_open_offline() {
    let mut app = App::offline_demo();
    assert!(app.handle_key_event(key(KeyCode::Char('n'))).is_none());
    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert_eq!(app.modal, Modal::TaskForm);
    assert!(!app.task_form.errors.is_empty());

    // Esc abandons the draft without touching the list.
    let before = app.tasks.len();
    assert!(app.handle_key_event(key(KeyCode::Esc)).is_none());
    assert_eq!(app.modal, Modal::None);
    assert_eq!(app.tasks.len(), before);
}

#[test]
fn logout_offline_returns_to_login_screen() {
    let mut app = App::offline_demo();
    let _ = app.handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
    assert_eq!(app.screen, Screen::Login);
    assert!(app.logout_requested);
    assert!(app.tasks.is_empty());
}

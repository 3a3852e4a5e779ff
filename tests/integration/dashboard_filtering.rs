//! Integration tests for dashboard filtering and search.
//!
//! Covers the combined search + status filter semantics and the ingest
//! path that drops malformed records before they reach the filter.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck_core::filter::{StatusFilter, filter_tasks};
use taskdeck_core::task::{RawTask, Task, TaskStatus};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn task(title: &str, description: &str, status: TaskStatus) -> Task {
    Task {
        id: None,
        title: title.to_string(),
        description: description.to_string(),
        due_date: "2023-10-09T23:59:59.999Z".to_string(),
        status,
    }
}

fn sample() -> Vec<Task> {
    vec![
        task("Pay bills", "Electricity", TaskStatus::Pending),
        task("Buy groceries", "Milk and eggs", TaskStatus::Completed),
        task("Call the bank", "About the bill", TaskStatus::Pending),
        task("pay rent", "", TaskStatus::Completed),
    ]
}

// ---------------------------------------------------------------------------
// Search and filter combination
// ---------------------------------------------------------------------------

#[test]
fn empty_search_and_all_filter_returns_everything() {
    let tasks = sample();
    let visible = filter_tasks(&tasks, "", StatusFilter::All);
    assert_eq!(visible.len(), tasks.len());
}

#[test]
fn search_is_case_insensitive_on_title() {
    let tasks = sample();
    let visible = filter_tasks(&tasks, "PAY", StatusFilter::All);
    let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay bills", "pay rent"]);
}

#[test]
fn search_never_matches_description() {
    let tasks = sample();
    // "bill" appears in a description but that task's title has no match.
    let visible = filter_tasks(&tasks, "milk", StatusFilter::All);
    assert!(visible.is_empty());
}

#[test]
fn search_and_status_combine_with_and() {
    let tasks = sample();
    let visible = filter_tasks(&tasks, "pay", StatusFilter::Completed);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "pay rent");
}

#[test]
fn status_filter_alone_partitions_the_list() {
    let tasks = sample();
    let pending = filter_tasks(&tasks, "", StatusFilter::Pending);
    let completed = filter_tasks(&tasks, "", StatusFilter::Completed);
    assert_eq!(pending.len() + completed.len(), tasks.len());
    assert!(pending.iter().all(|t| t.status == TaskStatus::Pending));
    assert!(completed.iter().all(|t| t.status == TaskStatus::Completed));
}

#[test]
fn filtering_preserves_original_order() {
    let tasks = sample();
    let visible = filter_tasks(&tasks, "", StatusFilter::Pending);
    let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay bills", "Call the bank"]);
}

#[test]
fn no_match_returns_empty_without_error() {
    let tasks = sample();
    assert!(filter_tasks(&tasks, "zzz", StatusFilter::All).is_empty());
    assert!(filter_tasks(&[], "", StatusFilter::All).is_empty());
}

#[test]
fn filter_cycle_wraps_around() {
    let mut f = StatusFilter::All;
    f = f.next();
    assert_eq!(f, StatusFilter::Pending);
    f = f.next();
    assert_eq!(f, StatusFilter::Completed);
    f = f.next();
    assert_eq!(f, StatusFilter::All);
}

// ---------------------------------------------------------------------------
// Ingest boundary: malformed records never reach the filter
// ---------------------------------------------------------------------------

#[test]
fn raw_records_missing_fields_are_dropped() {
    let payload = serde_json::json!([
        { "id": "1", "title": "Keep me", "dueDate": "2023-10-09T23:59:59.999Z", "status": "pending" },
        { "id": "2", "dueDate": "2023-10-09T23:59:59.999Z", "status": "pending" },
        { "id": "3", "title": "No due date", "status": "completed" },
        { "id": "4", "title": "Bad status", "dueDate": "2023-10-09T23:59:59.999Z", "status": "done" }
    ]);

    let raw: Vec<RawTask> = serde_json::from_value(payload).expect("well-formed json");
    let tasks: Vec<Task> = raw.into_iter().filter_map(RawTask::into_task).collect();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Keep me");

    // A filter over the ingested list is total: nothing panics on the
    // survivors regardless of search or status selection.
    assert_eq!(filter_tasks(&tasks, "keep", StatusFilter::Pending).len(), 1);
}

#[test]
fn raw_record_without_description_defaults_to_empty() {
    let payload = serde_json::json!(
        { "id": "1", "title": "Bare", "dueDate": "2023-10-09T23:59:59.999Z", "status": "pending" }
    );
    let raw: RawTask = serde_json::from_value(payload).unwrap();
    let task = raw.into_task().expect("required fields present");
    assert!(task.description.is_empty());
}

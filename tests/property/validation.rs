//! Property-based validation and filtering tests.
//!
//! Uses proptest to verify:
//! 1. Length rules hold across the whole accepted range, not just the
//!    boundaries.
//! 2. Any password containing whitespace is rejected.
//! 3. Validation is deterministic for a given input.
//! 4. Calendar-day normalization round-trips to the same day.
//! 5. Filtering returns an order-preserving subset for any input.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use taskdeck_core::dates::{date_input_value, end_of_day_utc};
use taskdeck_core::filter::{StatusFilter, filter_tasks};
use taskdeck_core::task::{Task, TaskDraft, TaskStatus};
use taskdeck_core::validate::{validate_login, validate_task};

// --- Strategies ---

/// Strategy for titles within the accepted 1..=100 character range.
fn arb_valid_title() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>().prop_filter("printable", |c| !c.is_control()), 1..=100)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for a calendar day guaranteed to exist in any month.
fn arb_calendar_day() -> impl Strategy<Value = String> {
    (1970i32..=2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// Strategy for passwords that contain at least one whitespace character.
fn arb_whitespace_password() -> impl Strategy<Value = String> {
    ("[a-z]{0,8}", prop::sample::select(vec![' ', '\t', '\n']), "[a-z]{0,8}")
        .prop_map(|(a, ws, b)| format!("{a}{ws}{b}"))
}

/// Strategy for an arbitrary task list.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        ("[a-zA-Z0-9 ]{0,20}", any::<bool>()).prop_map(|(title, done)| Task {
            id: None,
            title,
            description: String::new(),
            due_date: "2023-10-09T23:59:59.999Z".to_string(),
            status: if done {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            },
        }),
        0..32,
    )
}

fn draft_with_title(title: String) -> TaskDraft {
    TaskDraft {
        title,
        description: String::new(),
        due_date: "2023-10-09T23:59:59.999Z".to_string(),
        status: None,
    }
}

// --- Properties ---

proptest! {
    /// Every title in the accepted character range passes validation.
    #[test]
    fn titles_in_range_always_pass(title in arb_valid_title()) {
        let draft = draft_with_title(title);
        prop_assert!(validate_task(&draft).is_ok());
    }

    /// Titles past 100 characters always fail with the length message.
    #[test]
    fn titles_over_limit_always_fail(extra in 1usize..64, c in any::<char>()) {
        let draft = draft_with_title(c.to_string().repeat(100 + extra));
        let errors = validate_task(&draft).unwrap_err();
        prop_assert_eq!(
            errors.get("title"),
            Some("Title must be between 1 and 100 characters")
        );
    }

    /// A password with any whitespace is rejected regardless of length.
    #[test]
    fn whitespace_passwords_always_fail(password in arb_whitespace_password()) {
        let creds = taskdeck_core::credentials::LoginCredentials {
            email_or_username: "alice".to_string(),
            password,
        };
        let errors = validate_login(&creds).unwrap_err();
        prop_assert!(errors.get("password").is_some());
    }

    /// Validating the same draft twice yields the same outcome.
    #[test]
    fn validation_is_deterministic(
        title in "[a-zA-Z0-9 ]{0,120}",
        due_date in "[a-zA-Z0-9:-]{0,30}",
    ) {
        let draft = TaskDraft {
            title,
            description: String::new(),
            due_date,
            status: None,
        };
        let first = validate_task(&draft);
        let second = validate_task(&draft);
        prop_assert_eq!(first, second);
    }

    /// Normalizing a calendar day and reading it back yields the same day.
    #[test]
    fn calendar_day_round_trips(day in arb_calendar_day()) {
        let iso = end_of_day_utc(&day).unwrap();
        prop_assert!(iso.ends_with("T23:59:59.999Z"));
        prop_assert_eq!(date_input_value(&iso).unwrap(), day);
        // The normalized form always passes the due-date rule.
        let draft = TaskDraft {
            title: "t".to_string(),
            description: String::new(),
            due_date: iso,
            status: None,
        };
        prop_assert!(validate_task(&draft).is_ok());
    }

    /// Filtering yields an order-preserving subset and never panics.
    #[test]
    fn filter_is_order_preserving_subset(
        tasks in arb_tasks(),
        search in "[a-zA-Z ]{0,8}",
        which in 0u8..3,
    ) {
        let status = match which {
            0 => StatusFilter::All,
            1 => StatusFilter::Pending,
            _ => StatusFilter::Completed,
        };
        let visible = filter_tasks(&tasks, &search, status);
        prop_assert!(visible.len() <= tasks.len());

        // Every visible task appears in the source, in the same relative order.
        let mut cursor = 0usize;
        for v in &visible {
            let pos = tasks[cursor..]
                .iter()
                .position(|t| std::ptr::eq(t, *v))
                .map(|p| cursor + p);
            prop_assert!(pos.is_some());
            cursor = pos.unwrap() + 1;
        }
    }

    /// An empty search with `All` is the identity filter.
    #[test]
    fn empty_search_all_filter_is_identity(tasks in arb_tasks()) {
        let visible = filter_tasks(&tasks, "", StatusFilter::All);
        prop_assert_eq!(visible.len(), tasks.len());
    }
}

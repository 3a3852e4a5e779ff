//! Integration tests for form validation.
//!
//! Exercises the draft-to-task pipeline the way the forms use it:
//! build a draft, normalize the due date, validate, convert. Field
//! error keys match the wire names the API uses.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck_core::credentials::{LoginCredentials, RegisterCredentials};
use taskdeck_core::dates::end_of_day_utc;
use taskdeck_core::task::{TaskDraft, TaskStatus};
use taskdeck_core::validate::{validate_login, validate_register, validate_task};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// A draft that passes every rule.
fn valid_draft() -> TaskDraft {
    TaskDraft {
        title: "Pay bills".to_string(),
        description: "Electricity and water".to_string(),
        due_date: "2023-10-09T23:59:59.999Z".to_string(),
        status: Some("pending".to_string()),
    }
}

fn valid_register() -> RegisterCredentials {
    RegisterCredentials {
        username: "alice_01".to_string(),
        email: "alice@example.com".to_string(),
        password: "hunter22".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Task form pipeline
// ---------------------------------------------------------------------------

#[test]
fn valid_draft_passes_and_converts() {
    let draft = valid_draft();
    assert!(validate_task(&draft).is_ok());

    let task = draft.into_task(None);
    assert_eq!(task.title, "Pay bills");
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.id.is_none());
}

#[test]
fn calendar_input_normalizes_then_validates() {
    // The form holds a plain calendar day; normalization happens before
    // validation, so the validator only ever sees full ISO timestamps.
    let normalized = end_of_day_utc("2023-10-09").expect("valid calendar day");
    assert_eq!(normalized, "2023-10-09T23:59:59.999Z");

    let draft = TaskDraft {
        due_date: normalized,
        ..valid_draft()
    };
    assert!(validate_task(&draft).is_ok());
}

#[test]
fn empty_draft_reports_title_and_due_date() {
    let draft = TaskDraft {
        title: String::new(),
        description: String::new(),
        due_date: String::new(),
        status: None,
    };
    let errors = validate_task(&draft).unwrap_err();
    assert_eq!(errors.get("title"), Some("Title is required"));
    assert_eq!(errors.get("dueDate"), Some("Due date is required"));
    assert!(errors.get("description").is_none());
    assert!(errors.get("status").is_none());
}

#[test]
fn all_fields_invalid_reports_all_fields() {
    let draft = TaskDraft {
        title: "t".repeat(101),
        description: "d".repeat(501),
        due_date: "tomorrow".to_string(),
        status: Some("done".to_string()),
    };
    let errors = validate_task(&draft).unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors.get("title"),
        Some("Title must be between 1 and 100 characters")
    );
    assert_eq!(
        errors.get("description"),
        Some("Description must be at most 500 characters")
    );
    assert_eq!(
        errors.get("dueDate"),
        Some("Due date must be a valid ISO-8601 date-time")
    );
    assert_eq!(
        errors.get("status"),
        Some("Status must be either pending or completed")
    );
}

#[test]
fn due_date_shape_without_validity_is_rejected() {
    // Matches the ISO pattern but names an impossible day.
    let draft = TaskDraft {
        due_date: "2023-02-30T23:59:59.999Z".to_string(),
        ..valid_draft()
    };
    let errors = validate_task(&draft).unwrap_err();
    assert_eq!(
        errors.get("dueDate"),
        Some("Due date must be a valid ISO-8601 date-time")
    );
}

#[test]
fn boundary_lengths_pass() {
    let draft = TaskDraft {
        title: "t".repeat(100),
        description: "d".repeat(500),
        ..valid_draft()
    };
    assert!(validate_task(&draft).is_ok());
}

#[test]
fn multibyte_title_counts_characters_not_bytes() {
    // 100 three-byte characters is still a 100-character title.
    let draft = TaskDraft {
        title: "日".repeat(100),
        ..valid_draft()
    };
    assert!(validate_task(&draft).is_ok());
}

// ---------------------------------------------------------------------------
// Registration form
// ---------------------------------------------------------------------------

#[test]
fn valid_registration_passes() {
    assert!(validate_register(&valid_register()).is_ok());
}

#[test]
fn registration_reports_every_bad_field_at_once() {
    let creds = RegisterCredentials {
        username: "a!".to_string(),
        email: "not-an-email".to_string(),
        password: "pass word".to_string(),
    };
    let errors = validate_register(&creds).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors.get("username"),
        Some("Username must be between 3 and 30 characters")
    );
    assert_eq!(errors.get("email"), Some("Email must be between 9 and 68 characters"));
    assert_eq!(
        errors.get("password"),
        Some("Password cannot contain whitespace")
    );
}

#[test]
fn username_charset_is_enforced_after_length() {
    let creds = RegisterCredentials {
        username: "bad name".to_string(),
        ..valid_register()
    };
    let errors = validate_register(&creds).unwrap_err();
    assert_eq!(
        errors.get("username"),
        Some("Username can only contain letters, numbers, dots, and underscores")
    );
}

#[test]
fn email_format_checked_within_length_range() {
    let creds = RegisterCredentials {
        email: "aa@bb@cc.com".to_string(),
        ..valid_register()
    };
    let errors = validate_register(&creds).unwrap_err();
    assert_eq!(errors.get("email"), Some("Invalid email format"));
}

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

#[test]
fn login_accepts_email_or_plain_username() {
    for identifier in ["alice", "alice@example.com"] {
        let creds = LoginCredentials {
            email_or_username: identifier.to_string(),
            password: "hunter22".to_string(),
        };
        assert!(validate_login(&creds).is_ok(), "rejected {identifier}");
    }
}

#[test]
fn login_empty_fields_use_combined_key() {
    let creds = LoginCredentials {
        email_or_username: String::new(),
        password: String::new(),
    };
    let errors = validate_login(&creds).unwrap_err();
    assert_eq!(
        errors.get("emailOrUsername"),
        Some("Email or Username is required")
    );
    assert_eq!(errors.get("password"), Some("Password is required"));
}

#[test]
fn login_identifier_length_bounds() {
    let creds = LoginCredentials {
        email_or_username: "ab".to_string(),
        password: "hunter22".to_string(),
    };
    let errors = validate_login(&creds).unwrap_err();
    assert_eq!(
        errors.get("emailOrUsername"),
        Some("Email or Username must be between 3 and 68 characters")
    );
}

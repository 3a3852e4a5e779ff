//! Field validation for task and account forms.
//!
//! Every validator is total: each field is checked independently and the
//! caller receives one message per invalid field, so a form can highlight
//! all problems at once instead of stopping at the first. Validation never
//! performs I/O and never aborts the surrounding flow; a [`FieldErrors`]
//! value is display data, not a fault.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use crate::credentials::{LoginCredentials, RegisterCredentials};
use crate::task::{TaskDraft, TaskStatus};

/// Shape of an ISO-8601 UTC date-time: `YYYY-MM-DDTHH:MM:SS[.sss]Z`.
static ISO_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // constant pattern
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{3})?Z$").unwrap()
});

/// `local@domain.tld` email shape.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // constant pattern
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Per-field validation errors: exactly one message per invalid field.
///
/// Iteration order is the fields' lexicographic order, which keeps
/// rendering and test assertions deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    /// Returns the error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    /// True when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    fn record(&mut self, field: &'static str, error: Option<&'static str>) {
        if let Some(message) = error {
            self.errors.insert(field, message);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Validates a task draft before it may leave the form boundary.
///
/// The draft's `due_date` is expected to already be normalized to an
/// ISO-8601 UTC string (see [`crate::dates::end_of_day_utc`]).
///
/// # Errors
///
/// Returns [`FieldErrors`] mapping each invalid field to its message.
pub fn validate_task(draft: &TaskDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.record("title", title_error(&draft.title));
    errors.record("description", description_error(&draft.description));
    errors.record("dueDate", due_date_error(&draft.due_date));
    errors.record("status", status_error(draft.status.as_deref()));
    errors.into_result()
}

/// Validates registration credentials.
///
/// # Errors
///
/// Returns [`FieldErrors`] mapping each invalid field to its message.
pub fn validate_register(creds: &RegisterCredentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.record("username", username_error(&creds.username));
    errors.record("email", email_error(&creds.email));
    errors.record("password", password_error(&creds.password));
    errors.into_result()
}

/// Validates login credentials.
///
/// # Errors
///
/// Returns [`FieldErrors`] mapping each invalid field to its message.
pub fn validate_login(creds: &LoginCredentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    errors.record(
        "emailOrUsername",
        email_or_username_error(&creds.email_or_username),
    );
    errors.record("password", password_error(&creds.password));
    errors.into_result()
}

// ---------------------------------------------------------------------------
// Per-field rules (each returns one message or None, mirroring the forms)
// ---------------------------------------------------------------------------

fn title_error(title: &str) -> Option<&'static str> {
    if title.is_empty() {
        return Some("Title is required");
    }
    if title.chars().count() > 100 {
        return Some("Title must be between 1 and 100 characters");
    }
    None
}

fn description_error(description: &str) -> Option<&'static str> {
    if description.chars().count() > 500 {
        return Some("Description must be at most 500 characters");
    }
    None
}

fn due_date_error(due_date: &str) -> Option<&'static str> {
    if due_date.is_empty() {
        return Some("Due date is required");
    }
    // Shape first, then a real calendar instant (the pattern alone would
    // admit 2023-13-99T00:00:00Z).
    if !ISO_DATETIME.is_match(due_date) || DateTime::parse_from_rfc3339(due_date).is_err() {
        return Some("Due date must be a valid ISO-8601 date-time");
    }
    None
}

fn status_error(status: Option<&str>) -> Option<&'static str> {
    match status {
        None => None,
        Some(s) if TaskStatus::parse(s).is_some() => None,
        Some(_) => Some("Status must be either pending or completed"),
    }
}

fn username_error(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        return Some("Username is required");
    }
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Some("Username must be between 3 and 30 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    {
        return Some("Username can only contain letters, numbers, dots, and underscores");
    }
    None
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("Email is required");
    }
    let len = email.chars().count();
    if !(9..=68).contains(&len) {
        return Some("Email must be between 9 and 68 characters");
    }
    if !EMAIL.is_match(email) {
        return Some("Invalid email format");
    }
    None
}

fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some("Password is required");
    }
    let len = password.chars().count();
    if !(6..=18).contains(&len) {
        return Some("Password must be between 6 and 18 characters");
    }
    if password.chars().any(char::is_whitespace) {
        return Some("Password cannot contain whitespace");
    }
    None
}

fn email_or_username_error(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Email or Username is required");
    }
    let len = value.chars().count();
    if !(3..=68).contains(&len) {
        return Some("Email or Username must be between 3 and 68 characters");
    }
    None
}

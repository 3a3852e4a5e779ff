//! Task model for `TaskDeck`.
//!
//! Defines the typed [`Task`] record exchanged with the remote API, the
//! all-optional [`RawTask`] wire mirror used to ingest partially-loaded
//! data without faulting, and the [`TaskDraft`] form payload that exists
//! only between keystrokes and validation.

use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// Case-insensitive on input (`"Pending"`, `"COMPLETED"`, ...); always
/// stored, compared, and transmitted lower-case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is open and awaiting work.
    #[default]
    Pending,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Parses a status string, ignoring ASCII case.
    ///
    /// Returns `None` for anything outside {pending, completed}.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("pending") {
            Some(Self::Pending)
        } else if s.eq_ignore_ascii_case("completed") {
            Some(Self::Completed)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// A user-owned to-do item.
///
/// Wire representation is camelCase JSON (`dueDate`). The `id` is assigned
/// by the server and absent for not-yet-created tasks; it is omitted from
/// serialized bodies when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title, 1–100 characters.
    pub title: String,
    /// Free-form description, up to 500 characters.
    #[serde(default)]
    pub description: String,
    /// Due instant as an ISO-8601 UTC string (`YYYY-MM-DDTHH:MM:SS.sssZ`).
    pub due_date: String,
    /// Current status, lower-case on the wire.
    #[serde(default)]
    pub status: TaskStatus,
}

/// An all-optional mirror of the wire task record.
///
/// The API list endpoint is deserialized into `RawTask` so that records
/// with missing or unrecognized fields degrade to exclusion instead of
/// failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    /// Opaque server-assigned identifier, if present.
    pub id: Option<String>,
    /// Title, if present.
    pub title: Option<String>,
    /// Description, if present.
    pub description: Option<String>,
    /// Due date string, if present.
    pub due_date: Option<String>,
    /// Status string as received, any casing.
    pub status: Option<String>,
}

impl RawTask {
    /// Converts a raw wire record into a typed [`Task`].
    ///
    /// Returns `None` when the record lacks a title, due date, or status,
    /// or when the status is not a recognized value. Callers drop such
    /// records rather than propagate a fault.
    #[must_use]
    pub fn into_task(self) -> Option<Task> {
        let title = self.title?;
        let due_date = self.due_date?;
        let status = TaskStatus::parse(&self.status?)?;
        Some(Task {
            id: self.id,
            title,
            description: self.description.unwrap_or_default(),
            due_date,
            status,
        })
    }
}

/// A candidate task as captured by the input form, prior to validation.
///
/// All fields are raw strings: the form boundary cannot guarantee a valid
/// status or date, so those constraints are checked by
/// [`validate_task`](crate::validate::validate_task) rather than encoded
/// in the types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed.
    pub description: String,
    /// Due date, already normalized to an ISO-8601 UTC string.
    pub due_date: String,
    /// Status selection, if the form provided one.
    pub status: Option<String>,
}

impl TaskDraft {
    /// Converts a validated draft into a [`Task`] ready for submission.
    ///
    /// Must only be called after the draft passed validation; an absent
    /// status defaults to pending and any casing is normalized away.
    #[must_use]
    pub fn into_task(self, id: Option<String>) -> Task {
        let status = self
            .status
            .as_deref()
            .and_then(TaskStatus::parse)
            .unwrap_or_default();
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status,
        }
    }
}

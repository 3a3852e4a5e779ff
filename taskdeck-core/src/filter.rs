//! Search and status filtering over the in-memory task list.
//!
//! Recomputed from scratch on every keystroke or filter change; the list
//! is page-sized, so an O(n) pass per invocation is the whole story.

use crate::task::{Task, TaskStatus};

/// Status filter selection for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Show every task regardless of status.
    #[default]
    All,
    /// Show only pending tasks.
    Pending,
    /// Show only completed tasks.
    Completed,
}

impl StatusFilter {
    /// Cycles to the next filter value: All → Pending → Completed → All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Whether a task with the given status passes this filter.
    #[must_use]
    pub const fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => matches!(status, TaskStatus::Pending),
            Self::Completed => matches!(status, TaskStatus::Completed),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else if s.eq_ignore_ascii_case("pending") {
            Ok(Self::Pending)
        } else if s.eq_ignore_ascii_case("completed") {
            Ok(Self::Completed)
        } else {
            Err(())
        }
    }
}

/// Returns the tasks matching both the search term and the status filter,
/// preserving the input order.
///
/// The search term is a case-insensitive substring match against the title
/// only; an empty term matches every task. The input is never mutated and
/// a fresh sequence is produced on each call.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], search: &str, filter: StatusFilter) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            let matches_search = needle.is_empty() || task.title.to_lowercase().contains(&needle);
            matches_search && filter.matches(task.status)
        })
        .collect()
}

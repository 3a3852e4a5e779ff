//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use taskdeck_core::task::TaskStatus;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/online indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error/offline indicator color.
pub const ERROR: Color = Color::Red;

/// Offline indicator color.
pub const OFFLINE: Color = Color::DarkGray;

/// Badge color for pending tasks.
pub const STATUS_PENDING: Color = Color::Yellow;

/// Badge color for completed tasks.
pub const STATUS_COMPLETED: Color = Color::Green;

/// Panel title color for the dashboard.
pub const DASHBOARD_TITLE: Color = Color::Green;

/// Panel title color for the auth forms.
pub const AUTH_TITLE: Color = Color::Cyan;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (dates, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused field borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for inline validation errors.
#[must_use]
pub fn error_text() -> Style {
    Style::default().fg(ERROR)
}

/// Style for a task status badge.
#[must_use]
pub fn status_badge(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::Pending => STATUS_PENDING,
        TaskStatus::Completed => STATUS_COMPLETED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

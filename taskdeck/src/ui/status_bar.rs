//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, DashboardFocus, Modal, Screen};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.screen {
        Screen::Login => "Enter: log in | Ctrl+R: register | Esc: quit",
        Screen::Register => "Enter: create account | Esc: back",
        Screen::Dashboard => match app.modal {
            Modal::TaskForm => "Enter: save | Tab: next field | Esc: cancel",
            Modal::TaskDetail => "Enter/Esc: close",
            Modal::None => {
                if app.focus == DashboardFocus::Search {
                    "Type to search | Enter/Esc: back to list"
                } else {
                    "a: add | e: edit | d: delete | f: filter | /: search | r: refresh | Ctrl+L: logout | q: quit"
                }
            }
        },
    };

    let (dot_color, connection_text) = if app.online {
        (theme::SUCCESS, "Online")
    } else {
        (theme::OFFLINE, "Offline demo")
    };

    let mut spans = vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {connection_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ];

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message.clone(), theme::normal().fg(theme::WARNING)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

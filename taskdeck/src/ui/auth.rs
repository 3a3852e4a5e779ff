//! Login and registration form rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{centered_rect, theme};
use crate::app::{App, Screen};

/// Height of one labelled field block plus its error line.
const FIELD_HEIGHT: u16 = 4;

/// Render the login or register form centered in the content area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Register => render_register(frame, area, app),
        _ => render_login(frame, area, app),
    }
}

fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let form = centered_rect(48, 2 + 2 * FIELD_HEIGHT + 2, area);
    let block = Block::default()
        .title(Span::styled(" TaskDeck — Login ", theme::panel_title(theme::AUTH_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Email or Username",
        &app.login.email_or_username,
        app.login.focus == 0,
        app.login.errors.get("emailOrUsername"),
    );
    render_field(
        frame,
        rows[1],
        "Password",
        &mask(&app.login.password),
        app.login.focus == 1,
        app.login.errors.get("password"),
    );

    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter: log in | Ctrl+R: register | Esc: quit",
        theme::dimmed(),
    )));
    frame.render_widget(hint, rows[2]);
}

fn render_register(frame: &mut Frame, area: Rect, app: &App) {
    let form = centered_rect(48, 2 + 3 * FIELD_HEIGHT + 2, area);
    let block = Block::default()
        .title(Span::styled(
            " TaskDeck — Register ",
            theme::panel_title(theme::AUTH_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Username",
        &app.register.username,
        app.register.focus == 0,
        app.register.errors.get("username"),
    );
    render_field(
        frame,
        rows[1],
        "Email",
        &app.register.email,
        app.register.focus == 1,
        app.register.errors.get("email"),
    );
    render_field(
        frame,
        rows[2],
        "Password",
        &mask(&app.register.password),
        app.register.focus == 2,
        app.register.errors.get("password"),
    );

    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter: create account | Esc: back to login",
        theme::dimmed(),
    )));
    frame.render_widget(hint, rows[3]);
}

/// Render one labelled input box with its validation error underneath.
pub(super) fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&'static str>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let input = Paragraph::new(value).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(input, rows[0]);

    if let Some(message) = error {
        let line = Paragraph::new(Span::styled(message, theme::error_text()));
        frame.render_widget(line, rows[1]);
    }
}

fn mask(value: &str) -> String {
    "•".repeat(value.chars().count())
}

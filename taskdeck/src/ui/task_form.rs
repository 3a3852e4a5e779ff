//! Add/edit task form modal.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use taskdeck_core::task::TaskStatus;

use super::{auth::render_field, centered_rect, theme};
use crate::app::App;

const FIELD_HEIGHT: u16 = 4;

/// Render the add/edit task form over the dashboard.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.task_form.editing_index.is_some() {
        " Edit Task "
    } else {
        " Add Task "
    };

    let modal = centered_rect(56, 2 + 3 * FIELD_HEIGHT + 3 + 1, area);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::DASHBOARD_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Title",
        &app.task_form.title,
        app.task_form.focus == 0,
        app.task_form.errors.get("title"),
    );
    render_field(
        frame,
        rows[1],
        "Description",
        &app.task_form.description,
        app.task_form.focus == 1,
        app.task_form.errors.get("description"),
    );
    render_field(
        frame,
        rows[2],
        "Due Date (YYYY-MM-DD)",
        &app.task_form.due_date,
        app.task_form.focus == 2,
        app.task_form.errors.get("dueDate"),
    );
    render_status_field(frame, rows[3], app);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter: save | Tab: next field | Space: toggle status | Esc: cancel",
        theme::dimmed(),
    )));
    frame.render_widget(hint, rows[4]);
}

fn render_status_field(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.task_form.focus == 3;
    let label_style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };

    let option = |status: TaskStatus| {
        let marker = if app.task_form.status == status {
            "(•)"
        } else {
            "( )"
        };
        Span::styled(
            format!("{marker} {status}"),
            if app.task_form.status == status {
                theme::status_badge(status)
            } else {
                theme::dimmed()
            },
        )
    };

    let line = Line::from(vec![
        Span::styled("Status: ", label_style),
        option(TaskStatus::Pending),
        Span::raw("   "),
        option(TaskStatus::Completed),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

//! Dashboard rendering: search bar, filter indicator, and the task list.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use taskdeck_core::dates::format_display;
use taskdeck_core::filter::StatusFilter;
use taskdeck_core::task::{Task, TaskStatus};

use super::{centered_rect, theme};
use crate::app::{App, DashboardFocus};

/// Render the dashboard content area.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_toolbar(frame, rows[0], app);
    render_task_list(frame, rows[1], app);
}

fn render_toolbar(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let search_border = if app.focus == DashboardFocus::Search {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let search = Paragraph::new(app.search.as_str()).block(
        Block::default()
            .title("Search (/)")
            .borders(Borders::ALL)
            .border_style(search_border),
    );
    frame.render_widget(search, cols[0]);

    let filter_label = match app.status_filter {
        StatusFilter::All => "All",
        StatusFilter::Pending => "Pending",
        StatusFilter::Completed => "Completed",
    };
    let filter = Paragraph::new(Span::styled(filter_label, theme::bold())).block(
        Block::default()
            .title("Filter (f)")
            .borders(Borders::ALL)
            .border_style(theme::normal()),
    );
    frame.render_widget(filter, cols[1]);
}

fn render_task_list(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = visible.iter().map(|task| task_row(task)).collect();

    let title = format!(" Tasks ({}) ", visible.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::DASHBOARD_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled("No tasks found", theme::dimmed()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items).block(block).highlight_style(theme::selected());

    let mut state = ListState::default();
    state.select(Some(app.selected.min(visible.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_row(task: &Task) -> ListItem<'_> {
    let badge = match task.status {
        TaskStatus::Pending => "[ pending ]",
        TaskStatus::Completed => "[completed]",
    };
    let line = Line::from(vec![
        Span::styled(badge, theme::status_badge(task.status)),
        Span::raw(" "),
        Span::styled(task.title.clone(), theme::normal()),
        Span::styled(format!("  Due: {}", format_display(&task.due_date)), theme::dimmed()),
    ]);
    ListItem::new(line)
}

/// Render the read-only task detail modal over the dashboard.
pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(task) = app.selected_task() else {
        return;
    };

    let modal = centered_rect(56, 10, area);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(Span::styled(" Task ", theme::panel_title(theme::DASHBOARD_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let description = if task.description.is_empty() {
        Span::styled("(no description)", theme::dimmed())
    } else {
        Span::styled(task.description.clone(), theme::normal())
    };

    let lines = vec![
        Line::from(Span::styled(task.title.clone(), theme::bold())),
        Line::default(),
        Line::from(description),
        Line::default(),
        Line::from(vec![
            Span::styled("Due: ", theme::dimmed()),
            Span::styled(format_display(&task.due_date), theme::normal()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", theme::dimmed()),
            Span::styled(task.status.to_string(), theme::status_badge(task.status)),
        ]),
    ];

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(detail, modal);
}

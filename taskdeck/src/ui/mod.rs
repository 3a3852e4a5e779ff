//! Terminal UI rendering.

pub mod auth;
pub mod dashboard;
pub mod status_bar;
pub mod task_form;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::app::{App, Modal, Screen};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Main layout with the status bar at the bottom.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    match app.screen {
        Screen::Login | Screen::Register => auth::render(frame, content_area, app),
        Screen::Dashboard => {
            dashboard::render(frame, content_area, app);
            match app.modal {
                Modal::TaskForm => task_form::render(frame, content_area, app),
                Modal::TaskDetail => dashboard::render_detail(frame, content_area, app),
                Modal::None => {}
            }
        }
    }

    status_bar::render(frame, status_area, app);
}

/// A rectangle of the given size centered within `area`, clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

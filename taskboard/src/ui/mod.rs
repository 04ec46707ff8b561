//! Terminal UI rendering.

pub mod columns;
pub mod header;
pub mod status_bar;
pub mod task_form;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.loading {
        render_centered(frame, area, Line::styled("Loading...", theme::dimmed()));
        return;
    }
    if let Some(message) = &app.fatal_error {
        render_centered(frame, area, Line::styled(message.as_str(), theme::error()));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(frame, chunks[0], app);
    columns::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);

    if let Some(form) = &app.modal {
        task_form::render(frame, area, form);
    }
}

fn render_centered(frame: &mut Frame, area: Rect, line: Line<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rows[1]);
}

//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;

/// Render the status bar at the bottom of the screen.
///
/// A pending mutation error takes the bar over until dismissed with Esc.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(err) = &app.error {
        Line::from(vec![
            Span::styled(format!(" {err} "), theme::error()),
            Span::styled(" Esc: dismiss", theme::dimmed()),
        ])
    } else {
        let help_text = if app.modal.is_some() {
            "Tab: next field | ←→: status | Enter: save | Esc: cancel"
        } else if app.drag.is_some() {
            "←→/hl: choose column | m/Space/Enter: drop | Esc: cancel"
        } else {
            "←→↑↓/hjkl: navigate | a: add | n: add to-do | e: edit | d: delete | m: move | q: quit"
        };
        Line::from(vec![
            Span::styled("Taskboard", theme::bold()),
            Span::raw(" | "),
            Span::raw(format!("{} tasks", app.store.tasks().len())),
            Span::raw(" | "),
            Span::styled(help_text, theme::dimmed()),
        ])
    };

    let paragraph = Paragraph::new(line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

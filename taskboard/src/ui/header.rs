//! Board header: board name and the global add affordance.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;

/// Render the one-line header at the top of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(" ▦ ", theme::highlighted()),
        Span::styled(app.store.board().name.as_str(), theme::bold()),
        Span::raw("   "),
        Span::styled("[n] Add Task", theme::highlighted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::status_bar_bg()), area);
}

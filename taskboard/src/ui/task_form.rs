//! Create/edit modal.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use taskboard_proto::task::Status;

use super::theme;
use crate::form::{FormField, InputField, TaskForm};

/// Render the form as a centered overlay.
pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm) {
    let popup = centered_rect(60, 11, area);
    frame.render_widget(Clear, popup);

    let title = if form.is_saving() {
        format!(" {} (saving...) ", form.heading())
    } else {
        format!(" {} ", form.heading())
    };
    let block = Block::default()
        .title(Span::styled(title, theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    render_input(frame, rows[0], "Title", &form.title, form.focus == FormField::Title);
    render_input(
        frame,
        rows[1],
        "Description",
        &form.description,
        form.focus == FormField::Description,
    );
    render_status(frame, rows[2], form.status, form.focus == FormField::Status);
}

fn field_block(label: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::highlighted()
        } else {
            theme::dimmed()
        })
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, input: &InputField, focused: bool) {
    let line = if focused {
        let value = input.value();
        let split = value
            .char_indices()
            .nth(input.cursor())
            .map_or(value.len(), |(i, _)| i);
        let (before, rest) = value.split_at(split);
        let mut chars = rest.chars();
        let at_cursor = chars.next().map_or_else(|| " ".to_string(), String::from);
        Line::from(vec![
            Span::styled(before, theme::normal()),
            Span::styled(at_cursor, theme::input_cursor()),
            Span::styled(chars.as_str(), theme::normal()),
        ])
    } else {
        Line::from(Span::styled(input.value(), theme::normal()))
    };
    frame.render_widget(Paragraph::new(line).block(field_block(label, focused)), area);
}

fn render_status(frame: &mut Frame, area: Rect, current: Status, focused: bool) {
    let mut spans = Vec::new();
    for status in Status::ALL {
        let label = format!(" {} ", theme::status_label(status));
        let style = if status == current {
            theme::panel_title(theme::status_color(status)).add_modifier(ratatui::style::Modifier::REVERSED)
        } else {
            theme::dimmed()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(field_block("Status", focused)),
        area,
    );
}

/// A `percent_x` wide, `height` tall rectangle centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

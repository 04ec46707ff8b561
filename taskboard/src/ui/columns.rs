//! Status columns and task cards.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use taskboard_proto::task::{Status, Task};

use super::theme;
use crate::app::App;

/// Render one column per status, side by side.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (status, col_area) in Status::ALL.into_iter().zip(columns.iter()) {
        render_column(frame, *col_area, app, status);
    }
}

fn render_column(frame: &mut Frame, area: Rect, app: &App, status: Status) {
    let tasks = app.store.tasks_by_status(status);
    let is_selected = app.selected_status == status && app.drag.is_none();
    let is_drop_target = app.drag.as_ref().is_some_and(|d| d.over == status);
    let color = theme::status_color(status);

    let border_style = if is_drop_target {
        theme::normal().fg(theme::DRAG)
    } else if is_selected {
        theme::panel_title(color)
    } else {
        theme::normal().fg(theme::BORDER_IDLE)
    };

    let mut title = vec![
        Span::styled(format!(" {} ", theme::status_label(status)), theme::panel_title(color)),
        Span::styled(format!("({}) ", tasks.len()), theme::dimmed()),
    ];
    if is_drop_target {
        title.push(Span::styled("drop here ", theme::dragging()));
    } else if is_selected {
        title.push(Span::styled("[a] + ", theme::highlighted()));
    }

    // Keep the cursor (or the carried card) inside the visible rows.
    let focus = app.drag.as_ref().map_or_else(
        || (is_selected && !tasks.is_empty()).then_some(app.selected_task),
        |d| tasks.iter().position(|t| t.id == d.task_id),
    );
    let mut state = ListState::default().with_selected(focus);

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let carried = app.drag.as_ref().is_some_and(|d| d.task_id == task.id);
            let style = if carried {
                theme::dragging()
            } else if is_selected && idx == app.selected_task {
                theme::selected()
            } else {
                theme::normal()
            };
            card(task, area.width.saturating_sub(4)).style(style)
        })
        .collect();

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// A card: bold title, then the first line of the description if any.
fn card(task: &Task, width: u16) -> ListItem<'_> {
    let mut lines = vec![Line::from(Span::styled(task.title.as_str(), theme::bold()))];
    if let Some(first) = task.description.lines().next().filter(|l| !l.is_empty()) {
        lines.push(Line::from(Span::styled(
            truncate(first, usize::from(width)),
            theme::dimmed(),
        )));
    }
    lines.push(Line::raw(""));
    ListItem::new(lines)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

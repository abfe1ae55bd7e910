//! Kanban board: one column per status, cards in position order.
//!
//! While a card is grabbed the columns are still drawn from the store's
//! projection; the hover slot is only marked, never spliced in.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use taskboard_proto::task::{KANBAN_COLUMNS, Task, TaskStatus};

use super::theme;
use crate::app::App;
use crate::views::format;

/// Render the four columns.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (status, column_area) in KANBAN_COLUMNS.iter().zip(columns.iter()) {
        render_column(frame, *column_area, app, *status);
    }
}

fn render_column(frame: &mut Frame, area: Rect, app: &App, status: TaskStatus) {
    let tasks = app.state.tasks_by_status.column(status);
    let cursor = &app.kanban;
    let is_focused = cursor.column() == status;
    let hover = cursor.hover().filter(|slot| slot.column == status);
    let width = usize::from(area.width.saturating_sub(4));

    let mut items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(row, task)| {
            let style = if cursor.dragged_task() == Some(task.id) {
                theme::dragging()
            } else if is_focused && !cursor.is_dragging() && row == cursor.row() {
                theme::selected()
            } else {
                theme::normal()
            };
            let mut item = card(task, width).style(style);
            if hover.is_some_and(|slot| slot.index == row) {
                item = item.style(style.patch(theme::drop_target()));
            }
            item
        })
        .collect();

    // A foreign column can accept a drop after its last card.
    if hover.is_some_and(|slot| slot.index == tasks.len()) {
        items.push(ListItem::new(Span::styled("── drop here ──", theme::drop_target())));
    }

    let title = Line::from(vec![
        Span::styled(status.label(), theme::panel_title(theme::status_color(status))),
        Span::styled(format!(" ({})", tasks.len()), theme::dimmed()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(List::new(items).block(block), area);
}

fn card(task: &Task, width: usize) -> ListItem<'static> {
    let mut meta = vec![Span::styled(
        format::priority_badge(task),
        theme::normal().fg(theme::priority_color(task.priority)),
    )];
    if let Some(assignee) = &task.assignee {
        meta.push(Span::styled(format!(" @{assignee}"), theme::dimmed()));
    }
    ListItem::new(vec![
        Line::from(format::truncate(&task.title, width)),
        Line::from(meta),
    ])
}

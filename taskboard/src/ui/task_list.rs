//! Task list screen: filter bar, table, pager.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use super::theme;
use crate::app::{App, FilterInput};
use crate::views::format;
use crate::views::list::assignees;

/// Render the list screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    render_filters(frame, chunks[0], app);

    let page = app.list_page();
    let now = Utc::now();
    let rows: Vec<Row> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let style = if i == app.list.selected {
                theme::selected()
            } else if task.is_overdue(now) {
                theme::normal().fg(theme::ERROR)
            } else {
                theme::normal()
            };
            Row::new(vec![
                task.title.clone(),
                task.status.label().to_string(),
                format::priority_badge(task),
                task.assignee.clone().unwrap_or_default(),
                format::due_label(task, now, &app.date_format),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(["Title", "Status", "Priority", "Assignee", "Due"]).style(theme::bold());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(Block::default().title("Tasks").borders(Borders::ALL));
    frame.render_widget(table, chunks[1]);

    let pager = format!(
        "page {}/{} | {} task(s)",
        page.page, page.total_pages, page.total_items
    );
    frame.render_widget(Paragraph::new(Span::styled(pager, theme::dimmed())), chunks[2]);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let filter = &app.list.filter;
    let field = |label: &'static str, value: &str, active: bool| {
        let style = if active {
            theme::highlighted()
        } else {
            theme::normal()
        };
        let shown = if value.is_empty() { "any" } else { value };
        vec![
            Span::styled(format!("{label}: "), theme::dimmed()),
            Span::styled(shown.to_string(), style),
            Span::raw("  "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(field(
        "search",
        &filter.search,
        app.list.input == Some(FilterInput::Search),
    ));
    spans.extend(field(
        "assignee",
        &filter.assignee,
        app.list.input == Some(FilterInput::Assignee),
    ));
    spans.extend(field(
        "status",
        filter.status.map_or("", |s| s.label()),
        false,
    ));
    spans.extend(field(
        "priority",
        filter.priority.map_or("", |p| p.label()),
        false,
    ));

    let known = assignees(&app.state.tasks);
    let hint = if known.is_empty() {
        String::new()
    } else {
        format!("assignees: {}", known.join(", "))
    };

    let text = vec![Line::from(spans), Line::from(Span::styled(hint, theme::dimmed()))];
    let title = if filter.is_active() {
        "Filters (active)"
    } else {
        "Filters"
    };
    frame.render_widget(
        Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

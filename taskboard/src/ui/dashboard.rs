//! Dashboard screen.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};
use taskboard_proto::task::Task;

use super::theme;
use crate::app::App;
use crate::views::format;

/// Render the dashboard.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let now = Utc::now();
    let summary = app.dashboard(now);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);
    let counts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[2]);

    let mut status_lines = vec![Line::from(vec![
        Span::styled("Total ", theme::dimmed()),
        Span::styled(summary.total.to_string(), theme::bold()),
    ])];
    status_lines.extend(summary.status_counts.iter().map(|(status, n)| {
        Line::from(vec![
            Span::styled(
                format!("{:<12}", status.label()),
                theme::normal().fg(theme::status_color(*status)),
            ),
            Span::raw(n.to_string()),
        ])
    }));
    frame.render_widget(
        Paragraph::new(status_lines).block(titled("By status")),
        counts[0],
    );

    let priority_lines: Vec<Line> = summary
        .priority_counts
        .iter()
        .map(|(priority, n)| {
            Line::from(vec![
                Span::styled(
                    format!("{} {:<8}", priority.icon(), priority.label()),
                    theme::normal().fg(theme::priority_color(*priority)),
                ),
                Span::raw(n.to_string()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(priority_lines).block(titled("By priority")),
        counts[1],
    );

    let gauge = Gauge::default()
        .block(titled("Completion"))
        .gauge_style(theme::normal().fg(theme::SUCCESS))
        .percent(u16::from(summary.completion_percent));
    frame.render_widget(gauge, rows[1]);

    let date_format = app.date_format.as_str();
    render_tasks(frame, lists[0], "Recently updated", &summary.recent, |t| {
        format::timestamp(t.updated_at)
    });
    render_tasks(frame, lists[1], "Overdue", &summary.overdue, |t| {
        format::due_date(t.due_date, date_format)
    });
    render_tasks(frame, lists[2], "Due today", &summary.due_today, |t| {
        format::priority_badge(t)
    });
}

fn render_tasks(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tasks: &[Task],
    detail: impl Fn(&Task) -> String,
) {
    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Span::styled("nothing here", theme::dimmed()))]
    } else {
        tasks
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::styled(t.title.clone(), theme::normal()),
                    Span::raw(" "),
                    Span::styled(detail(t), theme::dimmed()),
                ]))
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(titled(title)), area);
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
}

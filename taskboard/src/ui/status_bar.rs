//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Screen};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.form.is_some() {
        "Tab: next field | ←→: change | Enter: save | Esc: cancel"
    } else if app.confirm_delete.is_some() {
        "y: delete | n: keep"
    } else if app.kanban.is_dragging() {
        "←→↑↓: move | Enter: drop | Esc: cancel"
    } else if app.list.input.is_some() {
        "type to filter | Enter/Esc: done"
    } else {
        match app.screen {
            Screen::Dashboard => "1/2/3: screens | n: new | r: refresh | q: quit",
            Screen::Kanban => "hjkl: move | Enter: grab | n: new | e: edit | d: delete | q: quit",
            Screen::List => "/: search | a: assignee | s/p: status/priority | c: clear | [ ]: page",
        }
    };

    let (dot_style, activity) = if app.state.loading {
        (theme::normal().fg(theme::WARNING), "loading")
    } else if app.state.error.is_some() {
        (theme::normal().fg(theme::ERROR), "error")
    } else {
        (theme::normal().fg(theme::SUCCESS), "ready")
    };

    let mut spans = vec![
        Span::styled("Taskboard", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", dot_style),
        Span::raw(format!(" {activity}")),
        Span::raw(" | "),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(notice.clone(), theme::normal().fg(theme::WARNING)));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

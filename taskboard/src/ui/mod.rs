//! Terminal UI rendering.

pub mod dashboard;
pub mod form;
pub mod kanban;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use crate::app::{App, Screen};

const SCREENS: [Screen; 3] = [Screen::Dashboard, Screen::Kanban, Screen::List];

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let banner_height = u16::from(app.state.error.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], app);
    if let Some(error) = &app.state.error {
        render_error_banner(frame, chunks[1], error);
    }

    match app.screen {
        Screen::Dashboard => dashboard::render(frame, chunks[2], app),
        Screen::Kanban => kanban::render(frame, chunks[2], app),
        Screen::List => task_list::render(frame, chunks[2], app),
    }

    status_bar::render(frame, chunks[3], app);

    if let Some(form) = &app.form {
        form::render(frame, form);
    } else if let Some(confirm) = &app.confirm_delete {
        render_delete_prompt(frame, &confirm.title);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = SCREENS
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, s.title())));
    let selected = SCREENS.iter().position(|s| *s == app.screen).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dimmed())
        .highlight_style(theme::highlighted())
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let line = Line::from(vec![
        Span::styled(format!(" {error} "), theme::error()),
        Span::styled("(x to dismiss)", theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_delete_prompt(frame: &mut Frame, title: &str) {
    let area = centered(frame.area(), 50, 5);
    let text = vec![
        Line::from(format!("Delete \"{title}\"?")),
        Line::from(Span::styled("y: delete | n: keep", theme::dimmed())),
    ];
    let prompt = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Confirm")
            .borders(Borders::ALL)
            .border_style(theme::error()),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

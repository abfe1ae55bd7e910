//! Task form modal.

use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered, theme};
use crate::app::form::{FormField, TaskForm};

/// Render the form over the current screen.
pub fn render(frame: &mut Frame, form: &TaskForm) {
    let area = centered(frame.area(), 64, 16);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus == field;
        let label_style = if focused {
            theme::highlighted()
        } else {
            theme::dimmed()
        };
        let mut value = form.value(field).to_string();
        if field.is_selector() {
            value = format!("\u{2039} {value} \u{203a}");
        } else if focused {
            value.push('█');
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value, theme::normal()),
        ]));
        if let Some(message) = form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("            {message}"),
                theme::error(),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "due date: YYYY-MM-DD, leave empty for none",
        theme::dimmed(),
    )));

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

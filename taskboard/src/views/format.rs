//! Display formatting for dates and task badges.

use chrono::{DateTime, Local, Utc};
use taskboard_proto::task::Task;

/// Default date display format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a due date in local time, or `-` when absent.
#[must_use]
pub fn due_date(due: Option<DateTime<Utc>>, format: &str) -> String {
    due.map_or_else(
        || "-".to_string(),
        |d| d.with_timezone(&Local).format(format).to_string(),
    )
}

/// Formats a timestamp in local time with minutes.
#[must_use]
pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Due date text for a task, with an overdue marker when it applies.
#[must_use]
pub fn due_label(task: &Task, now: DateTime<Utc>, format: &str) -> String {
    let text = due_date(task.due_date, format);
    if task.is_overdue(now) {
        format!("{text} (overdue)")
    } else {
        text
    }
}

/// Priority badge: icon plus label, e.g. `↑ High`.
#[must_use]
pub fn priority_badge(task: &Task) -> String {
    format!("{} {}", task.priority.icon(), task.priority.label())
}

/// Truncates `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('\u{2026}');
    out
}

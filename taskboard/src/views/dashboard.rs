//! Dashboard statistics.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use taskboard_proto::task::{KANBAN_COLUMNS, Task, TaskPriority, TaskStatus, TasksByStatus};

/// Number of entries in the "recently updated" panel.
pub const RECENT_LIMIT: usize = 5;

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of tasks in the flat list.
    pub total: usize,
    /// Per-column counts, in board order, taken from the projection.
    pub status_counts: [(TaskStatus, usize); 4],
    /// Per-priority counts, lowest first, taken from the flat list.
    pub priority_counts: [(TaskPriority, usize); 4],
    /// Share of tasks in the done column, 0..=100.
    pub completion_percent: u8,
    /// Most recently updated tasks, newest first.
    pub recent: Vec<Task>,
    /// Tasks past their due date that are not done.
    pub overdue: Vec<Task>,
    /// Tasks due on the current UTC date that are not done.
    pub due_today: Vec<Task>,
}

impl DashboardSummary {
    /// Computes the summary from the two store collections at time `now`.
    #[must_use]
    pub fn compute(tasks: &[Task], by_status: &TasksByStatus, now: DateTime<Utc>) -> Self {
        let status_counts = KANBAN_COLUMNS.map(|status| (status, by_status.column(status).len()));
        let priority_counts = TaskPriority::ALL
            .map(|priority| (priority, tasks.iter().filter(|t| t.priority == priority).count()));

        let column_total = by_status.len();
        let done = by_status.column(TaskStatus::Done).len();
        let completion_percent = (done * 100)
            .checked_div(column_total)
            .map_or(0, |percent| u8::try_from(percent).unwrap_or(100));

        let mut recent = tasks.to_vec();
        recent.sort_by_key(|t| Reverse(t.updated_at));
        recent.truncate(RECENT_LIMIT);

        let today = now.date_naive();
        let overdue = tasks.iter().filter(|t| t.is_overdue(now)).cloned().collect();
        let due_today = tasks
            .iter()
            .filter(|t| {
                t.status != TaskStatus::Done
                    && t.due_date.is_some_and(|due| due.date_naive() == today)
            })
            .cloned()
            .collect();

        Self {
            total: tasks.len(),
            status_counts,
            priority_counts,
            completion_percent,
            recent,
            overdue,
            due_today,
        }
    }

    /// Count for one column.
    #[must_use]
    pub const fn status_count(&self, status: TaskStatus) -> usize {
        self.status_counts[status.column_index()].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use taskboard_proto::task::TaskId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn task(id: i64, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: TaskId::new(id),
            title: format!("t{id}"),
            description: None,
            status,
            priority,
            assignee: None,
            due_date: None,
            position: 1,
            created_at: now() - Duration::days(10),
            updated_at: now() - Duration::hours(id),
        }
    }

    #[test]
    fn empty_board() {
        let summary = DashboardSummary::compute(&[], &TasksByStatus::default(), now());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.completion_percent, 0);
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn counts_come_from_their_own_collections() {
        let tasks = vec![
            task(1, TaskStatus::Todo, TaskPriority::High),
            task(2, TaskStatus::Done, TaskPriority::High),
            task(3, TaskStatus::Done, TaskPriority::Low),
            task(4, TaskStatus::Review, TaskPriority::Urgent),
        ];
        let by_status = TasksByStatus::from_tasks(tasks.clone());
        let summary = DashboardSummary::compute(&tasks, &by_status, now());

        assert_eq!(summary.total, 4);
        assert_eq!(summary.status_count(TaskStatus::Done), 2);
        assert_eq!(summary.status_count(TaskStatus::InProgress), 0);
        assert_eq!(summary.priority_counts[2], (TaskPriority::High, 2));
        assert_eq!(summary.completion_percent, 50);

        // A stale projection is reported as-is.
        let summary = DashboardSummary::compute(&tasks, &TasksByStatus::default(), now());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.status_count(TaskStatus::Done), 0);
    }

    #[test]
    fn recent_is_five_newest_updates() {
        let tasks: Vec<Task> = (1..=7)
            .map(|id| task(id, TaskStatus::Todo, TaskPriority::Medium))
            .collect();
        let summary = DashboardSummary::compute(&tasks, &TasksByStatus::default(), now());
        let ids: Vec<i64> = summary.recent.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn overdue_and_due_today_skip_done() {
        let mut late = task(1, TaskStatus::Todo, TaskPriority::Medium);
        late.due_date = Some(now() - Duration::days(1));
        let mut late_done = task(2, TaskStatus::Done, TaskPriority::Medium);
        late_done.due_date = Some(now() - Duration::days(1));
        let mut today = task(3, TaskStatus::InProgress, TaskPriority::Medium);
        today.due_date = Some(Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap());
        let mut earlier_today = task(4, TaskStatus::Review, TaskPriority::Medium);
        earlier_today.due_date = Some(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());

        let tasks = vec![late, late_done, today, earlier_today];
        let summary = DashboardSummary::compute(&tasks, &TasksByStatus::default(), now());
        let overdue: Vec<i64> = summary.overdue.iter().map(|t| t.id.get()).collect();
        let due_today: Vec<i64> = summary.due_today.iter().map(|t| t.id.get()).collect();
        assert_eq!(overdue, vec![1, 4]);
        assert_eq!(due_today, vec![3, 4]);
    }
}

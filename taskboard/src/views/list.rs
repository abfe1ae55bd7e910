//! Task list filtering and pagination.

use std::cmp::Reverse;

use taskboard_proto::task::{TASKS_PER_PAGE, Task, TaskPriority, TaskStatus};

/// Filters applied to the task list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Exact priority match.
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring of the assignee.
    pub assignee: String,
    /// Case-insensitive substring of the title or description.
    pub search: String,
}

impl TaskFilter {
    /// Whether any filter is set.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_some()
            || self.priority.is_some()
            || !self.assignee.is_empty()
            || !self.search.is_empty()
    }

    /// Whether a single task passes every filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if !self.assignee.is_empty() {
            let needle = self.assignee.to_lowercase();
            let hit = task
                .assignee
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }

    /// Matching tasks, newest first.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut matched: Vec<Task> = tasks.iter().filter(|t| self.matches(t)).cloned().collect();
        matched.sort_by_key(|t| Reverse(t.created_at));
        matched
    }
}

/// Distinct assignees, sorted, for the assignee filter.
#[must_use]
pub fn assignees(tasks: &[Task]) -> Vec<String> {
    let mut names: Vec<String> = tasks
        .iter()
        .filter_map(|t| t.assignee.clone())
        .filter(|a| !a.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
}

/// Slices `items` into [`TASKS_PER_PAGE`]-sized pages and returns `page`
/// (1-based), clamped into range.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize) -> PageView<T> {
    let total_pages = items.len().div_ceil(TASKS_PER_PAGE).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * TASKS_PER_PAGE;
    let end = (start + TASKS_PER_PAGE).min(items.len());
    PageView {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items: items.len(),
    }
}

//! Authoritative in-memory task board.
//!
//! The [`Board`] owns every task and keeps each status column's positions
//! dense (`1..=n`) across create, update, reposition and delete. It is plain
//! synchronous data; the HTTP layer wraps it in a lock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use taskboard_proto::task::{
    PositionUpdate, Task, TaskCreate, TaskId, TaskStatus, TaskUpdate, TasksByStatus,
};
use taskboard_proto::validation::ValidationErrors;

/// Errors returned by board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No task has the given id.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The payload violated a validation rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// In-memory task collection with dense per-column positions.
#[derive(Debug)]
pub struct Board {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board. The first task gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks, newest first (ties: higher id first).
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tasks
    }

    /// Tasks partitioned by status, each column ordered by position.
    #[must_use]
    pub fn by_status(&self) -> TasksByStatus {
        TasksByStatus::from_tasks(self.tasks.values().cloned())
    }

    /// Looks up a single task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if no task has the id.
    pub fn get(&self, id: TaskId) -> Result<Task, BoardError> {
        self.tasks.get(&id).cloned().ok_or(BoardError::NotFound(id))
    }

    /// Creates a task at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] if the payload is invalid.
    pub fn create(&mut self, data: TaskCreate) -> Result<Task, BoardError> {
        self.create_at(data, Utc::now())
    }

    /// Creates a task with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] if the payload is invalid.
    pub fn create_at(&mut self, data: TaskCreate, now: DateTime<Utc>) -> Result<Task, BoardError> {
        data.validate()?;
        let status = data.status.unwrap_or_default();
        let id = TaskId::new(self.next_id);
        self.next_id += 1;

        let task = Task {
            id,
            title: data.title,
            description: data.description,
            status,
            priority: data.priority.unwrap_or_default(),
            assignee: data.assignee,
            due_date: data.due_date,
            position: self.column_len(status) + 1,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(id, task.clone());
        tracing::debug!(task_id = %id, status = %status, position = task.position, "task created");
        Ok(task)
    }

    /// Applies a partial update. A status change moves the task to the end
    /// of the new column and closes the gap it left behind.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] or [`BoardError::Validation`].
    pub fn update(&mut self, id: TaskId, data: TaskUpdate) -> Result<Task, BoardError> {
        data.validate()?;
        let current = self.get(id)?;

        let position = match data.status {
            Some(status) if status != current.status => {
                self.shift(current.status, |p| p > current.position, Shift::Up);
                self.column_len(status) + 1
            }
            _ => current.position,
        };

        let task = self.tasks.get_mut(&id).ok_or(BoardError::NotFound(id))?;
        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = Some(description);
        }
        if let Some(status) = data.status {
            task.status = status;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(assignee) = data.assignee {
            task.assignee = Some(assignee);
        }
        if let Some(due_date) = data.due_date {
            task.due_date = Some(due_date);
        }
        task.position = position;
        touch(task);
        Ok(task.clone())
    }

    /// Moves a task to `position` within `status`, shifting its neighbours.
    ///
    /// The target is clamped to the last valid slot of the destination
    /// column. Repeating the same call leaves the board unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for position zero and
    /// [`BoardError::NotFound`] for an unknown id.
    pub fn reposition(
        &mut self,
        id: TaskId,
        update: PositionUpdate,
    ) -> Result<Task, BoardError> {
        update.validate()?;
        let current = self.get(id)?;
        let old = current.position;
        let status = update.status;

        let target = if current.status == status {
            let target = update.position.min(self.column_len(status));
            if target > old {
                self.shift(status, |p| p > old && p <= target, Shift::Up);
            } else if target < old {
                self.shift(status, |p| p >= target && p < old, Shift::Down);
            }
            target
        } else {
            let target = update.position.min(self.column_len(status) + 1);
            self.shift(current.status, |p| p > old, Shift::Up);
            self.shift(status, |p| p >= target, Shift::Down);
            target
        };

        let task = self.tasks.get_mut(&id).ok_or(BoardError::NotFound(id))?;
        task.status = status;
        task.position = target;
        touch(task);
        tracing::debug!(task_id = %id, status = %status, position = target, "task repositioned");
        Ok(task.clone())
    }

    /// Removes a task and compacts its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, BoardError> {
        let removed = self.tasks.remove(&id).ok_or(BoardError::NotFound(id))?;
        let position = removed.position;
        self.shift(removed.status, |p| p > position, Shift::Up);
        Ok(removed)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn column_len(&self, status: TaskStatus) -> u32 {
        // Column sizes stay far below u32::MAX.
        self.tasks.values().filter(|t| t.status == status).count() as u32
    }

    fn shift(&mut self, status: TaskStatus, selects: impl Fn(u32) -> bool, direction: Shift) {
        for task in self.tasks.values_mut() {
            if task.status == status && selects(task.position) {
                match direction {
                    Shift::Up => task.position -= 1,
                    Shift::Down => task.position += 1,
                }
            }
        }
    }
}

/// Direction to move neighbouring tasks: `Up` toward position 1.
#[derive(Clone, Copy)]
enum Shift {
    Up,
    Down,
}

fn touch(task: &mut Task) {
    task.updated_at = Utc::now().max(task.updated_at);
}

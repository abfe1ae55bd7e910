//! Client-side task store: the single source of truth for the views.
//!
//! [`TaskStore`] caches the flat task list and the status-partitioned
//! projection, and is the only component that calls the repository. Every
//! write is followed by a re-read of the projection from the service; the
//! store never patches its cache locally.
//!
//! State is published through a `tokio::sync::watch` channel so the UI sees
//! each `loading` / `error` transition as it happens.

use taskboard_proto::task::{
    Task, TaskCreate, TaskId, TaskList, TaskStatus, TaskUpdate, TasksByStatus,
};
use taskboard_proto::validation::ValidationErrors;
use tokio::sync::watch;

use crate::repository::{RepositoryError, TaskRepository};

/// Snapshot of everything the views render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Every task, in the order the service returned them.
    pub tasks: Vec<Task>,
    /// Tasks grouped by column, each ordered by position.
    pub tasks_by_status: TasksByStatus,
    /// Whether a bracketed action is in flight.
    pub loading: bool,
    /// Last failure message, until cleared or replaced.
    pub error: Option<String>,
}

/// Errors returned by store actions. The same message is written to
/// [`StoreState::error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The payload failed validation; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The repository call failed.
    #[error("failed to {action}: {source}")]
    Repository {
        /// What the store was doing, e.g. `create task`.
        action: &'static str,
        /// Underlying failure.
        source: RepositoryError,
    },
}

/// State container wrapping a [`TaskRepository`].
pub struct TaskStore<R> {
    repository: R,
    state: watch::Sender<StoreState>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store with empty collections.
    pub fn new(repository: R) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { repository, state }
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Replaces the flat task list from the service.
    ///
    /// On failure the previous list is kept and `error` is set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Repository`] if the call fails.
    pub async fn fetch_tasks(&mut self) -> Result<(), StoreError> {
        self.begin();
        let result = self
            .repository
            .list()
            .await
            .map_err(|source| StoreError::Repository {
                action: "fetch tasks",
                source,
            });
        match result {
            Ok(TaskList { tasks, total }) => {
                tracing::debug!(total, "fetched tasks");
                self.state.send_modify(|s| {
                    s.tasks = tasks;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    /// Replaces the status projection from the service.
    ///
    /// On failure the previous projection is kept and `error` is set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Repository`] if the call fails.
    pub async fn fetch_tasks_by_status(&mut self) -> Result<(), StoreError> {
        self.begin();
        let result = self.refetch_projection().await;
        self.state.send_modify(|s| s.loading = false);
        result
    }

    /// Validates and creates a task, then refreshes the projection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without calling the service, or
    /// [`StoreError::Repository`] if the create call fails.
    pub async fn create_task(&mut self, data: TaskCreate) -> Result<Task, StoreError> {
        if let Err(errors) = data.validate() {
            return Err(self.fail(errors.into()));
        }
        self.begin();
        let created = self
            .repository
            .create(&data)
            .await
            .map_err(|source| StoreError::Repository {
                action: "create task",
                source,
            });
        self.finish_write(created).await
    }

    /// Validates and applies a partial update, then refreshes the projection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] without calling the service, or
    /// [`StoreError::Repository`] if the update call fails.
    pub async fn update_task(&mut self, id: TaskId, data: TaskUpdate) -> Result<Task, StoreError> {
        if let Err(errors) = data.validate() {
            return Err(self.fail(errors.into()));
        }
        self.begin();
        let updated = self
            .repository
            .update(id, &data)
            .await
            .map_err(|source| StoreError::Repository {
                action: "update task",
                source,
            });
        self.finish_write(updated).await
    }

    /// Moves a task to a 1-based `position` in `status`, then refreshes the
    /// projection. Does not touch `loading`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Repository`] if the reposition call fails.
    pub async fn update_task_position(
        &mut self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> Result<Task, StoreError> {
        let moved = self
            .repository
            .reposition(id, status, position)
            .await
            .map_err(|source| StoreError::Repository {
                action: "update task position",
                source,
            });
        match moved {
            Ok(task) => {
                tracing::debug!(task_id = %id, status = %status, position, "task repositioned");
                // A failed refetch is already recorded in `error`.
                let _ = self.refetch_projection().await;
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Deletes a task, then refreshes the projection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Repository`] if the delete call fails.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        self.begin();
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|source| StoreError::Repository {
                action: "delete task",
                source,
            });
        if let Err(e) = deleted {
            return Err(self.abort(e));
        }
        tracing::debug!(task_id = %id, "task deleted");
        let _ = self.refetch_projection().await;
        self.state.send_modify(|s| s.loading = false);
        Ok(())
    }

    /// Clears the error message and nothing else.
    pub fn clear_error(&mut self) {
        self.state.send_modify(|s| s.error = None);
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    /// Records `error` in state and hands it back.
    fn fail(&self, error: StoreError) -> StoreError {
        tracing::warn!(error = %error, "store action failed");
        let message = error.to_string();
        self.state.send_modify(|s| s.error = Some(message));
        error
    }

    /// Like [`Self::fail`], also ending the loading bracket.
    fn abort(&self, error: StoreError) -> StoreError {
        let error = self.fail(error);
        self.state.send_modify(|s| s.loading = false);
        error
    }

    async fn finish_write(
        &self,
        result: Result<Task, StoreError>,
    ) -> Result<Task, StoreError> {
        match result {
            Ok(task) => {
                let _ = self.refetch_projection().await;
                self.state.send_modify(|s| s.loading = false);
                Ok(task)
            }
            Err(e) => Err(self.abort(e)),
        }
    }

    /// Re-reads the projection without touching `loading`.
    async fn refetch_projection(&self) -> Result<(), StoreError> {
        match self.repository.list_by_status().await {
            Ok(projection) => {
                self.state.send_modify(|s| s.tasks_by_status = projection);
                Ok(())
            }
            Err(source) => {
                let error = StoreError::Repository {
                    action: "fetch tasks by status",
                    source,
                };
                let message = error.to_string();
                tracing::warn!(error = %message, "projection refetch failed");
                self.state.send_modify(|s| s.error = Some(message));
                Err(error)
            }
        }
    }
}

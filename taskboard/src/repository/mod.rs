//! Remote task repository abstraction.
//!
//! Defines the [`TaskRepository`] trait that translates task operations into
//! calls against the task service. Implementations own no task state: every
//! call is exactly one round trip, with no caching, retry or batching.
//! Concrete implementations:
//! - [`http::HttpTaskRepository`]: JSON over HTTP via `reqwest`

#[cfg(test)]
pub(crate) mod fake;
pub mod http;

use taskboard_proto::task::{
    Task, TaskCreate, TaskId, TaskList, TaskStatus, TaskUpdate, TasksByStatus,
};

/// Errors that can occur during repository calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The request never produced a response (connect failure, timeout,
    /// broken connection).
    #[error("{0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The service's error message, or the canonical status reason.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Stateless client for the task service.
///
/// # Invariant
///
/// Implementations never cache or reorder results; the caller (the task
/// store) is the only place task state lives on the client.
pub trait TaskRepository: Send + Sync {
    /// Fetch every task with the total count.
    fn list(&self) -> impl std::future::Future<Output = Result<TaskList, RepositoryError>> + Send;

    /// Fetch tasks partitioned by status, each column ordered by position.
    fn list_by_status(
        &self,
    ) -> impl std::future::Future<Output = Result<TasksByStatus, RepositoryError>> + Send;

    /// Fetch a single task.
    fn get(
        &self,
        id: TaskId,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Create a task; the service assigns id, position and timestamps.
    fn create(
        &self,
        data: &TaskCreate,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Apply a partial update.
    fn update(
        &self,
        id: TaskId,
        data: &TaskUpdate,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Move a task to a 1-based `position` within `status`.
    fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Delete a task.
    fn delete(
        &self,
        id: TaskId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

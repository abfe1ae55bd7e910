//! Store worker: wires the TUI to the async [`TaskStore`].
//!
//! The TUI loop is synchronous (crossterm poll-based). It sends
//! [`StoreCommand`]s into a bounded queue and reads the latest
//! [`StoreState`] from a `watch` receiver on each tick.
//!
//! # Architecture
//!
//! ```text
//! TUI (main task)  ─── StoreCommand ──→  worker task (owns TaskStore)
//!                  ←── StoreState (watch)
//! ```
//!
//! The worker drains the queue strictly in order and runs one store action
//! at a time, so two drags issued back to back are applied, and their
//! refetches land, in drag order.

use taskboard_proto::task::{TaskCreate, TaskId, TaskStatus, TaskUpdate};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::board::Reposition;
use crate::repository::TaskRepository;
use crate::store::{StoreState, TaskStore};

/// Default capacity of the command queue.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Intents sent from the UI to the store worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Reload the flat task list.
    FetchTasks,
    /// Reload the status projection.
    FetchTasksByStatus,
    /// Create a task.
    CreateTask(TaskCreate),
    /// Apply a partial update to a task.
    UpdateTask {
        /// Task to update.
        id: TaskId,
        /// Fields to change.
        data: TaskUpdate,
    },
    /// Move a task to a 1-based position in a column.
    UpdateTaskPosition {
        /// Task to move.
        id: TaskId,
        /// Destination column.
        status: TaskStatus,
        /// Destination position.
        position: u32,
    },
    /// Delete a task.
    DeleteTask(TaskId),
    /// Dismiss the current error.
    ClearError,
    /// Stop the worker.
    Shutdown,
}

impl From<Reposition> for StoreCommand {
    fn from(plan: Reposition) -> Self {
        Self::UpdateTaskPosition {
            id: plan.task_id,
            status: plan.status,
            position: plan.position,
        }
    }
}

/// Handles returned by [`spawn_store`].
pub struct StoreHandle {
    /// Command queue into the worker.
    pub commands: mpsc::Sender<StoreCommand>,
    /// Latest store state.
    pub state: watch::Receiver<StoreState>,
    /// The worker task; finishes after [`StoreCommand::Shutdown`] or when
    /// every sender is dropped.
    pub task: JoinHandle<()>,
}

/// Moves `store` into a background task and returns its handles.
pub fn spawn_store<R>(store: TaskStore<R>, capacity: usize) -> StoreHandle
where
    R: TaskRepository + 'static,
{
    let (commands, rx) = mpsc::channel(capacity.max(1));
    let state = store.subscribe();
    let task = tokio::spawn(command_handler(store, rx));
    StoreHandle {
        commands,
        state,
        task,
    }
}

/// Background task: run each queued command to completion before taking the
/// next one.
async fn command_handler<R: TaskRepository>(
    mut store: TaskStore<R>,
    mut rx: mpsc::Receiver<StoreCommand>,
) {
    while let Some(command) = rx.recv().await {
        tracing::debug!(?command, "store command");
        // Failures are already recorded in the store's error state.
        let _ = match command {
            StoreCommand::FetchTasks => store.fetch_tasks().await,
            StoreCommand::FetchTasksByStatus => store.fetch_tasks_by_status().await,
            StoreCommand::CreateTask(data) => store.create_task(data).await.map(|_| ()),
            StoreCommand::UpdateTask { id, data } => {
                store.update_task(id, data).await.map(|_| ())
            }
            StoreCommand::UpdateTaskPosition {
                id,
                status,
                position,
            } => store
                .update_task_position(id, status, position)
                .await
                .map(|_| ()),
            StoreCommand::DeleteTask(id) => store.delete_task(id).await,
            StoreCommand::ClearError => {
                store.clear_error();
                Ok(())
            }
            StoreCommand::Shutdown => {
                tracing::info!("store worker shutting down");
                break;
            }
        };
    }
}

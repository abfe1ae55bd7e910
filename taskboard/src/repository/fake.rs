//! In-process repository backed by the service's own [`Board`], for tests.
//!
//! Clones share state, so a test can keep a handle after moving one into a
//! store. Every call is recorded by name; `set_failing(true)` makes every
//! call fail with a network error before touching the board.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use taskboard_proto::task::{
    PositionUpdate, Task, TaskCreate, TaskId, TaskList, TaskStatus, TaskUpdate, TasksByStatus,
};
use taskboard_server::board::{Board, BoardError};

use super::{RepositoryError, TaskRepository};

#[derive(Default)]
struct Inner {
    board: Mutex<Board>,
    failing: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

#[derive(Clone, Default)]
pub struct FakeRepository {
    inner: Arc<Inner>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.inner.calls.lock().clear();
    }

    /// Creates a task directly on the board without recording a call.
    pub fn seed(&self, title: &str, status: TaskStatus) -> Task {
        self.inner
            .board
            .lock()
            .create(TaskCreate {
                status: Some(status),
                ..TaskCreate::new(title)
            })
            .unwrap()
    }

    fn record(&self, call: &'static str) -> Result<(), RepositoryError> {
        self.inner.calls.lock().push(call);
        if self.inner.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn board_error(error: BoardError) -> RepositoryError {
    match error {
        BoardError::NotFound(id) => RepositoryError::Http {
            status: 404,
            message: format!("task {id} not found"),
        },
        BoardError::Validation(errors) => RepositoryError::Http {
            status: 400,
            message: errors.to_string(),
        },
    }
}

impl TaskRepository for FakeRepository {
    async fn list(&self) -> Result<TaskList, RepositoryError> {
        self.record("list")?;
        Ok(TaskList::new(self.inner.board.lock().list()))
    }

    async fn list_by_status(&self) -> Result<TasksByStatus, RepositoryError> {
        self.record("list_by_status")?;
        Ok(self.inner.board.lock().by_status())
    }

    async fn get(&self, id: TaskId) -> Result<Task, RepositoryError> {
        self.record("get")?;
        self.inner.board.lock().get(id).map_err(board_error)
    }

    async fn create(&self, data: &TaskCreate) -> Result<Task, RepositoryError> {
        self.record("create")?;
        self.inner
            .board
            .lock()
            .create(data.clone())
            .map_err(board_error)
    }

    async fn update(&self, id: TaskId, data: &TaskUpdate) -> Result<Task, RepositoryError> {
        self.record("update")?;
        self.inner
            .board
            .lock()
            .update(id, data.clone())
            .map_err(board_error)
    }

    async fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> Result<Task, RepositoryError> {
        self.record("reposition")?;
        self.inner
            .board
            .lock()
            .reposition(id, PositionUpdate { status, position })
            .map_err(board_error)
    }

    async fn delete(&self, id: TaskId) -> Result<(), RepositoryError> {
        self.record("delete")?;
        self.inner
            .board
            .lock()
            .delete(id)
            .map(|_| ())
            .map_err(board_error)
    }
}

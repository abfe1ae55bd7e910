//! Shared task model and wire types for Taskboard.

pub mod draft;
pub mod error;
pub mod task;
pub mod validation;

pub use draft::TaskDraft;
pub use error::{ErrorBody, FieldError};
pub use task::{
    DeleteResponse, KANBAN_COLUMNS, PositionUpdate, Task, TaskCreate, TaskId, TaskList,
    TaskPriority, TaskStatus, TaskUpdate, TasksByStatus,
};
pub use validation::{ValidationError, ValidationErrors};

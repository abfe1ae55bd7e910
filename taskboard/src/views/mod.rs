//! View models derived from the store state.
//!
//! Pure functions over task snapshots: nothing here talks to the store or
//! the terminal, so every computation is testable with plain data.

pub mod dashboard;
pub mod format;
pub mod list;

pub use dashboard::DashboardSummary;
pub use list::{PageView, TaskFilter, paginate};

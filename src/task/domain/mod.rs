//! Domain model for the task board.
//!
//! The task domain models creation, editing, completion toggling, and
//! deletion of task records while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod fields;
mod task;

pub use error::TaskDomainError;
pub use fields::{TaskId, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskDraft};

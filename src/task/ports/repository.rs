//! Repository port for task persistence, lookup, and filtered listing.

use crate::task::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Completion-status filter accepted by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Only completed tasks.
    Completed,
    /// Only pending tasks.
    Pending,
}

impl StatusFilter {
    /// Parses the `filter` query parameter.
    ///
    /// Unknown values mean "no filter", matching the original view's
    /// behaviour of ignoring unrecognised filter strings.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    /// Returns the query-parameter spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    /// Returns the completion flag this filter selects.
    #[must_use]
    pub const fn completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Store-level filter predicate for listing and counting tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
    /// Completion-status restriction.
    pub status: Option<StatusFilter>,
}

impl TaskFilter {
    /// Filter matching every task.
    #[must_use]
    pub const fn unfiltered() -> Self {
        Self {
            search: None,
            status: None,
        }
    }

    /// Filter selecting tasks with the given completion flag.
    #[must_use]
    pub const fn by_status(status: StatusFilter) -> Self {
        Self {
            search: None,
            status: Some(status),
        }
    }

    /// Restricts the filter to a search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restricts the filter to a completion status.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    /// Evaluates the predicate against a task.
    ///
    /// This is the reference semantics both adapters implement: the search
    /// term matches case-insensitively against title or description, and the
    /// status restriction compares the completion flag.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status
            && task.completed() != status.completed()
        {
            return false;
        }
        match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                task.title().as_str().to_lowercase().contains(&needle)
                    || task
                        .description()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Offset/limit window applied after filtering and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Number of matching tasks to skip.
    pub offset: u64,
    /// Maximum number of tasks to return; `None` means unbounded.
    pub limit: Option<u64>,
}

impl PageBounds {
    /// Window covering every matching task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }

    /// Window for one fixed-size page.
    #[must_use]
    pub const fn page(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }
}

/// Task persistence contract.
///
/// Listing order is always newest-created-first, with the identifier as a
/// descending tie-break so same-timestamp records page deterministically.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store rejects
    /// the record.
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task (fields, completion, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns the matching tasks within the given window, newest first.
    async fn list(&self, filter: &TaskFilter, bounds: PageBounds)
    -> TaskRepositoryResult<Vec<Task>>;

    /// Counts the matching tasks.
    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

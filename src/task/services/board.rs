//! Application service backing the task board views.

use crate::task::{
    domain::{NewTask, Task, TaskDraft, TaskId},
    ports::{PageBounds, StatusFilter, TaskFilter, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Tasks shown per page of the list view.
pub const PAGE_SIZE: u64 = 6;

/// Service-level errors for task board operations.
#[derive(Debug, Clone, Error)]
pub enum TaskBoardError {
    /// The requested task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskBoardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for task board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// List-view request: raw query parameters after HTTP-level parsing.
#[derive(Debug, Clone, Default)]
pub struct BoardQuery {
    /// Search term; empty means no search.
    pub search: String,
    /// Completion-status restriction.
    pub status: Option<StatusFilter>,
    /// Requested page number; `None` when missing or not an integer.
    pub page: Option<i64>,
}

/// Notice emitted when a search was performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNotice {
    /// The search term as submitted.
    pub query: String,
    /// Number of tasks matching the term, before status filtering.
    pub matches: u64,
}

/// Aggregate counts over the whole store, independent of any filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    /// All tasks.
    pub total: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Pending tasks.
    pub pending: u64,
}

/// One rendered page of the task list.
#[derive(Debug, Clone)]
pub struct BoardPage {
    /// Tasks on this page, newest first.
    pub tasks: Vec<Task>,
    /// Resolved page number (1-based).
    pub page_number: u64,
    /// Total number of pages; at least 1 even when empty.
    pub num_pages: u64,
    /// Search notice when a search term was submitted.
    pub search_notice: Option<SearchNotice>,
    /// Store-wide aggregate counts.
    pub stats: BoardStats,
}

impl BoardPage {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.num_pages
    }
}

/// Task board orchestration service.
///
/// Holds the repository and clock as trait objects so the storage backend can
/// be selected from configuration at startup.
#[derive(Clone)]
pub struct TaskBoardService {
    repository: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TaskBoardService {
    /// Creates a new task board service.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task from a validated draft and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] when persistence fails.
    pub async fn create(&self, draft: TaskDraft) -> TaskBoardResult<Task> {
        let new_task = NewTask::from_draft(draft, &*self.clock);
        Ok(self.repository.create(new_task).await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve.
    pub async fn get(&self, id: TaskId) -> TaskBoardResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskBoardError::NotFound(id))
    }

    /// Applies edited field values to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve.
    pub async fn edit(&self, id: TaskId, draft: TaskDraft) -> TaskBoardResult<Task> {
        let mut task = self.get(id).await?;
        task.apply(draft, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Flips the completion flag of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve.
    pub async fn toggle(&self, id: TaskId) -> TaskBoardResult<Task> {
        let mut task = self.get(id).await?;
        task.toggle_completed(&*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Hard-deletes an existing task and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id does not resolve.
    pub async fn delete(&self, id: TaskId) -> TaskBoardResult<Task> {
        let task = self.get(id).await?;
        self.repository.delete(id).await?;
        Ok(task)
    }

    /// Assembles one page of the task list.
    ///
    /// Page resolution follows the original application: a missing or
    /// non-numeric page number falls back to page 1, while a numeric page
    /// outside the valid range clamps to the last page.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Repository`] when any store query fails.
    pub async fn page(&self, query: BoardQuery) -> TaskBoardResult<BoardPage> {
        let search = query.search.trim();
        let mut filter = TaskFilter::unfiltered();
        if !search.is_empty() {
            filter = filter.with_search(search);
        }

        let search_notice = if search.is_empty() {
            None
        } else {
            // Match count is taken before status filtering, as the original
            // list view reports it.
            let matches = self.repository.count(&filter).await?;
            Some(SearchNotice {
                query: search.to_owned(),
                matches,
            })
        };

        if let Some(status) = query.status {
            filter = filter.with_status(status);
        }

        let matching = self.repository.count(&filter).await?;
        let num_pages = matching.div_ceil(PAGE_SIZE).max(1);
        let page_number = match query.page {
            None => 1,
            Some(number) => match u64::try_from(number) {
                Ok(number @ 1..) if number <= num_pages => number,
                _ => num_pages,
            },
        };

        let offset = (page_number - 1) * PAGE_SIZE;
        let tasks = self
            .repository
            .list(&filter, PageBounds::page(offset, PAGE_SIZE))
            .await?;

        let stats = BoardStats {
            total: self.repository.count(&TaskFilter::unfiltered()).await?,
            completed: self
                .repository
                .count(&TaskFilter::by_status(StatusFilter::Completed))
                .await?,
            pending: self
                .repository
                .count(&TaskFilter::by_status(StatusFilter::Pending))
                .await?,
        };

        Ok(BoardPage {
            tasks,
            page_number,
            num_pages,
            search_notice,
            stats,
        })
    }
}

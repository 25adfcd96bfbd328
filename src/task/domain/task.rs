//! Task aggregate root and related lifecycle types.

use super::{TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Validated field values for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description; empty submissions are absent.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft from validated parts.
    #[must_use]
    pub const fn new(title: TaskTitle, description: Option<String>, completed: bool) -> Self {
        Self {
            title,
            description,
            completed,
        }
    }
}

/// Field values handed to the store when creating a task.
///
/// The store assigns the identifier; everything else is fixed here so both
/// repository implementations persist identical records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, equal to `created_at` at creation.
    pub updated_at: DateTime<Utc>,
}

impl NewTask {
    /// Stamps a draft with creation timestamps from the clock.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, clock: &dyn Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the human-readable status string for display.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }

    /// Applies edited field values and refreshes `updated_at`.
    pub fn apply(&mut self, draft: TaskDraft, clock: &dyn Clock) {
        self.title = draft.title;
        self.description = draft.description;
        self.completed = draft.completed;
        self.touch(clock);
    }

    /// Flips the completion flag and refreshes `updated_at`.
    ///
    /// Applying this twice restores the original flag; the timestamp moves
    /// forward on every application.
    pub fn toggle_completed(&mut self, clock: &dyn Clock) {
        self.completed = !self.completed;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.utc();
    }
}

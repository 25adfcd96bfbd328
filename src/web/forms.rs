//! Task form parsing and validation.
//!
//! The add and edit views share one form. Validation delegates the title
//! rules to the domain type and reports failures as field-level messages for
//! inline redisplay; a validation failure is never a server error.

use crate::task::domain::{Task, TaskDraft, TaskTitle};
use serde::{Deserialize, Serialize};

/// Raw submission of the task form.
///
/// Every field is defaulted so partial submissions decode rather than
/// failing at the extractor; `completed` follows the HTML checkbox
/// convention of being present only when ticked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFormData {
    /// Submitted title, untrimmed.
    #[serde(default)]
    pub title: String,
    /// Submitted description, untrimmed.
    #[serde(default)]
    pub description: String,
    /// Checkbox value; any present value means ticked.
    #[serde(default)]
    pub completed: Option<String>,
}

impl TaskFormData {
    /// Pre-populates the form from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
            completed: task.completed().then(|| "on".to_owned()),
        }
    }

    /// Whether the completed checkbox was ticked.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    /// Validates the submission into a domain draft.
    ///
    /// # Errors
    ///
    /// Returns the field-level error messages when validation fails.
    pub fn validate(&self) -> Result<TaskDraft, FormErrors> {
        let mut errors = FormErrors::default();
        let title = match TaskTitle::new(&self.title) {
            Ok(title) => Some(title),
            Err(err) => {
                errors.title.push(err.to_string());
                None
            }
        };

        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_owned());

        match title {
            Some(title) if errors.is_empty() => {
                Ok(TaskDraft::new(title, description, self.is_completed()))
            }
            _ => Err(errors),
        }
    }
}

/// Field-level validation messages for redisplay.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FormErrors {
    /// Messages attached to the title field.
    pub title: Vec<String>,
}

impl FormErrors {
    /// Whether no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }
}

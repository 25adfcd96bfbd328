//! In-memory task repository for tests and the default backend.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId},
    ports::{PageBounds, TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository with sequential id assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl InMemoryTaskState {
    fn assign_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(self.next_id)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Orders tasks newest-created-first, id descending on timestamp ties.
fn ordered_matches(state: &InMemoryTaskState, filter: &TaskFilter) -> Vec<Task> {
    let mut matches: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();
    matches.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    matches
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let id = state.assign_id();
        let task = Task::from_persisted(PersistedTaskData {
            id,
            title: new_task.title,
            description: new_task.description,
            completed: new_task.completed,
            created_at: new_task.created_at,
            updated_at: new_task.updated_at,
        });
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        bounds: PageBounds,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let matches = ordered_matches(&state, filter);
        let offset = usize::try_from(bounds.offset).unwrap_or(usize::MAX);
        let window = matches.into_iter().skip(offset);
        let page = match bounds.limit {
            Some(limit) => window
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => window.collect(),
        };
        Ok(page)
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let count = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

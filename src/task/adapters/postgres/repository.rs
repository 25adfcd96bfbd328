//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskDomainError, TaskId, TaskTitle},
    ports::{PageBounds, TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pooled repository from a database URL.
    ///
    /// # Errors
    ///
    /// Returns the pool construction error when the URL is malformed or the
    /// initial connections cannot be established.
    pub fn connect(database_url: &str) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, new_task: NewTask) -> TaskRepositoryResult<Task> {
        let new_row = NewTaskRow {
            title: new_task.title.as_str().to_owned(),
            description: new_task.description,
            completed: new_task.completed,
            created_at: new_task.created_at,
            updated_at: new_task.updated_at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: Some(task.description().map(ToOwned::to_owned)),
            completed: task.completed(),
            updated_at: task.updated_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list(
        &self,
        filter: &TaskFilter,
        bounds: PageBounds,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let list_filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = filtered(&list_filter)
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .offset(i64::try_from(bounds.offset).unwrap_or(i64::MAX));
            if let Some(limit) = bounds.limit {
                query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
            }
            let rows = query
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let count_filter = filter.clone();
        self.run_blocking(move |connection| {
            let total = filtered(&count_filter)
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(u64::try_from(total).unwrap_or_default())
        })
        .await
    }
}

type BoxedTasksQuery<'a> = tasks::BoxedQuery<'a, diesel::pg::Pg>;

fn filtered(filter: &TaskFilter) -> BoxedTasksQuery<'static> {
    let mut query = tasks::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(tasks::completed.eq(status.completed()));
    }
    if let Some(term) = filter.search.as_deref().filter(|term| !term.is_empty()) {
        let pattern = like_pattern(term);
        query = query.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }
    query
}

/// Builds a substring `ILIKE` pattern, escaping the wildcard metacharacters.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        completed,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(title).map_err(persisted_title_error)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        completed,
        created_at,
        updated_at,
    }))
}

fn persisted_title_error(err: TaskDomainError) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        err.to_string(),
    ))
}

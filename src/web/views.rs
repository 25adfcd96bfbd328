//! View handlers for the five task board operations.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::Deserialize;
use serde::Serialize;

use super::error::PageError;
use super::flash::{self, Flash};
use super::forms::{FormErrors, TaskFormData};
use super::state::AppState;
use crate::task::domain::{Task, TaskId};
use crate::task::ports::StatusFilter;
use crate::task::services::BoardQuery;

/// Query parameters accepted by the list view.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Search term.
    #[serde(default)]
    pub search: String,
    /// Status filter: `completed`, `pending`, or anything else for "all".
    #[serde(default)]
    pub filter: String,
    /// Requested page number, as submitted.
    #[serde(default)]
    pub page: Option<String>,
}

/// Template projection of a task.
#[derive(Debug, Serialize)]
struct TaskView {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    status: &'static str,
    created_at: String,
    updated_at: String,
}

impl TaskView {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            completed: task.completed(),
            status: task.status_label(),
            created_at: task.created_at().format("%Y-%m-%d %H:%M").to_string(),
            updated_at: task.updated_at().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// `GET /` — searched, filtered, paginated task list.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let (jar, mut messages) = flash::take(jar);
    let status = StatusFilter::parse(&params.filter);
    let page = params
        .page
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    let board = state
        .service
        .page(BoardQuery {
            search: params.search.clone(),
            status,
            page,
        })
        .await?;

    if let Some(notice) = &board.search_notice {
        messages.push(Flash::info(format!(
            "Found {} task(s) matching \"{}\"",
            notice.matches, notice.query
        )));
    }

    let tasks: Vec<TaskView> = board.tasks.iter().map(TaskView::from_task).collect();
    let html = state.templates.render(
        "task_list.html",
        context! {
            messages,
            tasks,
            search => params.search,
            filter => status.map_or("", |status| status.as_str()),
            stats => context! {
                total => board.stats.total,
                completed => board.stats.completed,
                pending => board.stats.pending,
            },
            page_number => board.page_number,
            num_pages => board.num_pages,
            has_previous => board.has_previous(),
            has_next => board.has_next(),
            page_query => page_query_prefix(&params.search, status),
        },
    )?;
    Ok((jar, Html(html)))
}

/// Encoded `search`/`filter` pairs for pagination links, with a trailing
/// `&` so `page=N` can be appended directly.
fn page_query_prefix(search: &str, status: Option<StatusFilter>) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    if !search.is_empty() {
        pairs.push(("search", search));
    }
    if let Some(status) = status {
        pairs.push(("filter", status.as_str()));
    }
    let mut prefix = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    if !prefix.is_empty() {
        prefix.push('&');
    }
    prefix
}

/// `GET /add/` — empty task form.
pub async fn add_task_form(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    render_task_form(
        &state,
        "Add",
        "/add/",
        &TaskFormData::default(),
        &FormErrors::default(),
        &[],
    )
}

/// `POST /add/` — create a task or redisplay the form with errors.
pub async fn add_task_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(data): axum::Form<TaskFormData>,
) -> Result<Response, PageError> {
    match data.validate() {
        Ok(draft) => {
            let task = state.service.create(draft).await?;
            tracing::info!(id = %task.id(), "task created");
            let jar = flash::set(
                jar,
                &Flash::success(format!("Task \"{}\" added successfully!", task.title())),
            );
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(errors) => {
            let messages = [Flash::error("Please correct the errors below.")];
            let html = render_task_form(&state, "Add", "/add/", &data, &errors, &messages)?;
            Ok(html.into_response())
        }
    }
}

/// `GET /edit/{id}/` — form pre-populated from the task; 404 if unknown.
pub async fn edit_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let task = state.service.get(TaskId::new(id)).await?;
    render_task_form(
        &state,
        "Edit",
        &format!("/edit/{id}/"),
        &TaskFormData::from_task(&task),
        &FormErrors::default(),
        &[],
    )
}

/// `POST /edit/{id}/` — apply edits or redisplay the form with errors.
pub async fn edit_task_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
    axum::Form(data): axum::Form<TaskFormData>,
) -> Result<Response, PageError> {
    match data.validate() {
        Ok(draft) => {
            let task = state.service.edit(TaskId::new(id), draft).await?;
            tracing::info!(id = %task.id(), "task updated");
            let jar = flash::set(
                jar,
                &Flash::success(format!("Task \"{}\" updated successfully!", task.title())),
            );
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(errors) => {
            // Redisplay only for tasks that exist; unknown ids still 404.
            state.service.get(TaskId::new(id)).await?;
            let messages = [Flash::error("Please correct the errors below.")];
            let html = render_task_form(
                &state,
                "Edit",
                &format!("/edit/{id}/"),
                &data,
                &errors,
                &messages,
            )?;
            Ok(html.into_response())
        }
    }
}

/// `GET /delete/{id}/` — confirmation prompt; 404 if unknown.
pub async fn delete_task_confirm(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let task = state.service.get(TaskId::new(id)).await?;
    let html = state.templates.render(
        "confirm_delete.html",
        context! {
            messages => Vec::<Flash>::new(),
            task => TaskView::from_task(&task),
        },
    )?;
    Ok(Html(html))
}

/// `POST /delete/{id}/` — hard-delete and redirect to the list.
pub async fn delete_task_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let task = state.service.delete(TaskId::new(id)).await?;
    tracing::info!(id = %task.id(), "task deleted");
    let jar = flash::set(
        jar,
        &Flash::success(format!("Task \"{}\" deleted successfully!", task.title())),
    );
    Ok((jar, Redirect::to("/")).into_response())
}

/// `GET /toggle/{id}/` — flip completion and redirect to the list.
///
/// A mutating action on a read verb, preserved from the original
/// application's behaviour.
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let task = state.service.toggle(TaskId::new(id)).await?;
    let status = if task.completed() {
        "completed"
    } else {
        "marked as pending"
    };
    let jar = flash::set(
        jar,
        &Flash::success(format!("Task \"{}\" {status}!", task.title())),
    );
    Ok((jar, Redirect::to("/")).into_response())
}

fn render_task_form(
    state: &AppState,
    action: &str,
    form_action: &str,
    data: &TaskFormData,
    errors: &FormErrors,
    messages: &[Flash],
) -> Result<Html<String>, PageError> {
    let html = state.templates.render(
        "task_form.html",
        context! {
            messages,
            action,
            form_action,
            form => context! {
                title => &data.title,
                description => &data.description,
                completed => data.is_completed(),
            },
            errors,
        },
    )?;
    Ok(Html(html))
}

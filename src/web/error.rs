//! Page-level error handling for the view layer.
//!
//! Unknown ids render a plain 404 page; anything else renders a diagnostic
//! 500 page carrying the error message and its source chain. Exposing the
//! raw error text is intentional for this development tool and is relied on
//! by the serverless boundary as well.

use crate::task::services::TaskBoardError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the view handlers.
#[derive(Debug, Error)]
pub enum PageError {
    /// The requested task does not exist.
    #[error("not found")]
    NotFound,

    /// A store operation failed.
    #[error(transparent)]
    Service(TaskBoardError),

    /// Template rendering failed.
    #[error("template rendering failed")]
    Render(#[from] minijinja::Error),
}

impl From<TaskBoardError> for PageError {
    fn from(err: TaskBoardError) -> Self {
        match err {
            TaskBoardError::NotFound(_) => Self::NotFound,
            other @ TaskBoardError::Repository(_) => Self::Service(other),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Html(not_found_page())).into_response()
            }
            other => {
                tracing::error!(error = %other, "request processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(diagnostic_page("Request Error", &other)),
                )
                    .into_response()
            }
        }
    }
}

fn not_found_page() -> String {
    concat!(
        "<html><head><title>Not Found</title></head><body>",
        "<h1>Not Found</h1>",
        "<p>The requested task does not exist.</p>",
        "<p><a href=\"/\">Back to the task list</a></p>",
        "</body></html>",
    )
    .to_owned()
}

/// Renders a standalone diagnostic page for an error.
///
/// Built with plain string formatting so it stays available when the
/// template environment itself failed to initialize.
#[must_use]
pub fn diagnostic_page(title: &str, error: &(dyn std::error::Error + 'static)) -> String {
    format!(
        concat!(
            "<html><head><title>{title}</title></head><body>",
            "<h1>{title}</h1>",
            "<p><strong>Error:</strong> {message}</p>",
            "<h2>Error Chain:</h2>",
            "<pre>{chain}</pre>",
            "</body></html>",
        ),
        title = html_escape(title),
        message = html_escape(&error.to_string()),
        chain = html_escape(&error_chain(error)),
    )
}

/// Formats an error and its sources, one per line, outermost first.
#[must_use]
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut lines = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    lines.join("\n")
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

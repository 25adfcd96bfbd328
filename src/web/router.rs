//! Static route table for the task board.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::views;

/// Builds the five-route task board router.
///
/// Paths keep their trailing slashes; a request without one is a distinct,
/// unmatched path rather than a redirect.
#[must_use]
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(views::list_tasks))
        .route(
            "/add/",
            get(views::add_task_form).post(views::add_task_submit),
        )
        .route(
            "/edit/{id}/",
            get(views::edit_task_form).post(views::edit_task_submit),
        )
        .route(
            "/delete/{id}/",
            get(views::delete_task_confirm).post(views::delete_task_submit),
        )
        .route("/toggle/{id}/", get(views::toggle_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

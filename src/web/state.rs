//! Shared state handed to every view handler.

use std::sync::Arc;

use super::templates::TemplateEngine;
use crate::task::services::TaskBoardService;

/// Application state cloned into each request.
#[derive(Clone)]
pub struct AppState {
    /// Task board use cases.
    pub service: TaskBoardService,
    /// Compiled page templates.
    pub templates: Arc<TemplateEngine>,
}

impl AppState {
    /// Bundles the service and template engine.
    #[must_use]
    pub const fn new(service: TaskBoardService, templates: Arc<TemplateEngine>) -> Self {
        Self {
            service,
            templates,
        }
    }
}

//! Server-rendered web frontend for the task board.
//!
//! Views consume the task board service and render HTML pages; mutations
//! follow the post/redirect/get cycle with a one-shot flash cookie.

pub mod error;
pub mod flash;
pub mod forms;
pub mod router;
pub mod state;
pub mod templates;
pub mod views;

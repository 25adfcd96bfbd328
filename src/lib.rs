//! Taskboard: a server-rendered task tracking application.
//!
//! A single `Task` entity with list, add, edit, delete, and toggle views,
//! deployable as a native HTTP server or behind a serverless invocation
//! envelope.
//!
//! # Architecture
//!
//! The task module follows hexagonal architecture principles:
//!
//! - **Domain**: Task entity, validated fields, and timestamp rules
//! - **Ports**: The `TaskRepository` trait and its filter types
//! - **Adapters**: In-memory and Diesel/`PostgreSQL` repositories
//!
//! # Modules
//!
//! - [`task`]: Task entity, storage ports and adapters, board service
//! - [`web`]: Router, view handlers, templates, and flash messaging
//! - [`serverless`]: Invocation envelope to HTTP translation
//! - [`config`]: Environment-driven configuration
//! - [`app`]: Application assembly shared by both entry points

pub mod app;
pub mod config;
pub mod serverless;
pub mod task;
pub mod web;

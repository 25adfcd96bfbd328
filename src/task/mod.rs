//! Task management for the task board.
//!
//! This module implements the single-entity data model and its use cases:
//! creating task records from validated form input, editing, toggling
//! completion, deleting, and assembling searched/filtered/paged listings.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

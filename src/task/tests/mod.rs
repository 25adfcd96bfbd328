//! Unit and service tests for the task module.

mod domain_tests;
mod pagination_tests;
mod service_tests;
mod support;

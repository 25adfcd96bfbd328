//! Serverless entry point: invocation envelope in, response envelope out.

pub mod adapter;
pub mod event;

pub use adapter::{
    AdapterError, ServerlessApp, canonical_request, envelope_from_response, handle, shared,
};
pub use event::{InvocationEvent, ResponseEnvelope};

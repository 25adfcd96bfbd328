//! Translation between the invocation envelope and canonical HTTP.
//!
//! One adapter handles both directions: an [`InvocationEvent`] becomes an
//! `http` request dispatched through the router, and the resulting response
//! is flattened back into a [`ResponseEnvelope`]. Failures at either edge,
//! and a failed one-time application build, are answered with a diagnostic
//! 500 envelope rather than surfaced to the host.

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::header::{HeaderName, HeaderValue, HOST};
use axum::http::{Method, Request, Response, Uri};
use thiserror::Error;
use tower::ServiceExt;

use super::event::{InvocationEvent, ResponseEnvelope};
use crate::app::{self, InitError};
use crate::web::error::diagnostic_page;

/// Errors raised while translating an invocation to or from HTTP.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The event's method is not a valid HTTP method.
    #[error("invalid HTTP method '{0}'")]
    Method(String),

    /// The derived request URI is malformed.
    #[error("invalid request URI '{0}'")]
    Uri(String),

    /// A header name or value is outside the HTTP grammar.
    #[error("invalid header '{0}'")]
    Header(String),

    /// The response body stream failed.
    #[error("failed to read response body")]
    ResponseBody(#[from] axum::Error),
}

/// Normalizes an invocation event into a canonical HTTP request.
///
/// Defaults applied: method `GET`, path `/` (prefixed with `/` when the
/// event omits it), empty query, empty body. The URI scheme is `https` when
/// the `x-forwarded-proto` header says so, else `http`; the authority comes
/// from the `Host` header (default `localhost`) with the port derived by
/// splitting on `:`, defaulting to 443 for https and 80 otherwise.
///
/// # Errors
///
/// Returns [`AdapterError`] when the method, URI, or a header cannot be
/// expressed in the HTTP types.
pub fn canonical_request(event: &InvocationEvent) -> Result<Request<Body>, AdapterError> {
    let method = match event.method.as_deref() {
        None => Method::GET,
        Some(raw) => Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| AdapterError::Method(raw.to_owned()))?,
    };

    let (url_path, url_query) = match event.url.as_deref() {
        None => (None, None),
        Some(url) => match url.split_once('?') {
            None => (Some(url), None),
            Some((path, query)) => (Some(path), Some(query)),
        },
    };

    let path = event.path.as_deref().or(url_path).unwrap_or("/");
    let path = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    let query = event.query_string.as_deref().or(url_query).unwrap_or("");

    let scheme = if header_value(event, "x-forwarded-proto") == Some("https") {
        "https"
    } else {
        "http"
    };
    let host = header_value(event, "host").unwrap_or("localhost");
    let (server_name, port) = match host.split_once(':') {
        Some((name, port)) => (name, port.to_owned()),
        None => (host, default_port(scheme).to_owned()),
    };

    let uri = if query.is_empty() {
        format!("{scheme}://{server_name}:{port}{path}")
    } else {
        format!("{scheme}://{server_name}:{port}{path}?{query}")
    };
    let uri: Uri = uri.parse().map_err(|_| AdapterError::Uri(uri))?;

    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(event.body.clone().unwrap_or_default()))
        .map_err(|err| AdapterError::Uri(err.to_string()))?;

    let headers = request.headers_mut();
    for (name, value) in &event.headers {
        let name = HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes())
            .map_err(|_| AdapterError::Header(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| AdapterError::Header(value.clone()))?;
        headers.insert(name, value);
    }
    if !headers.contains_key(HOST) {
        headers.insert(
            HOST,
            HeaderValue::from_str(host).map_err(|_| AdapterError::Header(host.to_owned()))?,
        );
    }

    Ok(request)
}

/// Default port for the detected scheme.
fn default_port(scheme: &str) -> &'static str {
    if scheme == "https" { "443" } else { "80" }
}

/// Case-insensitive lookup in the event's header map.
fn header_value<'a>(event: &'a InvocationEvent, name: &str) -> Option<&'a str> {
    event
        .headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Flattens a canonical HTTP response into the host envelope.
///
/// # Errors
///
/// Returns [`AdapterError::ResponseBody`] when collecting the body fails.
pub async fn envelope_from_response(
    response: Response<Body>,
) -> Result<ResponseEnvelope, AdapterError> {
    let status_code = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_ascii_lowercase(), value.to_owned()))
        })
        .collect();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(ResponseEnvelope {
        status_code,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// The application behind the serverless boundary.
///
/// Holds the one-time build result. A failed build is kept and replayed as
/// the same diagnostic 500 on every invocation instead of being retried.
pub struct ServerlessApp {
    init: Result<Router, InitError>,
}

impl ServerlessApp {
    /// Builds the application from the process environment, capturing any
    /// failure for replay.
    #[must_use]
    pub fn initialize() -> Self {
        Self::from_init(app::build_from_env())
    }

    /// Wraps an already-computed build result.
    #[must_use]
    pub const fn from_init(init: Result<Router, InitError>) -> Self {
        Self { init }
    }

    /// Answers one invocation.
    ///
    /// Never fails: initialization and translation errors become diagnostic
    /// 500 envelopes.
    pub async fn handle(&self, event: &InvocationEvent) -> ResponseEnvelope {
        match &self.init {
            Err(err) => error_envelope("Initialization Error", err),
            Ok(router) => match dispatch(router.clone(), event).await {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::error!(error = %err, "invocation failed");
                    error_envelope("Request Error", &err)
                }
            },
        }
    }
}

async fn dispatch(router: Router, event: &InvocationEvent) -> Result<ResponseEnvelope, AdapterError> {
    let request = canonical_request(event)?;
    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    envelope_from_response(response).await
}

fn error_envelope(title: &str, err: &(dyn std::error::Error + 'static)) -> ResponseEnvelope {
    let mut headers = std::collections::BTreeMap::new();
    headers.insert(
        "content-type".to_owned(),
        "text/html; charset=utf-8".to_owned(),
    );
    ResponseEnvelope {
        status_code: 500,
        headers,
        body: diagnostic_page(title, err),
    }
}

static SHARED: OnceLock<ServerlessApp> = OnceLock::new();

/// Returns the process-wide application, building it on first use.
pub fn shared() -> &'static ServerlessApp {
    SHARED.get_or_init(ServerlessApp::initialize)
}

/// Handles one invocation against the process-wide application.
pub async fn handle(event: &InvocationEvent) -> ResponseEnvelope {
    shared().handle(event).await
}

//! Wire types for the serverless invocation boundary.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Inbound function invocation, deserialized from the host's event payload.
///
/// Every field is defaulted so a sparse event still normalizes to a request,
/// falling back to `GET /` with no query, headers, or body. `path` and
/// `query_string` may instead be supplied through `url`, which is split on
/// the first `?` when the dedicated fields are absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InvocationEvent {
    /// HTTP method; `GET` when absent.
    pub method: Option<String>,
    /// Request path; derived from `url`, else `/`, when absent.
    #[serde(alias = "rawPath")]
    pub path: Option<String>,
    /// Full request URL, used as a fallback source for path and query.
    pub url: Option<String>,
    /// Raw query string without the leading `?`.
    #[serde(alias = "queryString", alias = "rawQuery")]
    pub query_string: Option<String>,
    /// Request headers as a name to value map.
    pub headers: HashMap<String, String>,
    /// Request body as text, encoded to bytes as UTF-8.
    pub body: Option<String>,
}

/// Outbound response in the shape the host platform expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Response headers, names lowercased; duplicate names collapse to the
    /// last value since the envelope cannot represent repeats.
    pub headers: BTreeMap<String, String>,
    /// Response body, decoded as UTF-8 with invalid sequences replaced.
    pub body: String,
}

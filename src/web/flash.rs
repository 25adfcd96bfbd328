//! One-shot notification messages carried across the post/redirect/get cycle.
//!
//! A mutating view stores a message in a cookie alongside its redirect; the
//! list view reads and clears it on the next request. The cookie value is
//! form-encoded so arbitrary message text stays within the cookie grammar.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

/// Cookie name holding the pending flash message.
pub const FLASH_COOKIE: &str = "taskboard_flash";

/// Severity of a flash message; also the CSS class suffix used to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    /// A completed operation.
    Success,
    /// A neutral notice.
    Info,
    /// A recoverable problem the caller should fix.
    Error,
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Message severity.
    pub level: FlashLevel,
    /// Message text.
    pub text: String,
}

impl Flash {
    /// Creates a success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    /// Creates an informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            text: text.into(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

/// Stores a flash message in the jar, replacing any pending one.
#[must_use]
pub fn set(jar: CookieJar, flash: &Flash) -> CookieJar {
    match serde_urlencoded::to_string(flash) {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .build(),
        ),
        // Encoding a level + string pair cannot fail; drop the message
        // rather than the response if it ever does.
        Err(_) => jar,
    }
}

/// Removes and returns the pending flash message, if any.
#[must_use]
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let pending: Vec<Flash> = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| serde_urlencoded::from_str::<Flash>(cookie.value()).ok())
        .into_iter()
        .collect();
    if pending.is_empty() {
        return (jar, pending);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, pending)
}

#[cfg(test)]
mod tests {
    //! Round-trip tests for the cookie encoding.

    use super::{FLASH_COOKIE, Flash, set, take};
    use axum_extra::extract::cookie::CookieJar;

    #[test]
    fn set_then_take_round_trips_message_text() {
        let flash = Flash::success("Task \"Buy milk & eggs\" added successfully!");
        let jar = set(CookieJar::new(), &flash);
        let value = jar
            .get(FLASH_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .unwrap_or_default();

        // Simulate the next request carrying the cookie back.
        let next = CookieJar::new().add(axum_extra::extract::cookie::Cookie::new(
            FLASH_COOKIE,
            value,
        ));
        let (_, pending) = take(next);
        assert_eq!(pending, vec![flash]);
    }

    #[test]
    fn take_without_cookie_yields_nothing() {
        let (_, pending) = take(CookieJar::new());
        assert!(pending.is_empty());
    }
}

//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, timeouts, HTTP errors, and application-level rejections
//! (`success: false`, non-200 `code`) all surface as [`ApiError`]. Components
//! show [`ApiError::user_message`] in a notice and roll back any optimistic
//! change; none of these are fatal to the session.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure of a single backend operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network unreachable, CORS, abort).
    #[error("network error: {0}")]
    Transport(String),

    /// No response arrived within the configured request timeout.
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },

    /// The server answered with a non-success HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The server answered OK but reported failure in the body.
    #[error("{0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Called outside the browser, where no backend calls are made.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a status error, extracting the server's message from `body`.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| status_failed_message(status));
        Self::Status { status, message }
    }

    /// Human-readable text for notices.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the session has expired or the user is not signed in.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// Looks at `message` first, then `msg`, then `error`.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

fn status_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

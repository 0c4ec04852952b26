//! Unified error handling for the console.
//!
//! Errors never escape to the caller as a crash: every failed operation is
//! turned into an inline [`ErrorBanner`] with a user-facing message, and the
//! originating error is logged.

use atrium_core::EmailError;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by REST collaborators.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status}")]
    Api { status: u16, body: String },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found")]
    NotFound { body: String },

    /// Missing or rejected credentials.
    #[error("Unauthorized")]
    Unauthorized { status: u16, body: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } | Self::Unauthorized { status, .. } => Some(*status),
            Self::RateLimited(_) => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Parse(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// The human-readable message the backend put in its error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Api { body, .. } | Self::NotFound { body } | Self::Unauthorized { body, .. } => {
                extract_message(body)
            }
            _ => None,
        }
    }
}

/// Pull a message out of a JSON error body.
///
/// Looks at `message`, `error.message`, `error` (when a string), and
/// `detail`, in that order. Blank strings are skipped.
#[must_use]
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.get("message"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("error"),
        value.get("detail"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Local form validation failures. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a whole number")]
    NotAnInteger(&'static str),

    #[error("{0} must be a valid amount")]
    NotAnAmount(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("You do not have permission to edit this record")]
    Forbidden,
}

/// Any failure the console surfaces to a user.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Whether the error came from the backend rather than local checks.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

/// The message to show a user.
///
/// Prefers the backend's structured message, then the error's own message,
/// then `fallback`.
#[must_use]
pub fn user_message(err: &ConsoleError, fallback: &str) -> String {
    if let ConsoleError::Api(api) = err
        && let Some(message) = api.server_message()
    {
        return message;
    }
    let native = err.to_string();
    if native.trim().is_empty() {
        fallback.to_string()
    } else {
        native
    }
}

/// Log an error and capture it to Sentry. Validation errors are only logged.
pub fn report(err: &ConsoleError, context: &str) {
    if err.is_remote() {
        let event_id = sentry::capture_error(err);
        tracing::error!(
            error = %err,
            sentry_event_id = %event_id,
            context,
            "Collaborator call failed"
        );
    } else {
        tracing::debug!(error = %err, context, "Rejected locally");
    }
}

/// Log a failure that only removes part of a result.
pub fn report_partial(err: &ApiError, context: &str) {
    tracing::warn!(error = %err, context, "Partial result: collaborator failed");
}

/// Inline, dismissible error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
}

impl ErrorBanner {
    /// Report `err` and build the banner shown for it.
    #[must_use]
    pub fn from_error(err: &ConsoleError, fallback: &str) -> Self {
        report(err, fallback);
        Self {
            message: user_message(err, fallback),
        }
    }
}

impl std::fmt::Display for ErrorBanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, body: &str) -> ConsoleError {
        ConsoleError::Api(ApiError::Api {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_extract_message_priority() {
        assert_eq!(
            extract_message(r#"{"message":"Email taken","error":"conflict"}"#).as_deref(),
            Some("Email taken")
        );
        assert_eq!(
            extract_message(r#"{"error":{"message":"Bad progress"}}"#).as_deref(),
            Some("Bad progress")
        );
        assert_eq!(
            extract_message(r#"{"error":"Project not found","code":"NOT_FOUND"}"#).as_deref(),
            Some("Project not found")
        );
        assert_eq!(
            extract_message(r#"{"detail":"Token expired"}"#).as_deref(),
            Some("Token expired")
        );
    }

    #[test]
    fn test_extract_message_ignores_blank_and_non_json() {
        assert_eq!(extract_message(r#"{"message":"  ","detail":"x"}"#).as_deref(), Some("x"));
        assert_eq!(extract_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = api(422, r#"{"message":"Title already used"}"#);
        assert_eq!(user_message(&err, "Failed to save project"), "Title already used");
    }

    #[test]
    fn test_user_message_falls_back_to_native() {
        let err = api(500, "<html>oops</html>");
        assert_eq!(user_message(&err, "Failed to save project"), "API error: 500");

        let err = ConsoleError::Validation(ValidationError::Required("Title"));
        assert_eq!(user_message(&err, "Failed to save project"), "Title is required");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound {
                body: String::new()
            }
            .status(),
            Some(404)
        );
        assert_eq!(ApiError::RateLimited(5).status(), Some(429));
        assert_eq!(ApiError::Parse("bad".to_string()).status(), None);
    }

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::OutOfRange {
            field: "Progress",
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "Progress must be between 0 and 100");
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_banner_uses_user_message() {
        let banner = ErrorBanner::from_error(&api(404, r#"{"error":"gone"}"#), "Failed");
        assert_eq!(banner.to_string(), "gone");
    }
}

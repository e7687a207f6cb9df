//! HTTP client error types and backend error-payload normalization.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
///
/// `Display` is the single human-readable message callers surface.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// No response arrived (connection refused, DNS, timeout).
    /// The inner detail is for logs only.
    #[error("{}", status_message(None))]
    Unreachable(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a successful response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl FetchError {
    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an HTTP error from a status code and raw error body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        FetchError::Http {
            status,
            message: error_message(Some(status), body),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::Build(e.to_string())
        } else {
            FetchError::Unreachable(e.to_string())
        }
    }
}

/// Extract a message from a backend error body.
///
/// Precedence: `detail`, then `message`, then `error`. Blank or
/// non-string values are skipped. With nothing usable the message is
/// synthesized from the status.
pub fn error_message(status: Option<u16>, body: &[u8]) -> String {
    let payload: Option<Value> = serde_json::from_slice(body).ok();

    payload
        .as_ref()
        .and_then(|payload| {
            ["detail", "message", "error"].iter().find_map(|key| {
                payload
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
        })
        .map(str::to_string)
        .unwrap_or_else(|| status_message(status))
}

/// Synthesized message when the payload carries none.
pub fn status_message(status: Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP error! status: {}", code),
        None => "HTTP error! status: unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins() {
        let body = br#"{"detail": "Not found.", "message": "other", "error": "x"}"#;
        assert_eq!(error_message(Some(404), body), "Not found.");
    }

    #[test]
    fn test_message_then_error() {
        assert_eq!(
            error_message(Some(400), br#"{"message": "Bad price", "error": "x"}"#),
            "Bad price"
        );
        assert_eq!(error_message(Some(400), br#"{"error": "boom"}"#), "boom");
    }

    #[test]
    fn test_empty_payload_synthesizes_status() {
        assert_eq!(error_message(Some(500), b"{}"), "HTTP error! status: 500");
        assert_eq!(error_message(Some(502), b"<html>bad gateway</html>"), "HTTP error! status: 502");
    }

    #[test]
    fn test_blank_and_non_string_fields_are_skipped() {
        let body = br#"{"detail": "", "message": ["a"], "error": "fallback"}"#;
        assert_eq!(error_message(Some(400), body), "fallback");
    }

    #[test]
    fn test_unreachable_reports_unknown_status() {
        let err = FetchError::Unreachable("connection refused".to_string());
        assert_eq!(err.to_string(), "HTTP error! status: unknown");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_response() {
        let err = FetchError::from_response(500, b"");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }
}

//! HTTP response handling.

use crate::error::FetchError;
use serde::de::DeserializeOwned;

/// An HTTP response, fully buffered.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, normalizing the error payload of non-2xx
    /// responses into a single message.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::from_response(self.status, &self.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Count {
            count: u64,
        }

        let resp = make_response(200, br#"{"count": 45}"#);
        assert_eq!(resp.json::<Count>().unwrap(), Count { count: 45 });
        assert!(make_response(200, b"nope").json::<Count>().is_err());
    }

    #[test]
    fn test_error_for_status_extracts_detail() {
        let err = make_response(404, br#"{"detail": "Not found."}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.to_string(), "Not found.");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_error_for_status_success_passes_through() {
        assert!(make_response(201, b"{}").error_for_status().is_ok());
    }
}

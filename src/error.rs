//! Errors raised while talking to the transactions API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `body` is the server's message.
    #[error("{body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a status error, unwrapping FastAPI-style `{"detail": "..."}` bodies.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
        let body = match detail {
            Some(detail) => detail,
            None if body.trim().is_empty() => format!("HTTP {}", status),
            None => body.to_string(),
        };
        ApiError::Status { status, body }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_unwraps_detail() {
        let err = ApiError::from_status(400, r#"{"detail":"Only pending transactions can be cleared"}"#);
        assert_eq!(err.to_string(), "Only pending transactions can be cleared");
    }

    #[test]
    fn test_from_status_keeps_plain_text() {
        let err = ApiError::from_status(502, "bad gateway");
        assert_eq!(err.to_string(), "bad gateway");
    }

    #[test]
    fn test_from_status_empty_body() {
        let err = ApiError::from_status(500, "  ");
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}

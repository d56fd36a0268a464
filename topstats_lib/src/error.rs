//! Error types for the topstats.gg API client.

use serde_json::Value;
use thiserror::Error;

/// Base error type for topstats.gg operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable client configuration (empty token, bad base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected locally before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Transport or protocol failure below the HTTP status layer.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Discriminator over [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    RateLimit,
    Api,
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Validation(_) => ErrorKind::Validation,
            Error::RateLimit(_) => ErrorKind::RateLimit,
            Error::Api(_) => ErrorKind::Api,
            Error::Transport(_) => ErrorKind::Transport,
        }
    }

    /// True for a 429 response; callers use this to drive their own backoff.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimit(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

/// Raised when the API answers with HTTP 429.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (expires in {expires_in})")]
pub struct RateLimitError {
    pub message: String,
    /// Server-supplied expiry, verbatim for strings, decimal for numbers.
    pub expires_in: String,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub date: Option<String>,
}

impl RateLimitError {
    pub fn new(message: impl Into<String>, expires_in: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_in: expires_in.into(),
            status_code: None,
            error: None,
            date: None,
        }
    }

    /// Build from a 429 response body. Missing fields fall back to placeholders.
    pub(crate) fn from_body(data: &Value) -> Self {
        let message = data
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Rate limited")
            .to_string();
        let expires_in = match data.get("expiresIn") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::from("unknown"),
        };
        Self {
            message,
            expires_in,
            status_code: data
                .get("statusCode")
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok()),
            error: data.get("error").and_then(|e| e.as_str()).map(String::from),
            date: data.get("date").and_then(|d| d.as_str()).map(String::from),
        }
    }
}

/// Raised when the API returns any other non-success status.
#[derive(Error, Debug, Clone)]
#[error("API error {status_code}: {status_text}")]
pub struct ApiError {
    pub status_code: u16,
    pub status_text: String,
    pub response_data: Option<Value>,
}

impl ApiError {
    pub fn new(
        status_code: u16,
        status_text: impl Into<String>,
        response_data: Option<Value>,
    ) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            response_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rate_limit_from_body_keeps_string_expiry() {
        let e = RateLimitError::from_body(&json!({"message": "slow down", "expiresIn": "30s"}));
        assert_eq!(e.message, "slow down");
        assert_eq!(e.expires_in, "30s");
    }

    #[test]
    fn rate_limit_from_body_numeric_expiry_and_extras() {
        let e = RateLimitError::from_body(&json!({
            "statusCode": 429,
            "error": "Too Many Requests",
            "message": "You can only make 60 requests per 1 minute. Try again soon.",
            "date": "2025-01-01T00:00:00Z",
            "expiresIn": 42
        }));
        assert_eq!(e.expires_in, "42");
        assert_eq!(e.status_code, Some(429));
        assert_eq!(e.error.as_deref(), Some("Too Many Requests"));
    }

    #[test]
    fn rate_limit_from_empty_body() {
        let e = RateLimitError::from_body(&Value::Null);
        assert_eq!(e.message, "Rate limited");
        assert_eq!(e.expires_in, "unknown");
    }

    #[test]
    fn api_error_display_embeds_status() {
        let e = Error::from(ApiError::new(500, "Internal Server Error", None));
        let msg = e.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal Server Error"));
        assert_eq!(e.kind(), ErrorKind::Api);
    }

    #[test]
    fn kinds() {
        assert_eq!(
            Error::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::Configuration("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(Error::Transport("x".into()).kind(), ErrorKind::Transport);
        let rl = Error::from(RateLimitError::new("a", "b"));
        assert_eq!(rl.kind(), ErrorKind::RateLimit);
        assert!(rl.is_rate_limited());
    }
}

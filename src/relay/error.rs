//! Upstream error types.

use serde::Serialize;
use thiserror::Error;

use crate::relay::client::UpstreamResponse;

/// Errors produced while talking to the upstream server.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No response was obtained at all (DNS, connect, timeout, bad URL).
    #[error("transport error: {0}")]
    Transport(#[from] TransportFailure),

    /// Upstream answered with a failure status. The response is preserved.
    #[error("upstream responded with HTTP {}", .0.meta.status)]
    Status(UpstreamResponse),
}

/// Category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorKind {
    InvalidUrl,
    Connect,
    Timeout,
    Redirect,
    Body,
    Request,
}

/// A transport failure, as reported to callers under `status.error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidUrl, message)
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportErrorKind::Timeout
        } else if e.is_connect() {
            TransportErrorKind::Connect
        } else if e.is_redirect() {
            TransportErrorKind::Redirect
        } else if e.is_body() || e.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };

        // reqwest's Display omits the underlying cause (e.g. "connection refused")
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self { kind, message }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Transport(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_serialization() {
        let failure = TransportFailure::new(TransportErrorKind::Timeout, "timed out");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "timeout", "message": "timed out" }));
    }

    #[test]
    fn test_transport_error_display() {
        let err: UpstreamError = TransportFailure::invalid_url("nope").into();
        assert_eq!(err.to_string(), "transport error: nope");
    }
}

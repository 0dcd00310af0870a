//! The normalized API error.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::transport::{HttpError, HttpResponse};

/// Where a failure originated.
///
/// Every failure site in the request pipeline picks exactly one kind, so
/// callers match on this instead of inspecting error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network failure or timeout; the request never produced a response.
    Transport,
    /// The server answered with a 5xx status.
    Server,
    /// The server answered with any other non-2xx status.
    Client,
    /// The request could not be built (bad URL, header, or body).
    InvalidRequest,
    /// A 2xx response whose body is not a valid API envelope.
    InvalidResponse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Transport => "transport",
            Self::Server => "server",
            Self::Client => "client",
            Self::InvalidRequest => "invalid request",
            Self::InvalidResponse => "invalid response",
        };
        f.write_str(s)
    }
}

/// The single error shape surfaced by [`ApiClient`](super::ApiClient).
///
/// Carries a human-readable message, the HTTP status (`0` when no response
/// was received), and the parsed error body when the server sent one.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: u16,
    data: Option<Value>,
}

impl ApiError {
    /// Message used when the deadline for an attempt elapses.
    pub const TIMEOUT_MESSAGE: &'static str = "Request timeout";

    /// Creates an error from raw parts.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        status: u16,
        data: Option<Value>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            data,
        }
    }

    /// The attempt lost its race against the deadline.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Transport, Self::TIMEOUT_MESSAGE, 0, None)
    }

    /// The request could not be built; it was never sent.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message, 0, None)
    }

    /// A 2xx body failed to decode.
    #[must_use]
    pub fn invalid_response(status: u16, source: &serde_json::Error) -> Self {
        Self::new(
            ErrorKind::InvalidResponse,
            format!("Invalid response body: {source}"),
            status,
            None,
        )
    }

    /// Builds the error for a non-2xx response.
    ///
    /// A JSON body becomes `data` and its `message` field (if a non-empty
    /// string) becomes the message. Otherwise the raw text is used, or
    /// `HTTP <status>` when the body is empty.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status.as_u16();
        let fallback = format!("HTTP {status}");
        let text = response.text_lossy();

        let data = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| {
            let message = if text.is_empty() {
                fallback.clone()
            } else {
                text.clone().into_owned()
            };
            serde_json::json!({ "message": message })
        });

        let message = data
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or(fallback, ToString::to_string);

        let kind = if status >= 500 {
            ErrorKind::Server
        } else {
            ErrorKind::Client
        };

        Self::new(kind, message, status, Some(data))
    }

    /// Returns the failure kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, or `0` if no response was received.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the parsed error body, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Timeout => Self::timeout(),
            HttpError::Connection(_) => Self::new(ErrorKind::Transport, error.to_string(), 0, None),
            HttpError::InvalidUrl(_) => Self::invalid_request(error.to_string()),
        }
    }
}

/// Whether an error is transient and worth resubmitting unchanged.
pub trait IsRetryable {
    /// Returns true if the failure may succeed on retry.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for ApiError {
    fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport | ErrorKind::Server)
    }
}

//! Per-call request options.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

use super::ApiError;

/// Options for a single API call.
///
/// Headers set here take precedence over every configured header.
/// A body is never sent with `GET`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Serialized body
    pub body: Option<Vec<u8>>,
    /// Override headers
    pub headers: HeaderMap,
    /// Per-call timeout; the configured default applies when unset or zero
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates options for `method` with no body, headers, or timeout.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets a raw body, sent byte-for-byte.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error if serialization fails.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::invalid_request(format!("Invalid request body: {e}")))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Sets an override header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

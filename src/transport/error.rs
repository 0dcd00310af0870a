//! Transport error type.

use thiserror::Error;

/// Failure of a transport to produce any HTTP response.
///
/// This is the transport's native error. It is converted into
/// [`ApiError`](crate::client::ApiError) before reaching callers of the
/// client, so consumers never match on it directly.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// Includes DNS resolution failures, refused connections, TLS errors,
    /// and failures while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport's own timeout elapsed.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL or headers.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

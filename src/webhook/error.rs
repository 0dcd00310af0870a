//! Webhook error types.

use thiserror::Error;

/// Error type for webhook verification and parsing.
///
/// Signature failures are deliberately collapsed into
/// [`WebhookError::SignatureInvalid`]: callers cannot tell a stale
/// timestamp from a digest mismatch.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The body is not a valid envelope (`id`, `timestamp`, `event`).
    #[error("Invalid webhook payload: {0}")]
    MalformedPayload(String),

    /// Signature verification failed.
    #[error("Webhook signature verification failed")]
    SignatureInvalid,

    /// The request carried no signature header.
    #[error("Missing signature header")]
    MissingSignatureHeader,

    /// `event.data` does not match the requested type.
    #[error("Invalid event data: {0}")]
    InvalidEventData(#[source] serde_json::Error),
}

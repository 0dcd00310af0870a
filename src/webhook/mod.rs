//! Signed webhook verification.
//!
//! Webhooks arrive as a JSON envelope plus a `t=<unix-seconds>,v1=<hex>`
//! signature header. This module provides:
//! - [`sign`] / [`verify`]: HMAC-SHA256 over `"<t>.<raw-body>"` with a
//!   tolerance window against replays
//! - [`parse_payload`] / [`verify_and_parse`]: envelope decoding, the latter
//!   refusing to parse anything that failed verification
//! - [`WebhookVerifier`]: the same operations bound to one secret, plus
//!   request-level verification for HTTP servers

mod error;
mod event;
mod middleware;
mod payload;
mod signature;
mod verifier;

#[cfg(test)]
mod middleware_tests;

pub use error::WebhookError;
pub use event::{EventKind, UnknownEventKind, is_valid_event_type};
pub use middleware::{LEGACY_SIGNATURE_HEADER, Rejection, SIGNATURE_HEADER};
pub use payload::{
    WebhookEvent, WebhookPayload, create_test_payload, is_webhook_event, parse_payload,
    verify_and_parse,
};
pub use signature::{
    DEFAULT_TOLERANCE_SECS, ParseSignatureError, Signature, generate_signature, sign, verify,
    verify_at,
};
pub use verifier::WebhookVerifier;

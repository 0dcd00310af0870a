//! Secret-holding webhook verifier.

use std::fmt;

use super::error::WebhookError;
use super::payload::{WebhookPayload, parse_payload};
use super::signature::{self, DEFAULT_TOLERANCE_SECS, Signature};
use crate::time::{Clock, SystemClock};

/// Signs and verifies webhooks with a single shared secret.
///
/// # Example
///
/// ```
/// use inkress::webhook::WebhookVerifier;
///
/// let verifier = WebhookVerifier::new("whsec_test");
/// let body = br#"{"id":"evt_1","timestamp":1,"event":{"type":"order.created","data":{}}}"#;
/// let header = verifier.sign(body).to_string();
///
/// assert!(verifier.verify(body, &header));
/// ```
#[derive(Clone)]
pub struct WebhookVerifier<C = SystemClock> {
    secret: Vec<u8>,
    tolerance: u64,
    clock: C,
}

impl WebhookVerifier {
    /// Creates a verifier using the system clock and the default tolerance.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Creates a verifier that reads "now" from `clock`.
    pub fn with_clock(secret: impl AsRef<[u8]>, clock: C) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            tolerance: DEFAULT_TOLERANCE_SECS,
            clock,
        }
    }

    /// Sets the allowed skew in seconds.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: u64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub const fn tolerance(&self) -> u64 {
        self.tolerance
    }

    /// Signs `payload` at the clock's current time.
    #[must_use]
    pub fn sign(&self, payload: &[u8]) -> Signature {
        signature::sign(payload, &self.secret, self.clock.unix_seconds())
    }

    /// Returns true if `header` is a valid, fresh signature over `payload`.
    #[must_use]
    pub fn verify(&self, payload: &[u8], header: &str) -> bool {
        signature::verify_at(
            payload,
            header,
            &self.secret,
            self.tolerance,
            self.clock.unix_seconds(),
        )
    }

    /// Verifies `raw` and parses it only if the signature holds.
    ///
    /// # Errors
    ///
    /// [`WebhookError::SignatureInvalid`] on verification failure,
    /// [`WebhookError::MalformedPayload`] if the signed body is not an
    /// envelope.
    pub fn verify_and_parse(
        &self,
        raw: &[u8],
        header: &str,
    ) -> Result<WebhookPayload, WebhookError> {
        if !self.verify(raw, header) {
            return Err(WebhookError::SignatureInvalid);
        }
        parse_payload(raw)
    }
}

impl<C> fmt::Debug for WebhookVerifier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

//! Request-level webhook verification.
//!
//! [`WebhookVerifier::verify_request`] works on an [`http::Request`] whose
//! body is still the raw bytes received from the wire. Bodies that a
//! framework has already decoded and re-encoded will not verify.

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};

use super::error::WebhookError;
use super::verifier::WebhookVerifier;
use crate::time::Clock;

/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "inkress-signature";

/// Older header name, consulted when [`SIGNATURE_HEADER`] is absent.
pub const LEGACY_SIGNATURE_HEADER: &str = "x-inkress-signature";

/// A request refused by [`WebhookVerifier::verify_request`].
#[derive(Debug)]
pub struct Rejection {
    error: WebhookError,
}

impl Rejection {
    #[must_use]
    pub const fn error(&self) -> &WebhookError {
        &self.error
    }

    /// Always `400 Bad Request`.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Renders the rejection as a JSON `{"error": ...}` response.
    #[must_use]
    pub fn into_response(self) -> Response<Vec<u8>> {
        let body = serde_json::json!({ "error": self.error.to_string() }).to_string();
        let mut response = Response::new(body.into_bytes());
        *response.status_mut() = self.status();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}

impl From<WebhookError> for Rejection {
    fn from(error: WebhookError) -> Self {
        Self { error }
    }
}

impl<C: Clock> WebhookVerifier<C> {
    /// Verifies a webhook request and attaches the parsed payload.
    ///
    /// On success the returned request carries a
    /// [`WebhookPayload`](super::WebhookPayload) in its extensions.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the signature header is missing or not
    /// ASCII, the signature does not verify, or the body is not an envelope.
    pub fn verify_request<B: AsRef<[u8]>>(
        &self,
        request: Request<B>,
    ) -> Result<Request<B>, Rejection> {
        let headers = request.headers();
        let header = headers
            .get(SIGNATURE_HEADER)
            .or_else(|| headers.get(LEGACY_SIGNATURE_HEADER))
            .ok_or(WebhookError::MissingSignatureHeader)?;
        let header = header.to_str().map_err(|_| WebhookError::SignatureInvalid)?;

        let payload = self.verify_and_parse(request.body().as_ref(), header)?;

        tracing::debug!(id = payload.id(), kind = payload.event().kind(), "Webhook accepted");

        let mut request = request;
        request.extensions_mut().insert(payload);
        Ok(request)
    }
}

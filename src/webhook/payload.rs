//! Webhook envelope parsing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::WebhookError;
use super::event::EventKind;
use super::signature;
use crate::time::Clock;

/// The `{id, timestamp, event}` envelope delivered in a webhook body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    id: String,
    timestamp: i64,
    event: WebhookEvent,
}

/// The `event` member of a [`WebhookPayload`].
///
/// Members other than `type` and `data` are preserved in [`extra`](Self::extra).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Map<String, Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl WebhookEvent {
    #[must_use]
    pub fn new(kind: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            data,
            extra: Map::new(),
        }
    }

    /// The raw `type` string.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl WebhookPayload {
    #[must_use]
    pub fn new(id: impl Into<String>, timestamp: i64, event: WebhookEvent) -> Self {
        Self {
            id: id.into(),
            timestamp,
            event,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Unix seconds assigned by the sender.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub const fn event(&self) -> &WebhookEvent {
        &self.event
    }

    /// The event kind, if it is one of the known kinds.
    #[must_use]
    pub fn event_kind(&self) -> Option<EventKind> {
        self.event.kind.parse().ok()
    }

    /// Deserializes `event.data` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidEventData`] if the data does not
    /// match `T`.
    pub fn extract_event_data<T: DeserializeOwned>(&self) -> Result<T, WebhookError> {
        serde_json::from_value(Value::Object(self.event.data.clone()))
            .map_err(WebhookError::InvalidEventData)
    }
}

/// Parses a raw webhook body without checking its signature.
///
/// An unknown event kind still parses; see
/// [`is_valid_event_type`](super::is_valid_event_type).
///
/// # Errors
///
/// Returns [`WebhookError::MalformedPayload`] if the body is not JSON or
/// lacks `id`, `timestamp` or `event`.
pub fn parse_payload(raw: &[u8]) -> Result<WebhookPayload, WebhookError> {
    serde_json::from_slice(raw).map_err(|e| WebhookError::MalformedPayload(e.to_string()))
}

/// Verifies the signature over `raw` and only then parses it.
///
/// # Errors
///
/// Returns [`WebhookError::SignatureInvalid`] if verification fails, in
/// which case `raw` is never parsed, or [`WebhookError::MalformedPayload`]
/// if a correctly signed body is not a valid envelope.
pub fn verify_and_parse(
    raw: &[u8],
    header: &str,
    secret: &[u8],
    tolerance: u64,
) -> Result<WebhookPayload, WebhookError> {
    if !signature::verify(raw, header, secret, tolerance) {
        return Err(WebhookError::SignatureInvalid);
    }
    parse_payload(raw)
}

/// Builds an envelope around `event` with a fresh id, stamped at the
/// clock's current time.
#[must_use]
pub fn create_test_payload(event: WebhookEvent, clock: &impl Clock) -> WebhookPayload {
    WebhookPayload {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: clock.unix_seconds(),
        event,
    }
}

/// Structural check that `value` looks like a webhook envelope.
///
/// Requires a string `id`, an integer `timestamp` and an `event` object
/// carrying a string `type`.
#[must_use]
pub fn is_webhook_event(value: &Value) -> bool {
    value.get("id").is_some_and(Value::is_string)
        && value.get("timestamp").is_some_and(|t| t.is_i64() || t.is_u64())
        && value
            .get("event")
            .and_then(|e| e.get("type"))
            .is_some_and(Value::is_string)
}

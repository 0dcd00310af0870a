//! Tests for request-level verification.

use super::{
    LEGACY_SIGNATURE_HEADER, SIGNATURE_HEADER, WebhookError, WebhookPayload, WebhookVerifier,
};
use crate::time::Clock;
use http::{Request, StatusCode};
use std::time::{Duration, SystemTime};

const SECRET: &[u8] = b"whsec_test_secret";
const BODY: &[u8] =
    br#"{"id":"evt_1","timestamp":1700000000,"event":{"type":"order.created","data":{}}}"#;

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }
}

fn verifier() -> WebhookVerifier<FixedClock> {
    WebhookVerifier::with_clock(SECRET, FixedClock)
}

fn request(header: Option<(&str, String)>, body: &[u8]) -> Request<Vec<u8>> {
    let mut builder = Request::post("/webhooks/inkress");
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    builder.body(body.to_vec()).unwrap()
}

#[test]
fn valid_request_carries_payload() {
    let sig = verifier().sign(BODY).to_string();
    let req = verifier()
        .verify_request(request(Some((SIGNATURE_HEADER, sig)), BODY))
        .unwrap();

    let payload = req.extensions().get::<WebhookPayload>().unwrap();
    assert_eq!(payload.id(), "evt_1");
    assert_eq!(req.body(), BODY);
}

#[test]
fn legacy_header_is_accepted() {
    let sig = verifier().sign(BODY).to_string();
    let req = verifier()
        .verify_request(request(Some((LEGACY_SIGNATURE_HEADER, sig)), BODY))
        .unwrap();

    assert!(req.extensions().get::<WebhookPayload>().is_some());
}

#[test]
fn missing_header_is_rejected() {
    let rejection = verifier().verify_request(request(None, BODY)).unwrap_err();

    assert!(matches!(rejection.error(), WebhookError::MissingSignatureHeader));
    let response = rejection.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["error"], "Missing signature header");
}

#[test]
fn bad_signature_is_rejected() {
    let sig = verifier().sign(b"something else").to_string();
    let rejection = verifier()
        .verify_request(request(Some((SIGNATURE_HEADER, sig)), BODY))
        .unwrap_err();

    assert!(matches!(rejection.error(), WebhookError::SignatureInvalid));
    assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_slice(rejection.into_response().body()).unwrap();
    assert_eq!(body["error"], "Webhook signature verification failed");
}

#[test]
fn reencoded_body_is_rejected() {
    let sig = verifier().sign(BODY).to_string();
    let value: serde_json::Value = serde_json::from_slice(BODY).unwrap();
    let reencoded = serde_json::to_vec_pretty(&value).unwrap();

    assert!(verifier()
        .verify_request(request(Some((SIGNATURE_HEADER, sig)), &reencoded))
        .is_err());
}

#[test]
fn works_with_borrowed_bodies() {
    let sig = verifier().sign(BODY).to_string();
    let req = Request::post("/").header(SIGNATURE_HEADER, sig).body(BODY).unwrap();

    assert!(verifier().verify_request(req).is_ok());
}

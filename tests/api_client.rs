//! End-to-end tests: `ReqwestClient` + `ApiClient` against a mock server.

use std::time::Duration;

use inkress::Inkress;
use inkress::client::{ApiClient, ClientConfig, ErrorKind, RequestOptions, ResponseState};
use inkress::resources::FeeQuery;
use inkress::time::InstantSleeper;
use inkress::transport::ReqwestClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("integration-token").with_endpoint(server.uri())
}

fn client(config: ClientConfig) -> ApiClient<ReqwestClient, InstantSleeper> {
    ApiClient::new(ReqwestClient::new(), config).with_sleeper(InstantSleeper)
}

#[tokio::test]
async fn get_decodes_envelope_and_sends_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/5"))
        .and(header("authorization", "Bearer integration-token"))
        .and(header("content-type", "application/json"))
        .and(header("client-id", "m-shop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "state": "ok", "data": { "id": 5, "name": "Shop" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(config(&server).with_client_id("m-shop"));
    let response = client.get::<Value>("/merchants/5").await.unwrap();

    assert_eq!(response.state, ResponseState::Ok);
    assert_eq!(response.data.unwrap()["name"], "Shop");
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/orders"))
        .and(body_json(json!({ "total": 25.5, "currency_code": "JMD" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "state": "ok", "result": { "id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client(config(&server))
        .post::<Value, _>("/orders", &json!({ "total": 25.5, "currency_code": "JMD" }))
        .await
        .unwrap();

    assert_eq!(response.into_payload(), Some(json!({ "id": 1 })));
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "state": "ok", "data": [] })),
        )
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let response = client(config(&server))
        .get::<Value>("/products")
        .await
        .unwrap();

    assert_eq!(response.data, Some(json!([])));
}

#[tokio::test]
async fn retry_budget_is_exhausted_on_persistent_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance" })))
        .expect(4)
        .mount(&server)
        .await;

    let err = client(config(&server))
        .get::<Value>("/products")
        .await
        .unwrap_err();

    assert_eq!(err.status(), 503);
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "maintenance");
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "state": "error", "message": "Not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(config(&server))
        .get::<Value>("/products/999")
        .await
        .unwrap_err();

    assert_eq!(err.status(), 404);
    assert_eq!(err.message(), "Not found");
    assert_eq!(err.data().unwrap()["state"], "error");
}

#[tokio::test]
async fn slow_server_times_out_with_status_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server)
        .with_timeout(Duration::from_millis(100))
        .with_retries(0);
    let err = client(config).get::<Value>("/orders").await.unwrap_err();

    assert_eq!(err.status(), 0);
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn per_call_options_override_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-trace", "per-call"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = http::HeaderMap::new();
    headers.insert("x-trace", http::HeaderValue::from_static("configured"));
    let client = client(config(&server).with_headers(headers));

    let options = RequestOptions::default().with_header(
        http::HeaderName::from_static("x-trace"),
        http::HeaderValue::from_static("per-call"),
    );
    let response = client.request::<Value>("/ping", options).await.unwrap();

    assert!(response.data.is_none());
}

#[tokio::test]
async fn facade_reaches_public_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/public/m/shop/fees"))
        .and(query_param("currency", "JMD"))
        .and(query_param("total", "100.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "state": "ok", "data": { "fee": 3.5 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let inkress = Inkress::new(ReqwestClient::new(), config(&server)).unwrap();
    let fees = inkress
        .public()
        .merchant_fees::<Value>(
            "shop",
            &FeeQuery {
                currency: "JMD",
                total: 100.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(fees.data.unwrap()["fee"], 3.5);

    // Unmatched routes answer 404, which is terminal.
    let missing = inkress
        .public()
        .merchant_products::<Value, _>("unknown", &())
        .await
        .unwrap_err();
    assert_eq!(missing.status(), 404);
}

//! Tests for the `ApiClient` request pipeline.

use super::{
    ApiClient, ApiError, ApiResponse, ClientConfig, ConfigUpdate, ErrorKind, RequestOptions,
    ResponseState,
};
use crate::time::Sleeper;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted transport outcome.
enum Step {
    Respond(u16, &'static str),
    Fail(HttpError),
    Hang,
}

/// Transport that plays back a script and records every request.
///
/// Once the script runs out every further call hangs forever.
struct MockClient {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn statuses(statuses: &[u16]) -> Self {
        Self::new(statuses.iter().map(|&s| Step::Respond(s, "")).collect())
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request_at(&self, index: usize) -> HttpRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        let step = self.script.lock().unwrap().pop_front().unwrap_or(Step::Hang);

        match step {
            Step::Respond(status, body) => Ok(HttpResponse::new(
                StatusCode::from_u16(status).unwrap(),
                HeaderMap::new(),
                body.as_bytes().to_vec(),
            )),
            Step::Fail(e) => Err(e),
            Step::Hang => std::future::pending().await,
        }
    }
}

/// Sleeper that records requested delays without waiting.
#[derive(Clone, Default)]
struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

fn config() -> ClientConfig {
    ClientConfig::new("test-token").with_endpoint("https://test.api.inkress.com")
}

fn client(
    transport: MockClient,
    config: ClientConfig,
) -> (ApiClient<MockClient, RecordingSleeper>, RecordingSleeper) {
    let sleeper = RecordingSleeper::default();
    let client = ApiClient::new(transport, config).with_sleeper(sleeper.clone());
    (client, sleeper)
}

fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|&s| Duration::from_secs(s)).collect()
}

mod retry_policy {
    use super::*;

    #[tokio::test]
    async fn server_errors_then_success_returns_success() {
        let (client, sleeper) = client(MockClient::statuses(&[500, 500, 200]), config());

        let response = client.get::<Value>("/merchants").await.unwrap();

        assert_eq!(response, ApiResponse::empty());
        assert_eq!(client.transport().calls(), 3);
        assert_eq!(sleeper.delays(), secs(&[1, 2]));
    }

    #[tokio::test]
    async fn client_error_is_not_retried() {
        let (client, sleeper) = client(MockClient::statuses(&[404]), config());

        let err = client.get::<Value>("/orders/9").await.unwrap_err();

        assert_eq!(err.status(), 404);
        assert_eq!(err.kind(), ErrorKind::Client);
        assert_eq!(client.transport().calls(), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn exhausted_budget_surfaces_final_error() {
        let (client, sleeper) = client(
            MockClient::statuses(&[500, 500, 500, 500]),
            config().with_retries(3),
        );

        let err = client.get::<Value>("/products").await.unwrap_err();

        assert_eq!(err.status(), 500);
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(client.transport().calls(), 4);
        assert_eq!(sleeper.delays(), secs(&[1, 2, 3]));
    }

    #[tokio::test]
    async fn last_error_is_surfaced_unchanged() {
        let transport = MockClient::new(vec![
            Step::Respond(500, r#"{"message":"first"}"#),
            Step::Respond(503, r#"{"message":"second","code":"maintenance"}"#),
        ]);
        let (client, _) = client(transport, config().with_retries(1));

        let err = client.get::<Value>("/users").await.unwrap_err();

        assert_eq!(err.status(), 503);
        assert_eq!(err.message(), "second");
        assert_eq!(err.data().unwrap()["code"], "maintenance");
    }

    #[tokio::test]
    async fn connection_failure_is_retried() {
        let transport = MockClient::new(vec![
            Step::Fail(HttpError::Connection(Box::new(std::io::Error::other(
                "connection refused",
            )))),
            Step::Respond(200, r#"{"state":"ok","data":{"id":1}}"#),
        ]);
        let (client, sleeper) = client(transport, config());

        let response = client.get::<Value>("/merchants/1").await.unwrap();

        assert_eq!(response.data, Some(json!({ "id": 1 })));
        assert_eq!(sleeper.delays(), secs(&[1]));
    }

    #[tokio::test]
    async fn invalid_url_from_transport_is_not_retried() {
        let transport = MockClient::new(vec![Step::Fail(HttpError::InvalidUrl("bad".to_string()))]);
        let (client, _) = client(transport, config());

        let err = client.get::<Value>("/merchants").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(client.transport().calls(), 1);
    }

    #[tokio::test]
    async fn zero_retries_makes_single_attempt() {
        let (client, sleeper) = client(MockClient::statuses(&[502, 200]), config().with_retries(0));

        let err = client.get::<Value>("/merchants").await.unwrap_err();

        assert_eq!(err.status(), 502);
        assert_eq!(client.transport().calls(), 1);
        assert!(sleeper.delays().is_empty());
    }
}

mod timeout {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hanging_transport_yields_status_zero() {
        let (client, _) = client(
            MockClient::new(vec![Step::Hang]),
            config()
                .with_retries(0)
                .with_timeout(Duration::from_millis(50)),
        );

        let err = client.get::<Value>("/merchants").await.unwrap_err();

        assert_eq!(err.status(), 0);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message(), ApiError::TIMEOUT_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn each_retry_is_freshly_timed() {
        let (client, sleeper) = client(
            MockClient::new(vec![Step::Hang, Step::Hang, Step::Respond(200, "")]),
            config()
                .with_retries(2)
                .with_timeout(Duration::from_millis(100)),
        );

        let response = client.get::<Value>("/merchants").await.unwrap();

        assert!(response.is_ok());
        assert_eq!(client.transport().calls(), 3);
        assert_eq!(sleeper.delays(), secs(&[1, 2]));
    }

    #[tokio::test(start_paused = true)]
    async fn per_call_timeout_overrides_default() {
        let (client, _) = client(
            MockClient::new(vec![Step::Hang]),
            config()
                .with_retries(0)
                .with_timeout(Duration::from_secs(3600)),
        );
        let start = tokio::time::Instant::now();

        let err = client
            .request::<Value>(
                "/merchants",
                RequestOptions::new(Method::GET).with_timeout(Duration::from_millis(10)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), 0);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_per_call_timeout_uses_default() {
        let (client, _) = client(
            MockClient::new(vec![Step::Hang]),
            config().with_retries(0).with_timeout(Duration::from_secs(5)),
        );
        let start = tokio::time::Instant::now();

        let err = client
            .request::<Value>(
                "/merchants",
                RequestOptions::new(Method::GET).with_timeout(Duration::ZERO),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), 0);
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}

mod request_construction {
    use super::*;

    #[tokio::test]
    async fn url_joins_base_and_path() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        client.get::<Value>("/categories/4").await.unwrap();

        assert_eq!(
            client.transport().request_at(0).url.as_str(),
            "https://test.api.inkress.com/api/v1/categories/4"
        );
    }

    #[tokio::test]
    async fn path_without_leading_slash_gets_separator() {
        let (client, _) = client(MockClient::statuses(&[200, 200]), config());

        client.get::<Value>("merchants").await.unwrap();
        client
            .get_with_query::<Value, _>("products", &json!({ "page": 1 }))
            .await
            .unwrap();

        assert_eq!(
            client.transport().request_at(0).url.as_str(),
            "https://test.api.inkress.com/api/v1/merchants"
        );
        assert_eq!(
            client.transport().request_at(1).url.as_str(),
            "https://test.api.inkress.com/api/v1/products?page=1"
        );
    }

    #[tokio::test]
    async fn query_omits_null_values() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        client
            .get_with_query::<Value, _>("/products", &json!({ "a": 1, "b": null, "c": null }))
            .await
            .unwrap();

        assert_eq!(
            client.transport().request_at(0).url.as_str(),
            "https://test.api.inkress.com/api/v1/products?a=1"
        );
    }

    #[tokio::test]
    async fn all_null_query_adds_no_question_mark() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        client
            .get_with_query::<Value, _>("/products", &json!({ "page": null }))
            .await
            .unwrap();

        assert!(client.transport().request_at(0).url.query().is_none());
    }

    #[tokio::test]
    async fn default_headers_are_sent() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        client.get::<Value>("/merchants").await.unwrap();

        let headers = client.transport().request_at(0).headers;
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer test-token");
        assert!(headers.get("client-id").is_none());
    }

    #[tokio::test]
    async fn header_precedence_low_to_high() {
        let mut configured = HeaderMap::new();
        configured.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/vnd.inkress+json"),
        );
        configured.insert("client-id", HeaderValue::from_static("from-headers"));
        configured.insert("x-trace", HeaderValue::from_static("configured"));

        let (client, _) = client(
            MockClient::statuses(&[200]),
            config()
                .with_headers(configured)
                .with_client_id("m-test-merchant"),
        );

        let options = RequestOptions::new(Method::GET)
            .with_header(HeaderName::from_static("x-trace"), HeaderValue::from_static("per-call"));
        client.request::<Value>("/orders", options).await.unwrap();

        let headers = client.transport().request_at(0).headers;
        assert_eq!(headers[header::CONTENT_TYPE], "application/vnd.inkress+json");
        assert_eq!(headers["client-id"], "m-test-merchant");
        assert_eq!(headers["x-trace"], "per-call");
        assert_eq!(headers.get_all("client-id").iter().count(), 1);
    }

    #[tokio::test]
    async fn per_call_header_overrides_client_id() {
        let (client, _) = client(
            MockClient::statuses(&[200]),
            config().with_client_id("m-configured"),
        );

        let options = RequestOptions::new(Method::GET).with_header(
            HeaderName::from_static("client-id"),
            HeaderValue::from_static("m-override"),
        );
        client.request::<Value>("/orders", options).await.unwrap();

        assert_eq!(client.transport().request_at(0).headers["client-id"], "m-override");
    }

    #[tokio::test]
    async fn empty_client_id_is_not_sent() {
        let (client, _) = client(MockClient::statuses(&[200]), config().with_client_id(""));

        client.get::<Value>("/orders").await.unwrap();

        assert!(client.transport().request_at(0).headers.get("client-id").is_none());
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let (client, _) = client(MockClient::statuses(&[201]), config());

        client
            .post::<Value, _>("/orders", &json!({ "currency_code": "USD", "total": 29.99 }))
            .await
            .unwrap();

        let request = client.transport().request_at(0);
        assert_eq!(request.method, Method::POST);
        let body: Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "currency_code": "USD", "total": 29.99 }));
    }

    #[tokio::test]
    async fn put_patch_delete_use_their_methods() {
        let (client, _) = client(MockClient::statuses(&[200, 200, 204]), config());

        client.put::<Value, _>("/products/1", &json!({ "title": "A" })).await.unwrap();
        client.patch::<Value, _>("/products/1", &json!({ "title": "B" })).await.unwrap();
        client.delete::<Value>("/products/1").await.unwrap();

        let transport = client.transport();
        assert_eq!(transport.request_at(0).method, Method::PUT);
        assert_eq!(transport.request_at(1).method, Method::PATCH);
        assert_eq!(transport.request_at(2).method, Method::DELETE);
        assert!(transport.request_at(2).body.is_none());
    }

    #[tokio::test]
    async fn get_never_sends_body() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        let options = RequestOptions::new(Method::GET).with_body(b"ignored".to_vec());
        client.request::<Value>("/merchants", options).await.unwrap();

        assert!(client.transport().request_at(0).body.is_none());
    }

    #[tokio::test]
    async fn raw_body_is_sent_verbatim() {
        let (client, _) = client(MockClient::statuses(&[200]), config());

        let options = RequestOptions::new(Method::POST).with_body(b"{ \"spaced\" : 1 }".to_vec());
        client.request::<Value>("/orders", options).await.unwrap();

        assert_eq!(
            client.transport().request_at(0).body.as_deref(),
            Some(&b"{ \"spaced\" : 1 }"[..])
        );
    }

    #[tokio::test]
    async fn invalid_token_fails_before_sending() {
        let (client, _) = client(MockClient::statuses(&[200]), ClientConfig::new("bad\ntoken"));

        let err = client.get::<Value>("/merchants").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(client.transport().calls(), 0);
    }
}

mod response_handling {
    use super::*;

    #[tokio::test]
    async fn success_body_decodes_envelope() {
        let transport = MockClient::new(vec![Step::Respond(
            200,
            r#"{"state":"ok","data":{"id":7,"name":"Shop"}}"#,
        )]);
        let (client, _) = client(transport, config());

        let response = client.get::<Value>("/merchants/7").await.unwrap();

        assert_eq!(response.state, ResponseState::Ok);
        assert_eq!(response.into_payload(), Some(json!({ "id": 7, "name": "Shop" })));
    }

    #[tokio::test]
    async fn result_slot_is_used_when_data_missing() {
        let transport = MockClient::new(vec![Step::Respond(
            200,
            r#"{"state":"ok","result":"done"}"#,
        )]);
        let (client, _) = client(transport, config());

        let response = client.get::<String>("/billing_subscriptions/1/cancel/x").await.unwrap();

        assert_eq!(response.into_payload().as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn empty_success_body_is_payload_less_success() {
        let (client, _) = client(MockClient::statuses(&[204]), config());

        let response = client.delete::<Value>("/users/3").await.unwrap();

        assert!(response.is_ok());
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn undecodable_success_body_is_not_retried() {
        let transport = MockClient::new(vec![Step::Respond(200, "<html>oops</html>")]);
        let (client, sleeper) = client(transport, config());

        let err = client.get::<Value>("/merchants").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert_eq!(err.status(), 200);
        assert!(sleeper.delays().is_empty());
    }
}

mod configuration {
    use super::*;

    #[tokio::test]
    async fn update_applies_to_next_request() {
        let (mut client, _) = client(MockClient::statuses(&[200, 200]), config());

        client.get::<Value>("/merchants").await.unwrap();
        client.update_config(ConfigUpdate {
            endpoint: Some("https://new.api.inkress.com".to_string()),
            client_id: Some(Some("m-new-merchant".to_string())),
            ..ConfigUpdate::default()
        });
        client.get::<Value>("/merchants").await.unwrap();

        let second = client.transport().request_at(1);
        assert_eq!(second.url.as_str(), "https://new.api.inkress.com/api/v1/merchants");
        assert_eq!(second.headers["client-id"], "m-new-merchant");
    }

    #[test]
    fn config_view_hides_token() {
        let (client, _) = client(MockClient::statuses(&[]), config().with_client_id("m-test"));
        let view = client.config();

        assert_eq!(view.endpoint, "https://test.api.inkress.com");
        assert_eq!(view.client_id.as_deref(), Some("m-test"));
        assert!(!format!("{view:?}").contains("test-token"));
    }
}

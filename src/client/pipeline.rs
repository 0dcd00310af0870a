//! The request pipeline: build, race against a deadline, classify, retry.

use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, overlay_headers};

use super::{
    ApiError, ApiResponse, ClientConfig, ConfigUpdate, IsRetryable, PublicConfig, RequestOptions,
    query_string,
};

/// Header carrying the configured client identifier.
pub const CLIENT_ID_HEADER: HeaderName = HeaderName::from_static("client-id");

/// Authenticated client for the REST API.
///
/// Every call goes through the same pipeline:
///
/// 1. Build the URL (`<endpoint>/api/<version><path>`) and merge headers,
///    lowest to highest precedence: `Content-Type` and bearer
///    `Authorization`, configured headers, `Client-Id` (when configured),
///    per-call override headers.
/// 2. Race the transport call against the attempt deadline. When the
///    deadline wins the transport future is dropped and the attempt fails
///    with status `0`.
/// 3. Normalize the outcome: 2xx bodies decode into [`ApiResponse`] (an
///    empty body is a payload-less success), everything else becomes an
///    [`ApiError`].
/// 4. Retry transport and server failures with linear backoff until the
///    budget is spent, then surface the last error unchanged.
///
/// Attempts are strictly sequential. Configuration changes require
/// `&mut self`, so an in-flight call always sees one consistent snapshot.
///
/// # Type Parameters
///
/// - `H`: The transport
/// - `S`: The sleeper used for backoff delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use inkress::client::{ApiClient, ClientConfig};
/// use inkress::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), inkress::client::ApiError> {
/// let client = ApiClient::new(ReqwestClient::new(), ClientConfig::new("jwt-token"));
/// let merchants = client.get::<serde_json::Value>("/merchants").await?;
/// println!("{:?}", merchants.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient<H, S = TokioSleeper> {
    transport: H,
    sleeper: S,
    config: ClientConfig,
}

impl<H> ApiClient<H, TokioSleeper> {
    /// Creates a client using [`TokioSleeper`] for backoff.
    #[must_use]
    pub const fn new(transport: H, config: ClientConfig) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
            config,
        }
    }
}

impl<H, S> ApiClient<H, S> {
    /// Replaces the sleeper used for backoff delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ApiClient<H, S2> {
        ApiClient {
            transport: self.transport,
            sleeper,
            config: self.config,
        }
    }

    /// Returns the configuration without the bearer token.
    #[must_use]
    pub fn config(&self) -> PublicConfig {
        PublicConfig::from(&self.config)
    }

    /// Merges a partial configuration update.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.transport
    }
}

impl<H: HttpClient, S: Sleeper> ApiClient<H, S> {
    /// Issues a `GET`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    /// Issues a `GET` with query parameters (see [`query_string`]).
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt, or an
    /// invalid-request error if `params` is not a map.
    pub async fn get_with_query<T, Q>(
        &self,
        path: &str,
        params: &Q,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let target = match query_string(params)? {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        self.request(&target, RequestOptions::new(Method::GET)).await
    }

    /// Issues a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::new(Method::POST).with_json(body)?)
            .await
    }

    /// Issues a `PUT` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::new(Method::PUT).with_json(body)?)
            .await
    }

    /// Issues a `PATCH` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RequestOptions::new(Method::PATCH).with_json(body)?)
            .await
    }

    /// Issues a `DELETE`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }

    /// Runs one call through the full pipeline with explicit options.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] of the last attempt. Only
    /// transport failures (status `0`) and 5xx responses are retried.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = self.build_request(path, &options)?;
        let deadline = options
            .timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(self.config.timeout);
        let policy = self.config.retry_policy();

        let mut retries_used = 0;
        loop {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt = retries_used + 1,
                "Sending API request"
            );

            match self.attempt(&request, deadline).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && policy.should_retry(retries_used) => {
                    retries_used += 1;
                    let delay = policy.delay_for_retry(retries_used);
                    tracing::warn!(
                        status = e.status(),
                        error = %e,
                        retry = retries_used,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "API request failed, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One attempt: transport call raced against `deadline`.
    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        deadline: Duration,
    ) -> Result<ApiResponse<T>, ApiError> {
        match tokio::time::timeout(deadline, self.transport.request(request.clone())).await {
            Err(_elapsed) => Err(ApiError::timeout()),
            Ok(Err(transport_error)) => Err(transport_error.into()),
            Ok(Ok(response)) => decode_response(&response),
        }
    }

    fn build_request(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ApiError> {
        let raw = join_path(&self.config.base_url(), path);
        let url = url::Url::parse(&raw)
            .map_err(|e| ApiError::invalid_request(format!("Invalid URL '{raw}': {e}")))?;

        let mut request = HttpRequest::new(options.method.clone(), url);
        request.headers = self.build_headers(&options.headers)?;

        if options.method != Method::GET {
            request.body.clone_from(&options.body);
        }

        Ok(request)
    }

    fn build_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {}", self.config.bearer_token());
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|_| ApiError::invalid_request("Bearer token is not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        overlay_headers(&mut headers, &self.config.headers);

        if let Some(client_id) = self.config.client_id.as_deref().filter(|id| !id.is_empty()) {
            let value = HeaderValue::from_str(client_id)
                .map_err(|_| ApiError::invalid_request("Client id is not a valid header value"))?;
            headers.insert(CLIENT_ID_HEADER, value);
        }

        overlay_headers(&mut headers, overrides);
        Ok(headers)
    }
}

/// Appends `path` to `base`, inserting the `/` separator when the path lacks one.
fn join_path(base: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with(['/', '?']) {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Maps a raw response to a success envelope or a normalized error.
fn decode_response<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<ApiResponse<T>, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(response));
    }

    if response.body.is_empty() {
        return Ok(ApiResponse::empty());
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::invalid_response(response.status.as_u16(), &e))
}

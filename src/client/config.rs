//! Client configuration.

use std::fmt;
use std::time::Duration;

use http::HeaderMap;

use super::RetryPolicy;

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.inkress.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default per-attempt timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings used to build and send every request.
///
/// Construct with [`ClientConfig::new`] and refine with the `with_*`
/// builders. The bearer token is write-only: it is never exposed by
/// accessors, [`PublicConfig`], or `Debug` output.
///
/// # Example
///
/// ```
/// use inkress::client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("jwt-token")
///     .with_client_id("m-merchant")
///     .with_timeout(Duration::from_secs(10))
///     .with_retries(1);
///
/// assert_eq!(config.base_url(), "https://api.inkress.com/api/v1");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    bearer_token: String,

    /// API endpoint, without the `/api/<version>` suffix.
    pub endpoint: String,

    /// API version path segment.
    pub api_version: String,

    /// Value of the `Client-Id` header, sent only when set.
    pub client_id: Option<String>,

    /// Default per-attempt timeout.
    pub timeout: Duration,

    /// Retries after the initial attempt.
    pub retries: u32,

    /// Extra headers sent with every request.
    pub headers: HeaderMap,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the token.
    #[must_use]
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client_id: None,
            timeout: DEFAULT_TIMEOUT,
            retries: RetryPolicy::DEFAULT_MAX_RETRIES,
            headers: HeaderMap::new(),
        }
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the client identifier.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the default per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the extra headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns `<endpoint>/api/<version>`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.endpoint.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Returns true if a non-empty bearer token is configured.
    #[must_use]
    pub fn has_bearer_token(&self) -> bool {
        !self.bearer_token.is_empty()
    }

    pub(crate) fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Retry policy derived from the configured budget.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new().with_max_retries(self.retries)
    }

    /// Applies a partial update; unset fields keep their current value.
    pub fn apply(&mut self, update: ConfigUpdate) {
        let ConfigUpdate {
            bearer_token,
            endpoint,
            api_version,
            client_id,
            timeout,
            retries,
            headers,
        } = update;

        if let Some(token) = bearer_token {
            self.bearer_token = token;
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(version) = api_version {
            self.api_version = version;
        }
        if let Some(client_id) = client_id {
            self.client_id = client_id;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        if let Some(retries) = retries {
            self.retries = retries;
        }
        if let Some(headers) = headers {
            self.headers = headers;
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bearer_token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("client_id", &self.client_id)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("headers", &self.headers)
            .finish()
    }
}

/// A partial configuration update.
///
/// `client_id` is doubly optional: `Some(None)` clears the identifier.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    /// New bearer token
    pub bearer_token: Option<String>,
    /// New endpoint
    pub endpoint: Option<String>,
    /// New API version
    pub api_version: Option<String>,
    /// New client identifier (`Some(None)` clears it)
    pub client_id: Option<Option<String>>,
    /// New default timeout
    pub timeout: Option<Duration>,
    /// New retry budget
    pub retries: Option<u32>,
    /// Replacement extra headers
    pub headers: Option<HeaderMap>,
}

/// Read-only view of a configuration without the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicConfig {
    /// API endpoint
    pub endpoint: String,
    /// API version
    pub api_version: String,
    /// Client identifier
    pub client_id: Option<String>,
    /// Default per-attempt timeout
    pub timeout: Duration,
    /// Retry budget
    pub retries: u32,
    /// Extra headers
    pub headers: HeaderMap,
}

impl From<&ClientConfig> for PublicConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_version: config.api_version.clone(),
            client_id: config.client_id.clone(),
            timeout: config.timeout,
            retries: config.retries,
            headers: config.headers.clone(),
        }
    }
}

//! Wire-level request/response types and the transport trait.

use std::borrow::Cow;
use std::sync::Arc;

use super::HttpError;

/// A fully-built HTTP request handed to a transport.
///
/// By the time a request reaches an [`HttpClient`] every header has been
/// merged and the body serialized; transports only move bytes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Absolute target URL, including any query string
    pub url: url::Url,
    /// Headers to send
    pub headers: http::HeaderMap,
    /// Serialized body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing values for `name`.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Layers `headers` over the current set.
    ///
    /// Each name present in `headers` replaces all existing values for that
    /// name; names not present are left untouched.
    #[must_use]
    pub fn with_headers(mut self, headers: &http::HeaderMap) -> Self {
        overlay_headers(&mut self.headers, headers);
        self
    }
}

/// Overlays `upper` onto `base` so that `upper` wins per header name.
///
/// Multi-valued names in `upper` keep all of their values.
pub(crate) fn overlay_headers(base: &mut http::HeaderMap, upper: &http::HeaderMap) {
    for name in upper.keys() {
        base.remove(name);
    }
    for (name, value) in upper {
        base.append(name.clone(), value.clone());
    }
}

/// A response as received from the server.
///
/// The body is fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as UTF-8, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// The transport seam of the client.
///
/// A transport takes a URL, method, headers, and optional body and returns
/// a status, headers, and body. Any implementation satisfying that contract
/// is interchangeable: [`ReqwestClient`](super::ReqwestClient) in
/// production, scripted mocks in tests.
///
/// Transports do not retry and do not enforce deadlines; both are handled
/// by [`ApiClient`](crate::client::ApiClient).
///
/// # Example
///
/// ```ignore
/// use inkress::transport::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request never produced a response:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - The transport's own timeout fires ([`HttpError::Timeout`])
    /// - The request could not be built ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}

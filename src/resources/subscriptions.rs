use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ApiError, ApiResponse, RequestOptions};
use crate::time::Sleeper;
use crate::transport::HttpClient;

const PATH: &str = "/billing_subscriptions";

/// Billing subscriptions, under `/billing_subscriptions`.
#[derive(Debug)]
pub struct Subscriptions<'a, H, S> {
    client: &'a ApiClient<H, S>,
}

impl<'a, H, S> Subscriptions<'a, H, S> {
    pub(super) const fn new(client: &'a ApiClient<H, S>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient, S: Sleeper> Subscriptions<'_, H, S> {
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn list<T, Q>(&self, params: &Q) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.client.get_with_query(PATH, params).await
    }

    /// Creates a subscription payment link.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn create_link<T, B>(&self, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.post(&format!("{PATH}/link"), data).await
    }

    /// Charges an existing subscription.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn charge<T, B>(&self, uid: &str, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.post(&format!("{PATH}/{uid}/charge"), data).await
    }

    /// Lists billing periods of a subscription.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn periods<T, Q>(&self, uid: &str, params: &Q) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.client
            .get_with_query(&format!("{PATH}/{uid}/periods"), params)
            .await
    }

    /// Cancels a subscription. Sent as a `POST` without a body.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn cancel<T: DeserializeOwned>(
        &self,
        uid: &str,
        code: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.client
            .request(
                &format!("{PATH}/{uid}/cancel/{code}"),
                RequestOptions::new(Method::POST),
            )
            .await
    }
}

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ApiError, ApiResponse};
use crate::time::Sleeper;
use crate::transport::HttpClient;

const PATH: &str = "/orders";

/// `/orders`
#[derive(Debug)]
pub struct Orders<'a, H, S> {
    client: &'a ApiClient<H, S>,
}

impl<'a, H, S> Orders<'a, H, S> {
    pub(super) const fn new(client: &'a ApiClient<H, S>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient, S: Sleeper> Orders<'_, H, S> {
    /// Creates an order; the response carries the payment link.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn create<T, B>(&self, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.post(PATH, data).await
    }

    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, id: u64) -> Result<ApiResponse<T>, ApiError> {
        self.client.get(&format!("{PATH}/{id}")).await
    }

    /// Updates an order's status.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn update<T, B>(&self, id: u64, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.put(&format!("{PATH}/{id}"), data).await
    }

    /// `GET /orders/status/{id}`
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn get_status<T: DeserializeOwned>(
        &self,
        id: u64,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.client.get(&format!("{PATH}/status/{id}")).await
    }

    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn list<T: DeserializeOwned>(&self) -> Result<ApiResponse<T>, ApiError> {
        self.client.get(PATH).await
    }
}

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ApiError, ApiResponse};
use crate::time::Sleeper;
use crate::transport::HttpClient;

const PATH: &str = "/products";

/// `/products`
#[derive(Debug)]
pub struct Products<'a, H, S> {
    client: &'a ApiClient<H, S>,
}

impl<'a, H, S> Products<'a, H, S> {
    pub(super) const fn new(client: &'a ApiClient<H, S>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient, S: Sleeper> Products<'_, H, S> {
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

    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, id: u64) -> Result<ApiResponse<T>, ApiError> {
        self.client.get(&format!("{PATH}/{id}")).await
    }

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
    pub async fn update<T, B>(&self, id: u64, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.put(&format!("{PATH}/{id}"), data).await
    }

    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn delete<T: DeserializeOwned>(&self, id: u64) -> Result<ApiResponse<T>, ApiError> {
        self.client.delete(&format!("{PATH}/{id}")).await
    }
}

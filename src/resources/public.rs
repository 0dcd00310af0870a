use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, ApiError, ApiResponse};
use crate::time::Sleeper;
use crate::transport::HttpClient;

const PATH: &str = "/public/m";

/// How to look up a public merchant.
///
/// Serializes to `username=<..>` or `domain.cname=<..>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MerchantLookup<'a> {
    #[serde(rename = "username")]
    Username(&'a str),
    #[serde(rename = "domain.cname")]
    Cname(&'a str),
}

/// Query for [`Public::merchant_fees`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuery<'a> {
    pub currency: &'a str,
    pub total: f64,
}

/// Storefront endpoints under `/public/m`.
#[derive(Debug)]
pub struct Public<'a, H, S> {
    client: &'a ApiClient<H, S>,
}

impl<'a, H, S> Public<'a, H, S> {
    pub(super) const fn new(client: &'a ApiClient<H, S>) -> Self {
        Self { client }
    }
}

impl<H: HttpClient, S: Sleeper> Public<'_, H, S> {
    /// Looks up a merchant by username or custom domain.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn merchant<T: DeserializeOwned>(
        &self,
        lookup: &MerchantLookup<'_>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.client.get_with_query(PATH, lookup).await
    }

    /// Fees the merchant charges for `total` in `currency`.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn merchant_fees<T: DeserializeOwned>(
        &self,
        username: &str,
        query: &FeeQuery<'_>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.client
            .get_with_query(&format!("{PATH}/{username}/fees"), query)
            .await
    }

    /// # Errors
    ///
    /// Returns the pipeline's [`ApiError`].
    pub async fn merchant_products<T, Q>(
        &self,
        username: &str,
        params: &Q,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.client
            .get_with_query(&format!("{PATH}/{username}/products"), params)
            .await
    }
}

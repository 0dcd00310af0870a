//! REST resource wrappers and the [`Inkress`] facade.
//!
//! Each resource borrows the shared [`ApiClient`] and maps one method to
//! one endpoint. Request bodies are anything [`Serialize`](serde::Serialize)
//! and responses decode into any [`DeserializeOwned`](serde::de::DeserializeOwned)
//! type; `serde_json::Value` works when no typed model is at hand.
//!
//! List methods take query parameters as a serializable map. Pass `&()` for
//! none; `null` members are left out of the query string.

mod billing_plans;
mod categories;
mod merchants;
mod orders;
mod products;
mod public;
mod subscriptions;
mod users;


pub use billing_plans::BillingPlans;
pub use categories::Categories;
pub use merchants::Merchants;
pub use orders::Orders;
pub use products::Products;
pub use public::{FeeQuery, MerchantLookup, Public};
pub use subscriptions::Subscriptions;
pub use users::Users;

use crate::client::{ApiClient, ClientConfig, ConfigUpdate, PublicConfig};
use crate::config::{ConfigError, field};
use crate::time::TokioSleeper;

/// Entry point bundling the API client with every resource.
///
/// # Example
///
/// ```no_run
/// use inkress::Inkress;
/// use inkress::client::ClientConfig;
/// use inkress::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let inkress = Inkress::new(
///     ReqwestClient::new(),
///     ClientConfig::new("jwt-token").with_client_id("m-merchant"),
/// )?;
///
/// let product = inkress
///     .products()
///     .get::<serde_json::Value>(42)
///     .await?;
/// println!("{:?}", product.into_payload());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Inkress<H, S = TokioSleeper> {
    client: ApiClient<H, S>,
}

impl<H> Inkress<H, TokioSleeper> {
    /// Creates a facade over `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if the bearer token is empty.
    pub fn new(transport: H, config: ClientConfig) -> Result<Self, ConfigError> {
        if !config.has_bearer_token() {
            return Err(ConfigError::missing(
                field::BEARER_TOKEN,
                "A bearer token is required to call the API.",
            ));
        }
        Ok(Self::from_client(ApiClient::new(transport, config)))
    }
}

impl<H, S> Inkress<H, S> {
    /// Wraps an existing client as-is.
    #[must_use]
    pub const fn from_client(client: ApiClient<H, S>) -> Self {
        Self { client }
    }

    /// The underlying request pipeline.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<H, S> {
        &self.client
    }

    /// Returns the configuration without the bearer token.
    #[must_use]
    pub fn config(&self) -> PublicConfig {
        self.client.config()
    }

    /// Merges a partial configuration update.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.client.update_config(update);
    }

    #[must_use]
    pub const fn merchants(&self) -> Merchants<'_, H, S> {
        Merchants::new(&self.client)
    }

    #[must_use]
    pub const fn categories(&self) -> Categories<'_, H, S> {
        Categories::new(&self.client)
    }

    #[must_use]
    pub const fn orders(&self) -> Orders<'_, H, S> {
        Orders::new(&self.client)
    }

    #[must_use]
    pub const fn products(&self) -> Products<'_, H, S> {
        Products::new(&self.client)
    }

    #[must_use]
    pub const fn billing_plans(&self) -> BillingPlans<'_, H, S> {
        BillingPlans::new(&self.client)
    }

    #[must_use]
    pub const fn subscriptions(&self) -> Subscriptions<'_, H, S> {
        Subscriptions::new(&self.client)
    }

    #[must_use]
    pub const fn users(&self) -> Users<'_, H, S> {
        Users::new(&self.client)
    }

    /// Public storefront endpoints.
    #[must_use]
    pub const fn public(&self) -> Public<'_, H, S> {
        Public::new(&self.client)
    }
}

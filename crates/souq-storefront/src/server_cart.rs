//! Server-side cart calls.
//!
//! Independent of the local cart: the backend keeps its own cart keyed by
//! store listing, not by catalog product.

use crate::config::StorefrontConfig;
use crate::StorefrontError;
use souq_commerce::catalog::ProductCard;
use souq_commerce::StoreProductId;
use souq_data::FetchClient;
use std::sync::Arc;

/// Sends add-to-cart requests to the backend.
#[derive(Debug, Clone)]
pub struct ServerCart {
    client: FetchClient,
    config: Arc<StorefrontConfig>,
}

impl ServerCart {
    pub fn new(client: FetchClient, config: Arc<StorefrontConfig>) -> Self {
        Self { client, config }
    }

    /// Add `quantity` units of a resolved product.
    ///
    /// A product without a store listing id fails with
    /// [`StorefrontError::MissingListingId`] and nothing is sent.
    pub async fn add_product(&self, product: &ProductCard, quantity: i64) -> Result<String, StorefrontError> {
        let listing_id = product.listing_id()?;
        self.add(listing_id, quantity).await
    }

    /// `POST /cart/add/{storeProductId}` with a form-encoded quantity.
    ///
    /// Returns the server's confirmation message.
    pub async fn add(&self, listing_id: &StoreProductId, quantity: i64) -> Result<String, StorefrontError> {
        if quantity < 1 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        let path = self.config.endpoints.cart_add(listing_id.as_str());
        let quantity_field = quantity.to_string();
        let response = self
            .client
            .post(path)
            .maybe_bearer_auth(self.config.auth_token())
            .accept("application/json")
            .form([("quantity", quantity_field.as_str())])
            .send()
            .await?
            .error_for_status()
            .inspect_err(|err| tracing::warn!(%listing_id, error = %err, "server cart add rejected"))?;

        let message = response
            .json::<serde_json::Value>()
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| "Product added to cart".to_string());
        tracing::debug!(%listing_id, quantity, "added to server cart");
        Ok(message)
    }
}

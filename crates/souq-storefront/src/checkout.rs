//! Order submission.

use crate::cart_store::CartStore;
use crate::config::StorefrontConfig;
use crate::StorefrontError;
use serde_json::Value;
use souq_commerce::checkout::{OrderReceipt, OrderRequest};
use souq_data::FetchClient;
use std::sync::Arc;

/// Turns the stored cart into an order.
#[derive(Debug, Clone)]
pub struct CheckoutSubmitter {
    client: FetchClient,
    config: Arc<StorefrontConfig>,
}

impl CheckoutSubmitter {
    pub fn new(client: FetchClient, config: Arc<StorefrontConfig>) -> Self {
        Self { client, config }
    }

    /// `POST /orders/create` with the current cart.
    ///
    /// An empty cart fails with [`StorefrontError::EmptyCart`] before any
    /// request is made. After a 2xx answer the ordered lines are taken out
    /// of the cart; lines added while the request was in flight stay. On
    /// any failure the cart is left exactly as it was.
    pub async fn submit(&self, cart: &CartStore) -> Result<OrderReceipt, StorefrontError> {
        let ordered = cart.cart();
        let request = OrderRequest::from_cart(&ordered)?;

        let response = self
            .client
            .post(&self.config.endpoints.order_create)
            .maybe_bearer_auth(self.config.auth_token())
            .accept("application/json")
            .json(&request)?
            .send()
            .await
            .inspect_err(|err| tracing::error!(error = %err, "checkout request failed"))?;

        if !response.is_success() {
            let err = StorefrontError::Http {
                status: response.status,
                message: response.message(),
            };
            tracing::warn!(status = response.status, error = %err, "checkout rejected; cart kept");
            return Err(err);
        }

        let body: Option<Value> = response.json().ok();
        let receipt = OrderReceipt::from_response(&request, body.as_ref());

        // The order exists server-side now; a failed clear must not hide that.
        if let Err(err) = cart.clear_ordered(ordered.items()) {
            tracing::error!(error = %err, "order placed but the cart could not be cleared");
        }
        tracing::info!(
            order_id = ?receipt.order_id,
            total = %receipt.total,
            items = receipt.item_count,
            "order placed"
        );
        Ok(receipt)
    }
}

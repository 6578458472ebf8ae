//! Order-creation payload and the receipt returned after checkout.

use crate::cart::{Cart, CartLineItem};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price as a decimal number.
    pub price: f64,
}

impl From<&CartLineItem> for OrderItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            price: item.unit_price.to_decimal(),
        }
    }
}

/// Body of `POST /orders/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    /// Grand total as a decimal number.
    pub total_amount: f64,
    #[serde(skip)]
    total: Money,
}

impl OrderRequest {
    /// Package a cart for submission.
    ///
    /// Fails with [`CommerceError::EmptyCart`] when there is nothing to order.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let total = cart.total()?;
        Ok(Self {
            items: cart.items().iter().map(OrderItem::from).collect(),
            total_amount: total.to_decimal(),
            total,
        })
    }

    /// The total this request was built with.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// What the shopper sees after a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: Option<OrderId>,
    pub message: String,
    pub total: Money,
    pub item_count: i64,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub const DEFAULT_MESSAGE: &'static str = "Order placed successfully!";

    /// Build a receipt from the server's response body, which may be empty.
    pub fn from_response(request: &OrderRequest, body: Option<&Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(Self::DEFAULT_MESSAGE)
            .to_string();

        Self {
            order_id: body.and_then(order_id),
            message,
            total: request.total(),
            item_count: request.item_count(),
            placed_at: Utc::now(),
        }
    }
}

/// `order_id`, `order.id`, `data.id` or a top-level `id`.
fn order_id(body: &Value) -> Option<OrderId> {
    let candidates = [
        body.get("order_id"),
        body.get("order").and_then(|o| o.get("id")),
        body.get("data").and_then(|d| d.get("id")),
        body.get("id"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| serde_json::from_value::<OrderId>(v.clone()).ok())
        .filter(|id| !id.is_empty())
}

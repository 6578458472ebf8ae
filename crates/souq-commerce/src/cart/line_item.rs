//! Cart line items and their persisted shape.

use crate::ids::{ProductId, StoreId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product placed in the cart, denormalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredLineItem", into = "StoredLineItem")]
pub struct CartLineItem {
    /// Catalog product id; unique within the cart.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Price of a single unit at the owning store.
    pub unit_price: Money,
    /// Image URL, if any.
    pub image: Option<String>,
    /// Owning store.
    pub store_id: StoreId,
    /// Owning store's display name.
    pub store_name: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: i64,
}

impl CartLineItem {
    /// Line total (unit price * quantity).
    pub fn total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }

    /// Decode one persisted row.
    ///
    /// Rows written without a `currency` field are priced in `currency`.
    pub fn from_stored(record: serde_json::Value, currency: Currency) -> Result<Self, serde_json::Error> {
        let stored: StoredLineItem = serde_json::from_value(record)?;
        Ok(stored.into_line_item(currency))
    }
}

/// What callers hand to the cart when adding a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
    pub store_id: StoreId,
    pub store_name: String,
    pub quantity: i64,
}

impl NewCartItem {
    /// A single unit of a product.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        store_id: impl Into<StoreId>,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image: None,
            store_id: store_id.into(),
            store_name: store_name.into(),
            quantity: 1,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub(crate) fn into_line_item(self) -> CartLineItem {
        CartLineItem {
            product_id: self.product_id,
            name: self.name,
            unit_price: self.unit_price,
            image: self.image,
            store_id: self.store_id,
            store_name: self.store_name,
            quantity: self.quantity,
        }
    }
}

/// On-disk representation.
///
/// Matches the layout written by earlier clients (`id`, `price` as a
/// decimal, `store` for the store name). Every field may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredLineItem {
    #[serde(alias = "productId")]
    id: ProductId,
    name: String,
    #[serde(alias = "unitPrice")]
    price: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(alias = "storeName")]
    store: String,
    store_id: StoreId,
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
}

impl Default for StoredLineItem {
    fn default() -> Self {
        Self {
            id: ProductId::default(),
            name: String::new(),
            price: serde_json::Value::Null,
            image: None,
            store: String::new(),
            store_id: StoreId::default(),
            quantity: 1,
            currency: None,
        }
    }
}

impl StoredLineItem {
    fn into_line_item(self, fallback: Currency) -> CartLineItem {
        let currency = self
            .currency
            .as_deref()
            .and_then(Currency::from_code)
            .unwrap_or(fallback);
        let unit_price = Money::from_json(&self.price, currency).unwrap_or(Money::zero(currency));
        CartLineItem {
            product_id: self.id,
            name: self.name,
            unit_price,
            image: self.image.filter(|s| !s.is_empty()),
            store_id: self.store_id,
            store_name: self.store,
            quantity: self.quantity,
        }
    }
}

impl From<StoredLineItem> for CartLineItem {
    fn from(stored: StoredLineItem) -> Self {
        stored.into_line_item(Currency::default())
    }
}

impl From<CartLineItem> for StoredLineItem {
    fn from(item: CartLineItem) -> Self {
        Self {
            id: item.product_id,
            name: item.name,
            price: serde_json::json!(item.unit_price.to_decimal()),
            image: item.image,
            store: item.store_name,
            store_id: item.store_id,
            quantity: item.quantity,
            currency: Some(item.unit_price.currency.code().to_string()),
        }
    }
}

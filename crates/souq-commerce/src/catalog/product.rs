//! Catalog products and their per-store listings.

use crate::cart::NewCartItem;
use crate::catalog::lenient;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, StoreId, StoreProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Offer text the backend uses to mean "no offer".
const NO_OFFER: &str = "no_offer";

/// A product in the catalog, possibly listed by several stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    pub id: ProductId,
    #[serde(alias = "product_name", default)]
    pub name: String,
    #[serde(alias = "desc", default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(alias = "categorie_id", default)]
    pub category_id: Option<CategoryId>,
    #[serde(alias = "prod_image", default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub availability: Option<String>,
    /// Store listings with pivot pricing; may be absent.
    #[serde(default, deserialize_with = "listings")]
    pub stores: Vec<StoreListing>,
}

/// One store's listing of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreListing {
    #[serde(alias = "store_id")]
    pub id: StoreId,
    #[serde(alias = "store_name", default)]
    pub name: String,
    #[serde(alias = "location", default, deserialize_with = "lenient::string")]
    pub address: Option<String>,
    #[serde(default)]
    pub pivot: ListingPivot,
}

/// The per-(product, store) association record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingPivot {
    /// Decimal number or decimal string, as sent.
    #[serde(default)]
    pub price: serde_json::Value,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sale_status: Option<String>,
    #[serde(alias = "offers_Desc", alias = "offers_desc", default, deserialize_with = "lenient::string")]
    pub offer_description: Option<String>,
    #[serde(default)]
    pub store_product_id: Option<StoreProductId>,
    /// Some backends only send the pivot row id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StoreProductId>,
}

impl ListingPivot {
    /// Parsed price; `None` when missing or unparseable.
    pub fn price(&self, currency: Currency) -> Option<Money> {
        Money::from_json(&self.price, currency)
    }
}

impl StoreListing {
    /// Listing id usable for server-side cart calls, when present.
    pub fn store_product_id(&self) -> Option<&StoreProductId> {
        self.pivot
            .store_product_id
            .as_ref()
            .or(self.pivot.id.as_ref())
            .filter(|id| !id.is_empty())
    }
}

impl CatalogProduct {
    /// The listing for a given store, if that store sells the product.
    pub fn listing_for(&self, store_id: &StoreId) -> Option<&StoreListing> {
        self.stores.iter().find(|s| &s.id == store_id)
    }

    /// Whether `store_id` lists this product.
    pub fn is_listed_by(&self, store_id: &StoreId) -> bool {
        self.listing_for(store_id).is_some()
    }

    /// Pick the listing that prices this product.
    ///
    /// With a store context, only that store's listing qualifies. Without
    /// one, the first listing is used.
    pub fn select_listing(&self, store_context: Option<&StoreId>) -> Option<&StoreListing> {
        match store_context {
            Some(store_id) => self.listing_for(store_id),
            None => self.stores.first(),
        }
    }

    /// Resolve the product for display under an optional store context.
    ///
    /// A product with no usable listing degrades to a zero price and an
    /// "Unknown Store" label instead of failing.
    pub fn resolve(&self, store_context: Option<&StoreId>, currency: Currency) -> ProductCard {
        let listing = self.select_listing(store_context);
        let price = listing
            .and_then(|l| l.pivot.price(currency))
            .unwrap_or(Money::zero(currency));

        ProductCard {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category_id: self.category_id.clone(),
            image: self.image.clone(),
            availability: self.availability.clone(),
            price,
            store_id: listing.map(|l| l.id.clone()),
            store_name: listing
                .map(|l| l.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown Store".to_string()),
            store_location: listing
                .and_then(|l| l.address.clone())
                .unwrap_or_else(|| "Unknown Location".to_string()),
            sale_status: listing
                .and_then(|l| l.pivot.sale_status.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            offer_description: listing
                .and_then(|l| l.pivot.offer_description.clone())
                .filter(|o| o != NO_OFFER),
            store_product_id: listing.and_then(|l| l.store_product_id().cloned()),
            stores: self.stores.clone(),
        }
    }
}

/// A product resolved against one listing, ready to render or add to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub image: Option<String>,
    pub availability: Option<String>,
    pub price: Money,
    /// `None` when the product has no listing under the active context.
    pub store_id: Option<StoreId>,
    pub store_name: String,
    pub store_location: String,
    pub sale_status: String,
    /// Offer text; the backend's "no offer" marker is dropped.
    pub offer_description: Option<String>,
    pub store_product_id: Option<StoreProductId>,
    /// Every listing of the product, for membership filtering.
    pub stores: Vec<StoreListing>,
}

impl ProductCard {
    /// Human label for the sale status ("On Sale" for `on_sale`).
    pub fn sale_label(&self) -> &str {
        match self.sale_status.as_str() {
            "on_sale" => "On Sale",
            other => other,
        }
    }

    /// Whether `store_id` lists this product.
    pub fn is_listed_by(&self, store_id: &StoreId) -> bool {
        self.stores.iter().any(|s| &s.id == store_id)
    }

    /// Build the local cart entry for one unit of this product.
    ///
    /// Fails when the product resolved to no store: it cannot be bought.
    pub fn to_cart_item(&self) -> Result<NewCartItem, CommerceError> {
        let store_id = self
            .store_id
            .clone()
            .ok_or_else(|| CommerceError::NoStoreListing {
                product_name: self.name.clone(),
            })?;
        Ok(NewCartItem::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            store_id,
            self.store_name.clone(),
        )
        .with_image(self.image.clone()))
    }

    /// The store-specific listing id, required for server-side cart calls.
    pub fn listing_id(&self) -> Result<&StoreProductId, CommerceError> {
        self.store_product_id
            .as_ref()
            .ok_or_else(|| CommerceError::MissingListingId {
                product_name: self.name.clone(),
            })
    }
}

/// `stores` may be `null`, missing, or contain malformed rows; keep what decodes.
fn listings<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<StoreListing>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(rows) => rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_store_product() -> CatalogProduct {
        serde_json::from_value(json!({
            "id": 10,
            "product_name": "Zaatar",
            "desc": "Thyme blend",
            "categorie_id": 2,
            "prod_image": "products/zaatar.png",
            "stores": [
                {
                    "id": 1,
                    "store_name": "Homs Spices",
                    "address": "Homs",
                    "pivot": { "price": "4.00", "sale_status": "on_sale", "offers_Desc": "no_offer", "id": 101 }
                },
                {
                    "id": 2,
                    "store_name": "Latakia Pantry",
                    "pivot": { "price": 3.5, "offers_Desc": "2 for 1", "store_product_id": 202 }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_backend_shape() {
        let product = two_store_product();
        assert_eq!(product.name, "Zaatar");
        assert_eq!(product.category_id, Some(CategoryId::new("2")));
        assert_eq!(product.stores.len(), 2);
        assert!(product.is_listed_by(&StoreId::new("2")));
        assert!(!product.is_listed_by(&StoreId::new("3")));
    }

    #[test]
    fn test_resolve_without_context_uses_first_listing() {
        let card = two_store_product().resolve(None, Currency::USD);
        assert_eq!(card.price, Money::new(400, Currency::USD));
        assert_eq!(card.store_name, "Homs Spices");
        assert_eq!(card.sale_label(), "On Sale");
        assert!(card.offer_description.is_none());
        assert_eq!(card.store_product_id, Some(StoreProductId::new("101")));
    }

    #[test]
    fn test_resolve_with_context_uses_that_store() {
        let card = two_store_product().resolve(Some(&StoreId::new("2")), Currency::USD);
        assert_eq!(card.price, Money::new(350, Currency::USD));
        assert_eq!(card.store_id, Some(StoreId::new("2")));
        assert_eq!(card.offer_description.as_deref(), Some("2 for 1"));
        assert_eq!(card.store_location, "Unknown Location");
        assert_eq!(card.store_product_id, Some(StoreProductId::new("202")));
    }

    #[test]
    fn test_missing_store_data_degrades() {
        let product: CatalogProduct =
            serde_json::from_value(json!({ "id": 1, "product_name": "Bare", "stores": null })).unwrap();
        let card = product.resolve(None, Currency::USD);
        assert!(card.price.is_zero());
        assert_eq!(card.store_name, "Unknown Store");
        assert_eq!(card.sale_status, "unknown");
        assert!(card.store_id.is_none());
        assert_eq!(
            card.to_cart_item(),
            Err(CommerceError::NoStoreListing {
                product_name: "Bare".to_string()
            })
        );
        assert!(matches!(
            card.listing_id(),
            Err(CommerceError::MissingListingId { .. })
        ));
    }

    #[test]
    fn test_unparseable_price_is_zero() {
        let product: CatalogProduct = serde_json::from_value(json!({
            "id": 1,
            "stores": [{ "id": 1, "pivot": { "price": "call us" } }]
        }))
        .unwrap();
        assert!(product.resolve(None, Currency::USD).price.is_zero());
    }

    #[test]
    fn test_malformed_listing_rows_are_skipped() {
        let product: CatalogProduct = serde_json::from_value(json!({
            "id": 1,
            "stores": [{ "id": 1, "pivot": { "price": 2 } }, "garbage"]
        }))
        .unwrap();
        assert_eq!(product.stores.len(), 1);
    }

    #[test]
    fn test_to_cart_item() {
        let card = two_store_product().resolve(Some(&StoreId::new("1")), Currency::USD);
        let item = card.to_cart_item().unwrap();
        assert_eq!(item.product_id, ProductId::new("10"));
        assert_eq!(item.store_name, "Homs Spices");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image.as_deref(), Some("products/zaatar.png"));
    }
}

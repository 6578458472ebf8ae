//! Client-side product filtering.

use crate::catalog::ProductCard;
use crate::ids::StoreId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Narrows a list of resolved products.
///
/// Every set criterion must match. Store membership is checked against the
/// product's full listing set, so a product sold by several stores passes
/// for each of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub store: Option<StoreId>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    /// Case-insensitive substring of name or description.
    pub query: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only products listed by `store`.
    pub fn with_store(mut self, store: impl Into<StoreId>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Inclusive price bounds on the resolved price.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Text query; blank queries are ignored.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        let trimmed = query.trim();
        self.query = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.query.is_none()
    }

    pub fn matches(&self, product: &ProductCard) -> bool {
        if let Some(store) = &self.store {
            if !product.is_listed_by(store) {
                return false;
            }
        }
        if let Some(min) = &self.min_price {
            if product.price.amount_cents < min.amount_cents {
                return false;
            }
        }
        if let Some(max) = &self.max_price {
            if product.price.amount_cents > max.amount_cents {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&query);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }

    /// Keep matching products, preserving order.
    pub fn apply(&self, products: Vec<ProductCard>) -> Vec<ProductCard> {
        if self.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogProduct;
    use crate::money::Currency;
    use serde_json::json;

    fn card(id: u32, name: &str, price: &str, stores: &[u32]) -> ProductCard {
        let listings: Vec<_> = stores
            .iter()
            .map(|s| json!({ "id": s, "store_name": format!("Store {s}"), "pivot": { "price": price } }))
            .collect();
        let product: CatalogProduct = serde_json::from_value(json!({
            "id": id,
            "product_name": name,
            "desc": format!("{name} description"),
            "stores": listings
        }))
        .unwrap();
        product.resolve(None, Currency::USD)
    }

    #[test]
    fn test_store_membership() {
        let products = vec![card(1, "Tea", "2", &[1, 2]), card(2, "Coffee", "3", &[2])];
        let filtered = ProductFilter::new().with_store("1").apply(products);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Tea");
    }

    #[test]
    fn test_multi_listed_product_passes_each_store() {
        let tea = card(1, "Tea", "2", &[1, 2]);
        assert!(ProductFilter::new().with_store("1").matches(&tea));
        assert!(ProductFilter::new().with_store("2").matches(&tea));
        assert!(!ProductFilter::new().with_store("3").matches(&tea));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let products = vec![
            card(1, "A", "1.00", &[1]),
            card(2, "B", "5.00", &[1]),
            card(3, "C", "9.99", &[1]),
        ];
        let filter = ProductFilter::new().with_price_range(
            Some(Money::new(100, Currency::USD)),
            Some(Money::new(500, Currency::USD)),
        );
        let names: Vec<_> = filter.apply(products).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_query_matches_name_or_description() {
        let tea = card(1, "Green Tea", "2", &[1]);
        assert!(ProductFilter::new().with_query("green").matches(&tea));
        assert!(ProductFilter::new().with_query("DESCRIPTION").matches(&tea));
        assert!(!ProductFilter::new().with_query("coffee").matches(&tea));
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let filter = ProductFilter::new().with_query("   ");
        assert!(filter.is_empty());
    }
}

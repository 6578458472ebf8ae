//! Stores and the store browsing context.

use crate::catalog::lenient;
use crate::ids::StoreId;
use serde::{Deserialize, Serialize};

/// The store a cart belongs to, or the store a shopper is browsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreContext {
    pub store_id: StoreId,
    pub store_name: String,
}

impl StoreContext {
    pub fn new(store_id: impl Into<StoreId>, store_name: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            store_name: store_name.into(),
        }
    }
}

/// A store as shown in the store grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStore")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Image path or URL as sent by the backend.
    pub image: Option<String>,
    pub location: String,
    pub rating: f64,
    pub raters_number: u64,
    pub state: String,
    pub description: String,
    pub categories: Vec<String>,
    pub open_hours: String,
}

impl Store {
    /// The browsing context for this store.
    pub fn context(&self) -> StoreContext {
        StoreContext::new(self.id.clone(), self.name.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStore {
    id: StoreId,
    #[serde(alias = "store_name", deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    image: Option<String>,
    #[serde(alias = "location", deserialize_with = "lenient::string")]
    address: Option<String>,
    #[serde(alias = "rate_value", alias = "rating", deserialize_with = "lenient::float")]
    rate: Option<f64>,
    #[serde(alias = "ratersNumber", deserialize_with = "lenient::count")]
    raters_number: Option<u64>,
    #[serde(alias = "stateUse", alias = "state", deserialize_with = "lenient::string")]
    state_use: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    categories: Vec<String>,
    #[serde(alias = "openHours", deserialize_with = "lenient::string")]
    open_hours: Option<String>,
}

impl From<RawStore> for Store {
    fn from(raw: RawStore) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| format!("Store {}", raw.id)),
            id: raw.id,
            image: raw.image,
            location: raw.address.unwrap_or_else(|| "Unknown Location".to_string()),
            rating: raw.rate.unwrap_or(0.0),
            raters_number: raw.raters_number.unwrap_or(0),
            state: raw.state_use.unwrap_or_else(|| "unknown".to_string()),
            description: raw
                .description
                .unwrap_or_else(|| "No description available".to_string()),
            categories: if raw.categories.is_empty() {
                vec!["General".to_string()]
            } else {
                raw.categories
            },
            open_hours: raw
                .open_hours
                .unwrap_or_else(|| "Hours not specified".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_store_shape() {
        let store: Store = serde_json::from_value(json!({
            "id": 4,
            "store_name": "Damascus Sweets",
            "address": "Old City",
            "rate_value": "4.5",
            "raters_number": 20,
            "open_hours": "9-17"
        }))
        .unwrap();
        assert_eq!(store.id.as_str(), "4");
        assert_eq!(store.name, "Damascus Sweets");
        assert_eq!(store.location, "Old City");
        assert_eq!(store.rating, 4.5);
        assert_eq!(store.raters_number, 20);
        assert_eq!(store.open_hours, "9-17");
        assert_eq!(store.context(), StoreContext::new("4", "Damascus Sweets"));
    }

    #[test]
    fn test_fallbacks() {
        let store: Store = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(store.location, "Unknown Location");
        assert_eq!(store.rating, 0.0);
        assert_eq!(store.description, "No description available");
        assert_eq!(store.open_hours, "Hours not specified");
        assert_eq!(store.categories, vec!["General".to_string()]);
        assert_eq!(store.state, "unknown");
    }
}

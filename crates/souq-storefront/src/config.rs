//! Storefront configuration.

use serde::{Deserialize, Serialize};
use souq_commerce::Currency;
use std::time::Duration;

/// Backend paths, relative to [`StorefrontConfig::api_base_url`].
///
/// `{id}` is replaced with the category or listing id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub categories: String,
    pub category_products: String,
    pub stores: String,
    pub cart_add: String,
    pub order_create: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            categories: "/categories".to_string(),
            category_products: "/category/{id}/products".to_string(),
            stores: "/stores".to_string(),
            cart_add: "/cart/add/{id}".to_string(),
            order_create: "/orders/create".to_string(),
        }
    }
}

impl Endpoints {
    pub fn category_products(&self, category_id: &str) -> String {
        self.category_products.replace("{id}", category_id)
    }

    pub fn cart_add(&self, store_product_id: &str) -> String {
        self.cart_add.replace("{id}", store_product_id)
    }
}

/// Everything the services need to reach the backend and persist state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub api_base_url: String,
    /// Base for relative image paths.
    pub asset_base_url: String,
    pub currency: Currency,
    /// Storage key holding the cart.
    pub cart_key: String,
    pub request_timeout_secs: u64,
    /// Bearer token for authenticated calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    pub endpoints: Endpoints,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            asset_base_url: "http://127.0.0.1:8000/storage".to_string(),
            currency: Currency::default(),
            cart_key: "cart".to_string(),
            request_timeout_secs: 30,
            auth_token: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Problems that would make every request fail.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("asset_base_url", &self.asset_base_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                errors.push(format!("{name} must be an http(s) URL, got '{value}'"));
            }
        }
        if self.cart_key.trim().is_empty() {
            errors.push("cart_key cannot be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.auth_token().is_none());
    }

    #[test]
    fn test_endpoint_templates() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.category_products("4"), "/category/4/products");
        assert_eq!(endpoints.cart_add("91"), "/cart/add/91");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{ "api_base_url": "https://souq.example/api", "currency": "EUR" }"#)
                .unwrap();
        assert_eq!(config.api_base_url, "https://souq.example/api");
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_validation_errors() {
        let config = StorefrontConfig {
            api_base_url: "localhost".to_string(),
            cart_key: " ".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}

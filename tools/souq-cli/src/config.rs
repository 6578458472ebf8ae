//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use souq_storefront::StorefrontConfig;

/// Environment variable overriding `storefront.api_base_url`.
pub const ENV_API_URL: &str = "SOUQ_API_URL";
/// Environment variable supplying the bearer token.
pub const ENV_TOKEN: &str = "SOUQ_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding local state such as the cart.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Backend and cart settings.
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `SOUQ_API_URL` / `SOUQ_TOKEN` overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_TOKEN).ok(),
        );
    }

    fn apply_overrides(&mut self, api_url: Option<String>, token: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.storefront.api_base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.storefront.auth_token = Some(token);
        }
    }
}

/// Generate a default souq.toml config file.
pub fn generate_default_config() -> String {
    let defaults = StorefrontConfig::default();
    format!(
        r#"# Souq storefront configuration

# Where the cart is kept (relative to this file).
data_dir = ".souq"

[storefront]
api_base_url = "{api}"
asset_base_url = "{assets}"
currency = "{currency}"
cart_key = "{cart_key}"
request_timeout_secs = {timeout}
# auth_token = "..."   # or set {token_env}

[storefront.endpoints]
categories = "{categories}"
category_products = "{category_products}"
stores = "{stores}"
cart_add = "{cart_add}"
order_create = "{order_create}"
"#,
        api = defaults.api_base_url,
        assets = defaults.asset_base_url,
        currency = defaults.currency.code(),
        cart_key = defaults.cart_key,
        timeout = defaults.request_timeout_secs,
        token_env = ENV_TOKEN,
        categories = defaults.endpoints.categories,
        category_products = defaults.endpoints.category_products,
        stores = defaults.endpoints.stores,
        cart_add = defaults.endpoints.cart_add,
        order_create = defaults.endpoints.order_create,
    )
}

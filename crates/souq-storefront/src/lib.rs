//! Cart, catalog and checkout services for the Souq marketplace client.
//!
//! - [`CartStore`]: durable mono-store cart
//! - [`CatalogBrowser`]: categories, stores and per-store product pricing
//! - [`CartView`]: cart screen state and quantity controls
//! - [`CheckoutSubmitter`]: order creation
//! - [`ServerCart`]: backend add-to-cart by store listing
//!
//! [`Storefront`] wires them together over one configuration, one
//! transport and one key-value store.
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_storefront::{Storefront, StorefrontConfig};
//!
//! let storefront = Storefront::connect(StorefrontConfig::default(), Cache::open_dir(".souq")?)?;
//! let categories = storefront.catalog().list_categories().await?;
//! let products = storefront
//!     .catalog()
//!     .list_products_for_category(&categories[0].id, None)
//!     .await?;
//!
//! storefront.cart().add_item(products[0].to_cart_item()?)?;
//! let receipt = storefront.checkout().submit(storefront.cart()).await?;
//! ```

pub mod cart_store;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod envelope;
mod error;
pub mod presentation;
pub mod server_cart;
pub mod view;

pub use cart_store::CartStore;
pub use catalog::CatalogBrowser;
pub use checkout::CheckoutSubmitter;
pub use config::{Endpoints, StorefrontConfig};
pub use error::StorefrontError;
pub use presentation::{CartLine, CartSnapshot, CartView};
pub use server_cart::ServerCart;
pub use view::{CatalogRequest, CatalogView, FetchTicket};

use souq_cache::Cache;
use souq_data::{FetchClient, ReqwestTransport, Transport};
use std::sync::Arc;

/// One application instance: shared config, HTTP client and cart.
#[derive(Debug)]
pub struct Storefront {
    config: Arc<StorefrontConfig>,
    cart: CartStore,
    catalog: CatalogBrowser,
    checkout: CheckoutSubmitter,
    server_cart: ServerCart,
}

impl Storefront {
    /// Build every service over the given transport and storage.
    pub fn new(config: StorefrontConfig, transport: Arc<dyn Transport>, cache: Cache) -> Self {
        let config = Arc::new(config);
        let client = FetchClient::new(transport).with_base_url(config.api_base_url.clone());
        Self {
            cart: CartStore::new(cache, config.cart_key.clone(), config.currency),
            catalog: CatalogBrowser::new(client.clone(), Arc::clone(&config)),
            checkout: CheckoutSubmitter::new(client.clone(), Arc::clone(&config)),
            server_cart: ServerCart::new(client, Arc::clone(&config)),
            config,
        }
    }

    /// Build over a real HTTP transport using the configured timeout.
    pub fn connect(config: StorefrontConfig, cache: Cache) -> Result<Self, StorefrontError> {
        let transport = ReqwestTransport::with_timeout(config.request_timeout())?;
        Ok(Self::new(config, Arc::new(transport), cache))
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_view(&self) -> CartView<'_> {
        CartView::new(&self.cart)
    }

    pub fn catalog(&self) -> &CatalogBrowser {
        &self.catalog
    }

    pub fn checkout(&self) -> &CheckoutSubmitter {
        &self.checkout
    }

    pub fn server_cart(&self) -> &ServerCart {
        &self.server_cart
    }
}

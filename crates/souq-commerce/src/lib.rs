//! Marketplace domain types and rules for Souq.
//!
//! - **Catalog**: categories, stores, products with per-store listings
//! - **Cart**: the mono-store cart, line items, totals
//! - **Checkout**: order-creation requests and receipts
//!
//! Everything here is synchronous and free of I/O; persistence and HTTP
//! live in `souq-cache`, `souq-data` and `souq-storefront`.
//!
//! # Example
//!
//! ```rust
//! use souq_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::USD);
//! cart.add_item(NewCartItem::new("1", "Tea", Money::new(1000, Currency::USD), "1", "Damascus Tea"))
//!     .unwrap();
//!
//! let conflict = cart.add_item(NewCartItem::new("9", "Soap", Money::new(500, Currency::USD), "2", "Aleppo Soap"));
//! assert!(matches!(conflict, Err(CommerceError::StoreConflict { .. })));
//! assert_eq!(cart.total().unwrap().display(), "$10.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        resolve_media_url, CatalogProduct, Category, CategoryIcon, ListingPivot, ProductCard,
        ProductFilter, RawCategory, Store, StoreContext, StoreListing,
    };

    // Cart
    pub use crate::cart::{compute_total, Cart, CartLineItem, NewCartItem};

    // Checkout
    pub use crate::checkout::{OrderItem, OrderReceipt, OrderRequest};
}

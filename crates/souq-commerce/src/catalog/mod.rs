//! Catalog module.
//!
//! Categories, stores, products with per-store listings, and filtering.

mod category;
mod filter;
pub(crate) mod lenient;
mod media;
mod product;
mod store;

pub use category::{Category, CategoryIcon, RawCategory};
pub use filter::ProductFilter;
pub use media::resolve_media_url;
pub use product::{CatalogProduct, ListingPivot, ProductCard, StoreListing};
pub use store::{Store, StoreContext};

//! Type-safe key-value store for Souq client state.
//!
//! Stands in for browser local storage: a handful of namespaced keys, each
//! holding a JSON document. Backends are pluggable; an in-memory store is
//! used by tests and a file-per-key store by the CLI.
//!
//! # Example
//!
//! ```rust
//! use souq_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Item {
//!     id: String,
//!     quantity: i64,
//! }
//!
//! let cache = Cache::memory();
//! cache.set("cart", &vec![Item { id: "1".into(), quantity: 2 }]).unwrap();
//!
//! let items: Option<Vec<Item>> = cache.get("cart").unwrap();
//! assert_eq!(items.unwrap()[0].quantity, 2);
//!
//! cache.delete("cart").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}

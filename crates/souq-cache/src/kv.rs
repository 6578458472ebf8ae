//! Key-Value store wrapper with automatic serialization.

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Type-safe cache over a pluggable [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and shares the
/// underlying store.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing backend.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// An empty in-memory store.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// A file-backed store rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("~/.local/share/souq")?;
    /// ```
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartLineItem>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let user_id = 42;
/// let key = souq_cache::cache_key!("cart", user_id);
/// assert_eq!(key, "cart:42");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        quantity: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::memory();
        let entries = vec![Entry { name: "tea".into(), quantity: 2 }];
        cache.set("cart", &entries).unwrap();
        let back: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert_eq!(back, Some(entries));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::memory();
        let value: Option<Vec<Entry>> = cache.get("nope").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("nope").unwrap());
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", b"{not json").unwrap();
        let cache = Cache::new(backend);
        let err = cache.get::<Vec<Entry>>("cart").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = Cache::memory();
        let other = cache.clone();
        cache.set("k", &1).unwrap();
        assert_eq!(other.get::<i32>("k").unwrap(), Some(1));
        other.delete("k").unwrap();
        assert!(cache.keys().unwrap().is_empty());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "guest", 3), "cart:guest:3");
    }
}

//! Durable cart state.
//!
//! [`CartStore`] is the single source of truth for the active cart. It is
//! built once per application instance and handed to every consumer by
//! reference. Each mutation is a read-modify-write of one storage key.
//!
//! Writes from this process are serialized; another process sharing the
//! same storage can still interleave with us and lose an update.

use crate::StorefrontError;
use serde_json::Value;
use souq_cache::Cache;
use souq_commerce::cart::{Cart, CartLineItem, NewCartItem};
use souq_commerce::catalog::StoreContext;
use souq_commerce::{Currency, ProductId};
use std::sync::{Mutex, MutexGuard};

/// The persisted mono-store cart.
#[derive(Debug)]
pub struct CartStore {
    cache: Cache,
    key: String,
    currency: Currency,
    write_lock: Mutex<()>,
}

impl CartStore {
    pub fn new(cache: Cache, key: impl Into<String>, currency: Currency) -> Self {
        Self {
            cache,
            key: key.into(),
            currency,
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Current line items, in insertion order.
    ///
    /// Never fails: unreadable storage is logged and reads as an empty cart.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.cart().into_items()
    }

    /// Current cart, with the same fallback as [`CartStore::items`].
    pub fn cart(&self) -> Cart {
        match self.load() {
            Ok(cart) => cart,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to read cart; showing it as empty");
                Cart::new(self.currency)
            }
        }
    }

    /// Add a product, merging with an existing line for the same product.
    ///
    /// Fails with [`StorefrontError::StoreConflict`] when the cart belongs to
    /// another store; the stored cart is untouched in that case.
    pub fn add_item(&self, item: NewCartItem) -> Result<(), StorefrontError> {
        let product_id = item.product_id.clone();
        let quantity = item.quantity;
        self.mutate(|cart| {
            cart.add_item(item)?;
            Ok(true)
        })
        .map(|_| tracing::debug!(%product_id, quantity, "added to cart"))
        .inspect_err(|err| match err {
            StorefrontError::StoreConflict { existing_store_name, .. } => {
                tracing::info!(%product_id, existing_store = %existing_store_name, "cart belongs to another store")
            }
            other => tracing::warn!(%product_id, error = %other, "add to cart failed"),
        })
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// Returns whether the cart changed. An unknown product id changes
    /// nothing and is not an error; only storage failures are.
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) -> Result<bool, StorefrontError> {
        let changed = self.mutate(|cart| Ok(cart.update_quantity(product_id, quantity)))?;
        tracing::debug!(%product_id, quantity, changed, "updated cart quantity");
        Ok(changed)
    }

    /// Remove a line. Removing an absent product is not an error.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        let removed = self.mutate(|cart| Ok(cart.remove_item(product_id)))?;
        tracing::debug!(%product_id, removed, "removed from cart");
        Ok(removed)
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) -> Result<(), StorefrontError> {
        let _guard = self.lock();
        self.cache.delete(&self.key).map_err(|err| {
            tracing::error!(key = %self.key, error = %err, "failed to clear cart");
            StorefrontError::from(err)
        })?;
        tracing::debug!(key = %self.key, "cart cleared");
        Ok(())
    }

    /// Remove lines that were just ordered, keeping anything added since.
    ///
    /// When the cart still holds exactly `ordered`, the key is deleted as
    /// with [`CartStore::clear`].
    pub fn clear_ordered(&self, ordered: &[CartLineItem]) -> Result<(), StorefrontError> {
        let changed = self.mutate(|cart| Ok(cart.remove_ordered(ordered)))?;
        tracing::debug!(key = %self.key, lines = ordered.len(), changed, "ordered lines removed from cart");
        Ok(())
    }

    /// The store that owns the cart, or `None` when it is empty.
    pub fn store_context(&self) -> Option<StoreContext> {
        self.cart().store_context()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.cart().item_count()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read-modify-write under the write lock. `f` returns whether it
    /// changed anything; nothing is written otherwise.
    fn mutate<F>(&self, f: F) -> Result<bool, StorefrontError>
    where
        F: FnOnce(&mut Cart) -> Result<bool, StorefrontError>,
    {
        let _guard = self.lock();
        let mut cart = self.load()?;
        if !f(&mut cart)? {
            return Ok(false);
        }
        self.save(&cart)?;
        Ok(true)
    }

    /// Load the stored cart.
    ///
    /// Undecodable contents count as an empty cart; only storage I/O fails.
    fn load(&self) -> Result<Cart, StorefrontError> {
        let stored: Option<Value> = match self.cache.get(&self.key) {
            Ok(value) => value,
            Err(err) if err.is_corrupt() => {
                tracing::warn!(key = %self.key, error = %err, "stored cart is not valid JSON; starting empty");
                None
            }
            Err(err) => return Err(err.into()),
        };

        let records = match stored {
            None | Some(Value::Null) => return Ok(Cart::new(self.currency)),
            Some(Value::Array(records)) => records,
            Some(other) => {
                tracing::warn!(key = %self.key, kind = %json_kind(&other), "stored cart is not a list; starting empty");
                return Ok(Cart::new(self.currency));
            }
        };

        let total = records.len();
        let items: Vec<CartLineItem> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match CartLineItem::from_stored(record, self.currency) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!(key = %self.key, index, error = %err, "skipping malformed cart entry");
                    None
                }
            })
            .collect();
        let malformed = total - items.len();
        let (cart, invalid) = Cart::restore(items, self.currency);
        let dropped = malformed + invalid;
        if dropped > 0 {
            tracing::warn!(key = %self.key, dropped, "discarded invalid cart entries");
        }
        Ok(cart)
    }

    fn save(&self, cart: &Cart) -> Result<(), StorefrontError> {
        let result = if cart.is_empty() {
            self.cache.delete(&self.key)
        } else {
            self.cache.set(&self.key, cart.items())
        };
        result.map_err(|err| {
            tracing::error!(key = %self.key, error = %err, "failed to save cart");
            StorefrontError::from(err)
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use souq_cache::{KvBackend, MemoryBackend};
    use souq_commerce::Money;
    use std::sync::Arc;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn item(id: &str, cents: i64, store: &str) -> NewCartItem {
        NewCartItem::new(id, format!("Product {id}"), usd(cents), store, format!("Store {store}"))
    }

    fn store_over(backend: Arc<MemoryBackend>) -> CartStore {
        CartStore::new(Cache::new(backend), "cart", Currency::USD)
    }

    #[test]
    fn test_add_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        store.add_item(item("1", 1000, "s1")).unwrap();

        let reopened = store_over(backend);
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.store_context(), Some(StoreContext::new("s1", "Store s1")));
    }

    #[test]
    fn test_legacy_payload_is_read() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(
                "cart",
                br#"[{"id": 3, "name": "Soap", "price": "2.50", "store": "Aleppo", "storeId": 9, "quantity": 2}]"#,
            )
            .unwrap();
        let store = store_over(backend);
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price, usd(250));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_legacy_payload_takes_configured_currency() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set("cart", br#"[{"id": 3, "price": "2.50", "store": "Aleppo", "storeId": 9, "quantity": 2}]"#)
            .unwrap();
        let store = CartStore::new(Cache::new(backend), "cart", Currency::SYP);
        let items = store.items();
        assert_eq!(items[0].unit_price, Money::new(250, Currency::SYP));
        assert_eq!(store.cart().total().unwrap(), Money::new(500, Currency::SYP));

        store
            .add_item(NewCartItem::new("4", "Oil", Money::new(1000, Currency::SYP), "9", "Aleppo"))
            .unwrap();
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_clear_ordered_keeps_new_lines() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        store.add_item(item("1", 100, "s1")).unwrap();
        let ordered = store.items();

        store.add_item(item("2", 300, "s1")).unwrap();
        store.clear_ordered(&ordered).unwrap();
        let left = store.items();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].product_id.as_str(), "2");

        store.clear_ordered(&left).unwrap();
        assert!(!backend.exists("cart").unwrap());
    }

    #[test]
    fn test_corrupt_storage_reads_empty_and_recovers() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", b"{{not json").unwrap();
        let store = store_over(backend);
        assert!(store.items().is_empty());
        assert!(store.store_context().is_none());

        store.add_item(item("1", 100, "s2")).unwrap();
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_non_list_and_bad_rows() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("cart", br#"{"id": 1}"#).unwrap();
        let store = store_over(backend.clone());
        assert!(store.items().is_empty());

        backend
            .set("cart", br#"["junk", {"id": 1, "storeId": 1, "price": 1}, {"id": 2, "storeId": 1, "quantity": 0}]"#)
            .unwrap();
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_unknown_id_update_is_a_noop() {
        let store = store_over(Arc::new(MemoryBackend::new()));
        store.add_item(item("1", 100, "s1")).unwrap();
        assert!(!store.update_quantity(&ProductId::new("missing"), 3).unwrap());
        assert!(!store.remove_item(&ProductId::new("missing")).unwrap());
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_quota_failure_is_reported_and_cart_kept() {
        let store = store_over(Arc::new(MemoryBackend::with_quota(200)));
        store.add_item(item("1", 100, "s1")).unwrap();
        let before = store.items();

        let big = item("2", 100, "s1").with_image(Some("x".repeat(500)));
        let err = store.add_item(big).unwrap_err();
        assert!(matches!(err, StorefrontError::Persistence(_)));
        assert_eq!(store.items(), before);
    }

    #[test]
    fn test_clear_removes_key() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        store.add_item(item("1", 100, "s1")).unwrap();
        store.clear().unwrap();
        assert!(!backend.exists("cart").unwrap());
        store.clear().unwrap();
    }

    #[test]
    fn test_removing_last_item_deletes_key() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        store.add_item(item("1", 100, "s1")).unwrap();
        store.update_quantity(&ProductId::new("1"), 0).unwrap();
        assert!(!backend.exists("cart").unwrap());
    }
}

//! Cart screen state.

use crate::cart_store::CartStore;
use crate::StorefrontError;
use serde::Serialize;
use souq_commerce::cart::CartLineItem;
use souq_commerce::catalog::StoreContext;
use souq_commerce::{Money, ProductId};

pub use souq_commerce::cart::compute_total;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: CartLineItem,
    pub line_total: Money,
}

/// Everything the cart screen shows, computed fresh from storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub item_count: i64,
    pub store: Option<StoreContext>,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// "From: {store}" banner, shown while the cart has an owner.
    pub fn store_banner(&self) -> Option<String> {
        self.store
            .as_ref()
            .map(|store| format!("From: {}", store.store_name))
    }
}

/// Cart screen controls over a [`CartStore`].
#[derive(Debug, Clone, Copy)]
pub struct CartView<'a> {
    store: &'a CartStore,
}

impl<'a> CartView<'a> {
    pub fn new(store: &'a CartStore) -> Self {
        Self { store }
    }

    /// Re-read the cart and recompute every total.
    pub fn snapshot(&self) -> Result<CartSnapshot, StorefrontError> {
        let cart = self.store.cart();
        let total = cart.total()?;
        let lines = cart
            .items()
            .iter()
            .map(|item| {
                let line_total = item
                    .total()
                    .ok_or(souq_commerce::CommerceError::Overflow)?;
                Ok(CartLine {
                    item: item.clone(),
                    line_total,
                })
            })
            .collect::<Result<Vec<_>, StorefrontError>>()?;

        Ok(CartSnapshot {
            lines,
            total,
            item_count: cart.item_count(),
            store: cart.store_context(),
        })
    }

    /// Current total, recomputed on every call.
    pub fn total(&self) -> Result<Money, StorefrontError> {
        Ok(compute_total(&self.store.items(), self.store.currency())?)
    }

    /// One more unit. Returns whether the product was in the cart.
    pub fn increment(&self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        match self.quantity_of(product_id) {
            Some(quantity) => self
                .store
                .update_quantity(product_id, quantity.saturating_add(1)),
            None => Ok(false),
        }
    }

    /// One fewer unit; the last unit removes the line.
    pub fn decrement(&self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        match self.quantity_of(product_id) {
            Some(quantity) => self.store.update_quantity(product_id, quantity - 1),
            None => Ok(false),
        }
    }

    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> Result<bool, StorefrontError> {
        self.store.update_quantity(product_id, quantity)
    }

    pub fn remove(&self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        self.store.remove_item(product_id)
    }

    pub fn clear(&self) -> Result<(), StorefrontError> {
        self.store.clear()
    }

    fn quantity_of(&self, product_id: &ProductId) -> Option<i64> {
        self.store.cart().get_item(product_id).map(|i| i.quantity)
    }
}

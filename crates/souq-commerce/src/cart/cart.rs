//! The mono-store cart.

use crate::cart::{CartLineItem, NewCartItem};
use crate::catalog::StoreContext;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart holding products from exactly one store.
///
/// Invariants upheld by every mutating method:
/// - line items are unique by product id,
/// - every line item shares the first item's store id,
/// - every line item is priced, non-negatively, in the cart currency,
/// - every quantity is at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from stored line items, dropping entries that break
    /// the cart invariants.
    ///
    /// Returns the cart and the number of entries that were discarded.
    pub fn restore(stored: Vec<CartLineItem>, currency: Currency) -> (Self, usize) {
        let mut cart = Self::new(currency);
        let mut dropped = 0;
        for item in stored {
            let foreign = cart
                .items
                .first()
                .is_some_and(|owner| owner.store_id != item.store_id);
            let unusable = item.quantity < 1
                || item.product_id.is_empty()
                || item.unit_price.is_negative()
                || item.unit_price.currency != currency;
            if unusable || foreign {
                dropped += 1;
                continue;
            }
            match cart.items.iter_mut().find(|i| i.product_id == item.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }
        (cart, dropped)
    }

    /// Add an item to the cart.
    ///
    /// Merges quantities when the product is already present. Fails without
    /// touching the cart if the item belongs to a different store than the
    /// current cart owner.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<(), CommerceError> {
        if item.quantity < 1 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.unit_price.is_negative() {
            return Err(CommerceError::NegativePrice(item.name));
        }
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if let Some(owner) = self.store_context() {
            if owner.store_id != item.store_id {
                return Err(CommerceError::StoreConflict {
                    existing_store_id: owner.store_id.into_inner(),
                    existing_store_name: owner.store_name,
                });
            }
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.items.push(item.into_line_item());
        Ok(())
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or less removes the item. Returns whether the
    /// cart changed; an unknown product id is not an error.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove an item from the cart. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Take `ordered` lines out of the cart after they were submitted.
    ///
    /// Each ordered quantity is subtracted from the matching line; lines
    /// that reach zero are removed. Anything added since the order was
    /// built stays. Returns whether the cart changed.
    pub fn remove_ordered(&mut self, ordered: &[CartLineItem]) -> bool {
        let mut changed = false;
        for line in ordered {
            if let Some(item) = self.items.iter_mut().find(|i| i.product_id == line.product_id) {
                item.quantity = item.quantity.saturating_sub(line.quantity);
                changed = true;
            }
        }
        self.items.retain(|i| i.quantity > 0);
        changed
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The store that currently owns the cart, if any.
    pub fn store_context(&self) -> Option<StoreContext> {
        self.items
            .first()
            .map(|i| StoreContext::new(i.store_id.clone(), i.store_name.clone()))
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Consume the cart, returning its items.
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product id.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of unit price * quantity across all items.
    pub fn total(&self) -> Result<Money, CommerceError> {
        compute_total(&self.items, self.currency)
    }
}

/// Σ unit price * quantity, in `currency`.
///
/// Fails on overflow or when a line item is priced in another currency.
pub fn compute_total(items: &[CartLineItem], currency: Currency) -> Result<Money, CommerceError> {
    items.iter().try_fold(Money::zero(currency), |acc, item| {
        if item.unit_price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }
        let line = item.total().ok_or(CommerceError::Overflow)?;
        acc.try_add(&line).ok_or(CommerceError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn item(product: &str, cents: i64, store: &str) -> NewCartItem {
        NewCartItem::new(product, format!("Product {product}"), usd(cents), store, format!("Store {store}"))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::USD);
        assert!(cart.is_empty());
        assert!(cart.store_context().is_none());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1").with_quantity(2)).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.store_context().unwrap().store_name, "Store s1");
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();
        cart.add_item(item("1", 1000, "s1").with_quantity(2)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_store_conflict_leaves_cart_untouched() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();
        let before = cart.clone();

        let err = cart.add_item(item("2", 500, "s2")).unwrap_err();
        assert_eq!(
            err,
            CommerceError::StoreConflict {
                existing_store_id: "s1".into(),
                existing_store_name: "Store s1".into(),
            }
        );
        assert!(err.to_string().contains("Store s1"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new(Currency::USD);
        let result = cart.add_item(item("1", 1000, "s1").with_quantity(0));
        assert_eq!(result, Err(CommerceError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut cart = Cart::new(Currency::USD);
        assert!(cart.add_item(item("1", -1, "s1")).is_err());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();

        assert!(cart.update_quantity(&ProductId::new("1"), 5));
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.update_quantity(&ProductId::new("1"), 5));
        assert!(!cart.update_quantity(&ProductId::new("missing"), 2));
    }

    #[test]
    fn test_non_positive_quantity_removes() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();
        cart.add_item(item("2", 1000, "s1")).unwrap();

        assert!(cart.update_quantity(&ProductId::new("1"), 0));
        assert!(cart.update_quantity(&ProductId::new("2"), -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();

        assert!(cart.remove_item(&ProductId::new("1")));
        assert!(!cart.remove_item(&ProductId::new("1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_resets_store_owner() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();
        cart.clear();
        cart.add_item(item("2", 500, "s2")).unwrap();
        assert_eq!(cart.store_context().unwrap().store_id.as_str(), "s2");
    }

    #[test]
    fn test_add_rejects_other_currency() {
        let mut cart = Cart::new(Currency::SYP);
        cart.add_item(NewCartItem::new("1", "Soap", Money::new(250, Currency::SYP), "9", "Aleppo"))
            .unwrap();
        let before = cart.clone();

        let err = cart.add_item(item("2", 1000, "9")).unwrap_err();
        assert_eq!(
            err,
            CommerceError::CurrencyMismatch {
                expected: "SYP".to_string(),
                got: "USD".to_string(),
            }
        );
        assert_eq!(cart, before);
        assert_eq!(cart.total().unwrap(), Money::new(250, Currency::SYP));
    }

    #[test]
    fn test_total_rejects_mixed_currency() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1")).unwrap();
        let mut items = cart.into_items();
        items[0].unit_price = Money::new(1000, Currency::EUR);
        assert!(matches!(
            compute_total(&items, Currency::USD),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_remove_ordered_keeps_later_additions() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(item("1", 1000, "s1").with_quantity(2)).unwrap();
        let ordered = cart.items().to_vec();

        cart.add_item(item("1", 1000, "s1")).unwrap();
        cart.add_item(item("2", 500, "s1")).unwrap();
        assert!(cart.remove_ordered(&ordered));
        assert_eq!(cart.get_item(&ProductId::new("1")).unwrap().quantity, 1);
        assert_eq!(cart.get_item(&ProductId::new("2")).unwrap().quantity, 1);

        let rest = cart.items().to_vec();
        assert!(cart.remove_ordered(&rest));
        assert!(cart.is_empty());
        assert!(!cart.remove_ordered(&ordered));
    }

    #[test]
    fn test_restore_drops_invalid_entries() {
        let mut good = Cart::new(Currency::USD);
        good.add_item(item("1", 1000, "s1")).unwrap();
        let mut stored = good.clone().into_items();

        let mut zero = stored[0].clone();
        zero.product_id = ProductId::new("2");
        zero.quantity = 0;
        let mut foreign = stored[0].clone();
        foreign.product_id = ProductId::new("3");
        foreign.store_id = "s9".into();
        let mut negative = stored[0].clone();
        negative.product_id = ProductId::new("4");
        negative.unit_price = usd(-100);
        let mut euro = stored[0].clone();
        euro.product_id = ProductId::new("5");
        euro.unit_price = Money::new(100, Currency::EUR);
        stored.extend([zero, foreign, negative, euro]);

        let (cart, dropped) = Cart::restore(stored, Currency::USD);
        assert_eq!(dropped, 4);
        assert_eq!(cart, good);
    }
}

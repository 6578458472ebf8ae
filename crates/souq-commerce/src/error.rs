//! Commerce error types.

use thiserror::Error;

/// Errors raised by the pure cart, catalog and checkout rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The cart already belongs to another store.
    #[error(
        "You can only purchase products from one store at a time. Your cart contains items \
         from {existing_store_name}. Please complete your current order or clear your cart first."
    )]
    StoreConflict {
        existing_store_id: String,
        existing_store_name: String,
    },

    /// Invalid quantity for an add.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Negative unit price.
    #[error("Invalid price for {0}: prices cannot be negative")]
    NegativePrice(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// A product has no store-specific listing id to send to the backend.
    #[error("{product_name} cannot be added: the store listing id is missing")]
    MissingListingId { product_name: String },

    /// No store sells the product, so it cannot go in a cart.
    #[error("{product_name} is not sold by any store")]
    NoStoreListing { product_name: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

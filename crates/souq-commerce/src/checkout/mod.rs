//! Checkout module.
//!
//! Turns a cart into an order-creation request and records the result.

mod order;

pub use order::{OrderItem, OrderReceipt, OrderRequest};

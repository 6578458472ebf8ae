//! Shopping cart module.
//!
//! Contains the mono-store cart, its line items and totals.

mod cart;
mod line_item;

pub use cart::{compute_total, Cart};
pub use line_item::{CartLineItem, NewCartItem};

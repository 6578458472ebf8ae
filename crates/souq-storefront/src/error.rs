//! Storefront error types.

use souq_cache::CacheError;
use souq_commerce::CommerceError;
use souq_data::FetchError;
use thiserror::Error;

/// Failures surfaced by the storefront services.
///
/// None of these are fatal: each one leaves previously held state intact
/// and carries a message fit to show the shopper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    /// Cross-store add; the cart is unchanged.
    #[error(
        "You can only purchase products from one store at a time. Your cart contains items \
         from {existing_store_name}. Please complete your current order or clear your cart first."
    )]
    StoreConflict {
        existing_store_id: String,
        existing_store_name: String,
    },

    /// Reading or writing local cart storage failed.
    #[error("Cart storage error: {0}")]
    Persistence(String),

    /// The request never got an HTTP answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Checkout attempted with no items.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// The product has no store listing id for server-side cart calls.
    #[error("{product_name} cannot be added to the cart: its store listing id is missing")]
    MissingListingId { product_name: String },

    /// No store sells the product.
    #[error("{product_name} is not sold by any store")]
    NoStoreListing { product_name: String },

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// The backend answered 2xx with a body we could not use.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Cart arithmetic or pricing rule violation.
    #[error("{0}")]
    Cart(String),
}

impl StorefrontError {
    /// Whether the shopper can reasonably retry the same action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorefrontError::Network(_) | StorefrontError::Http { .. } | StorefrontError::Persistence(_)
        )
    }

    /// Text to show the shopper.
    ///
    /// Backend messages are passed through as sent.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Network(message) => {
                format!("Could not reach the store: {message}")
            }
            StorefrontError::Http { message, .. } => message.clone(),
            StorefrontError::Persistence(_) => {
                "Your cart could not be saved. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<CommerceError> for StorefrontError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::StoreConflict {
                existing_store_id,
                existing_store_name,
            } => StorefrontError::StoreConflict {
                existing_store_id,
                existing_store_name,
            },
            CommerceError::EmptyCart => StorefrontError::EmptyCart,
            CommerceError::InvalidQuantity(q) => StorefrontError::InvalidQuantity(q),
            CommerceError::MissingListingId { product_name } => {
                StorefrontError::MissingListingId { product_name }
            }
            CommerceError::NoStoreListing { product_name } => {
                StorefrontError::NoStoreListing { product_name }
            }
            other => StorefrontError::Cart(other.to_string()),
        }
    }
}

impl From<CacheError> for StorefrontError {
    fn from(e: CacheError) -> Self {
        StorefrontError::Persistence(e.to_string())
    }
}

impl From<FetchError> for StorefrontError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, message } => StorefrontError::Http { status, message },
            FetchError::ParseError(message) | FetchError::JsonError(message) => {
                StorefrontError::Decode(message)
            }
            FetchError::Timeout => StorefrontError::Network("request timed out".to_string()),
            FetchError::RequestError(message) | FetchError::InvalidUrl(message) => {
                StorefrontError::Network(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_existing_store() {
        let err: StorefrontError = CommerceError::StoreConflict {
            existing_store_id: "1".into(),
            existing_store_name: "Aleppo Soap".into(),
        }
        .into();
        assert!(err.user_message().contains("Aleppo Soap"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_fetch_errors_are_retryable() {
        let http: StorefrontError = FetchError::HttpError {
            status: 500,
            message: "Server Error".into(),
        }
        .into();
        assert_eq!(http.user_message(), "Server Error");
        assert!(http.is_retryable());

        let network: StorefrontError = FetchError::Timeout.into();
        assert!(matches!(network, StorefrontError::Network(_)));
        assert!(network.is_retryable());
    }

    #[test]
    fn test_listing_errors_stay_distinct() {
        let unsold: StorefrontError = CommerceError::NoStoreListing {
            product_name: "Za'atar".into(),
        }
        .into();
        let unlinked: StorefrontError = CommerceError::MissingListingId {
            product_name: "Za'atar".into(),
        }
        .into();
        assert_eq!(unsold.user_message(), "Za'atar is not sold by any store");
        assert!(unlinked.user_message().contains("listing id is missing"));
        assert_ne!(unsold.user_message(), unlinked.user_message());
    }

    #[test]
    fn test_decode_is_not_retryable() {
        let err: StorefrontError = FetchError::ParseError("eof".into()).into();
        assert!(!err.is_retryable());
    }
}

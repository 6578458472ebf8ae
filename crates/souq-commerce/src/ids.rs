//! Newtype IDs for type-safe identifiers.
//!
//! The marketplace backend hands out numeric primary keys, but older cart
//! payloads stored them as strings. Every ID therefore deserializes from
//! either a JSON number or a JSON string and is kept as its string form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accepts `12`, `"12"` or `"abc"` for an identifier field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Missing,
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Int(v) => v.to_string(),
            RawId::Uint(v) => v.to_string(),
            // Integral floats ("3.0") come from loosely typed JSON encoders.
            RawId::Float(v) if v.fract() == 0.0 => format!("{}", v as i64),
            RawId::Float(v) => v.to_string(),
            RawId::Text(s) => s,
            RawId::Missing => String::new(),
        }
    }
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the ID carries no value (absent in the source payload).
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Catalog product identifier, shared by every store listing the product.
    ProductId
);
define_id!(
    /// Store identifier.
    StoreId
);
define_id!(
    /// Category identifier.
    CategoryId
);
define_id!(
    /// A specific store's listing of a product (the pivot row id).
    ///
    /// Distinct from [`ProductId`]; server-side cart endpoints expect this one.
    StoreProductId
);
define_id!(
    /// Order identifier assigned by the backend.
    OrderId
);

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a string-backed identifier newtype.
///
/// Identifiers are opaque strings: any value is accepted as a lookup key,
/// and only the owning service decides how fresh ones are minted.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
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

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier of an order, generated once at creation.
    OrderId
);

string_id!(
    /// Identifier of the user who owns an order.
    UserId
);

string_id!(
    /// Catalog identifier of a part.
    PartId
);

string_id!(
    /// Identifier of a payment transaction, issued by the payment service.
    TransactionId
);

impl OrderId {
    /// Creates a new random order ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl TransactionId {
    /// Creates a new random transaction ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

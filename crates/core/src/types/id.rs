//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The backend assigns
//! every identifier (opaque document id strings); the client never mints one.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` / `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use thread_saints_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("665f1c2ab9d1a826dc0fe111");
/// let order_id = OrderId::new("665f1c2ab9d1a826dc0fe222");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
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

// Define standard entity IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(CartId);
define_id!(CartItemId);
define_id!(WishlistId);
define_id!(WishlistItemId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_construction() {
        let id = ProductId::new("665f1c2ab9d1a826dc0fe111");
        assert_eq!(id.as_str(), "665f1c2ab9d1a826dc0fe111");
        assert_eq!(id.to_string(), "665f1c2ab9d1a826dc0fe111");
    }

    #[test]
    fn test_id_equality() {
        let a = ProductId::new("abc");
        let b = ProductId::new("abc");
        let c = ProductId::new("def");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = OrderId::new("665f1c2ab9d1a826dc0fe222");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"665f1c2ab9d1a826dc0fe222\"");

        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_from_conversions() {
        let id: CartItemId = "item-1".into();
        assert_eq!(id.as_str(), "item-1");

        let s: String = id.into();
        assert_eq!(s, "item-1");
    }
}

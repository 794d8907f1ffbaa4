//! Newtype IDs for type-safe entity references.
//!
//! Shopify identifies every Admin API resource with an opaque global ID
//! string (e.g. `gid://shopify/ProductVariant/123`). Use the `define_gid!`
//! macro to create type-safe wrappers that prevent accidentally passing a
//! product ID where a variant ID is expected.

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use pricelift_core::define_gid;
/// define_gid!(CollectionId);
///
/// let id = CollectionId::new("gid://shopify/Collection/1");
/// assert_eq!(id.as_str(), "gid://shopify/Collection/1");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the ID string.
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
                Self(id.to_string())
            }
        }
    };
}

// Define standard entity IDs
define_gid!(ProductId);
define_gid!(VariantId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gid_roundtrip() {
        let id = ProductId::new("gid://shopify/Product/42");
        assert_eq!(id.as_str(), "gid://shopify/Product/42");
        assert_eq!(id.to_string(), "gid://shopify/Product/42");
    }

    #[test]
    fn test_gid_serde_transparent() {
        let id = VariantId::new("gid://shopify/ProductVariant/7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/ProductVariant/7\"");

        let back: VariantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_distinct_types_compare_by_value() {
        let a = VariantId::from("gid://shopify/ProductVariant/1");
        let b = VariantId::from(String::from("gid://shopify/ProductVariant/1"));
        assert_eq!(a, b);
    }
}

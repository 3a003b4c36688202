//! Product identifiers.
//!
//! Product IDs are opaque strings supplied by the catalog. The newtype keeps
//! them from being mixed up with titles or image URLs, which are also plain
//! strings on a line item.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product, unique within a cart.
///
/// Serializes as a bare string.
///
/// # Example
///
/// ```rust
/// # use go_marketplace_core::ProductId;
/// let id = ProductId::new("shoe-42");
/// assert_eq!(id.as_str(), "shoe-42");
/// assert_eq!(id.to_string(), "shoe-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_string() {
        let id = ProductId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    }

    #[test]
    fn test_deserializes_from_bare_string() {
        let id: ProductId = serde_json::from_str(r#""xyz-1""#).unwrap();
        assert_eq!(id, ProductId::from("xyz-1"));
    }

    #[test]
    fn test_conversions() {
        let id = ProductId::from(String::from("p1"));
        assert_eq!(id.as_ref(), "p1");
        assert_eq!(String::from(id), "p1");
    }
}

//! Category keys used to group and filter products.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized category key.
///
/// Categories are stored trimmed and lower-cased, so `"Bebidas"` and
/// `" bebidas "` name the same category. All comparisons go through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Create a category key, normalizing the input.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(normalize(name.as_ref()))
    }

    /// Get the normalized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-friendly label, with the first letter upper-cased.
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Check whether the key contains an already lower-cased needle.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

/// Normalize a raw category name into its key form.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_normalization() {
        assert_eq!(Category::new("Bebidas"), Category::new(" bebidas "));
        assert_eq!(Category::new("LACTEOS").as_str(), "lacteos");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(Category::new("almacen").label(), "Almacen");
        assert_eq!(Category::new("").label(), "");
    }

    #[test]
    fn test_category_deserialize_normalizes() {
        let c: Category = serde_json::from_str("\"Kiosco\"").unwrap();
        assert_eq!(c.as_str(), "kiosco");
    }
}

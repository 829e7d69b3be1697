//! Free-text search over the catalog.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Search box contents.
///
/// The raw text is kept as typed; matching uses its lower-cased form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchText {
    raw: String,
    needle: String,
}

impl SearchText {
    /// Create from the search box contents.
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Text as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-cased text used for matching.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether the search should drive the visible list.
    ///
    /// Empty and whitespace-only text leave the search inactive.
    pub fn is_active(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    /// Check a single product.
    pub fn matches(&self, product: &Product) -> bool {
        product.matches_text(&self.needle)
    }
}

impl From<String> for SearchText {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SearchText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<SearchText> for String {
    fn from(s: SearchText) -> Self {
        s.raw
    }
}

/// Products whose name or category contains `text`, case-insensitively.
///
/// Catalog order is preserved. Empty text matches every product.
pub fn apply_search(products: &[Product], text: &str) -> Vec<Product> {
    let query = SearchText::new(text);
    products
        .iter()
        .filter(|p| query.matches(p))
        .cloned()
        .collect()
}

//! Category filtering and the rule that combines it with search.

use crate::catalog::{Category, Product};
use crate::search::SearchText;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of checked category boxes.
///
/// An empty selection places no restriction on the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    checked: BTreeSet<Category>,
}

impl CategorySelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a category box.
    pub fn set(&mut self, category: impl Into<Category>, checked: bool) {
        let category = category.into();
        if checked {
            self.checked.insert(category);
        } else {
            self.checked.remove(&category);
        }
    }

    /// Flip a category box. Returns the new checked state.
    pub fn toggle(&mut self, category: impl Into<Category>) -> bool {
        let category = category.into();
        if self.checked.remove(&category) {
            false
        } else {
            self.checked.insert(category);
            true
        }
    }

    /// Check whether a category box is checked.
    pub fn contains(&self, category: &Category) -> bool {
        self.checked.contains(category)
    }

    /// Whether no box is checked.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Uncheck everything.
    pub fn clear(&mut self) {
        self.checked.clear();
    }

    /// Checked categories in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.checked.iter()
    }

    /// Whether a product passes the selection.
    pub fn admits(&self, product: &Product) -> bool {
        self.is_empty() || self.checked.contains(&product.category)
    }
}

impl<C: Into<Category>> FromIterator<C> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            checked: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Products whose category is checked, or every product if none is.
///
/// Catalog order is preserved.
pub fn apply_category_filter(products: &[Product], selection: &CategorySelection) -> Vec<Product> {
    products
        .iter()
        .filter(|p| selection.admits(p))
        .cloned()
        .collect()
}

/// How category selection and search text combine into the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Two independent result sets. Active search text decides the visible
    /// list on its own, even when it matches nothing; otherwise the category
    /// result is shown.
    #[default]
    SearchOverrides,
    /// One predicate: a product must pass the category selection and match
    /// the active search text.
    Conjunctive,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::SearchOverrides => "search_overrides",
            FilterMode::Conjunctive => "conjunctive",
        }
    }
}

/// Category selection plus search text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Checked category boxes.
    pub selection: CategorySelection,
    /// Search box contents.
    pub search: SearchText,
}

impl FilterState {
    /// No category checked, empty search box.
    pub fn show_all() -> Self {
        Self::default()
    }

    /// Whether the state leaves the catalog untouched.
    pub fn is_unfiltered(&self) -> bool {
        self.selection.is_empty() && !self.search.is_active()
    }

    /// Derive the visible list from the full catalog.
    pub fn apply(&self, products: &[Product], mode: FilterMode) -> Vec<Product> {
        match mode {
            FilterMode::SearchOverrides => {
                if self.search.is_active() {
                    products
                        .iter()
                        .filter(|p| self.search.matches(p))
                        .cloned()
                        .collect()
                } else {
                    apply_category_filter(products, &self.selection)
                }
            }
            FilterMode::Conjunctive => products
                .iter()
                .filter(|p| self.selection.admits(p))
                .filter(|p| !self.search.is_active() || self.search.matches(p))
                .cloned()
                .collect(),
        }
    }
}

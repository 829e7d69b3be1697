//! Product types.

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Document id assigned by the product repository.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Normalized category key.
    pub category: Category,
    /// Unit sale price.
    pub price: Money,
    /// Unit cost, shown to the store owner only.
    #[serde(default)]
    pub cost: Money,
    /// Image URL or public path.
    #[serde(default)]
    pub img: String,
}

impl Product {
    /// Create a product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<Category>,
        price: Money,
        cost: Money,
        img: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            cost,
            img: img.into(),
        }
    }

    /// Check whether the lower-cased needle occurs in the name or category.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.contains(needle)
    }
}

/// Data for a product that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Normalized category key.
    pub category: Category,
    /// Unit sale price.
    pub price: Money,
    /// Unit cost.
    pub cost: Money,
    /// Image URL or public path.
    pub img: String,
}

impl NewProduct {
    /// Build product data from raw form input.
    ///
    /// Every field is required. Amounts are parsed as decimals and must not
    /// be negative.
    pub fn from_form(
        name: &str,
        category: &str,
        price: &str,
        cost: &str,
        img: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommerceError::MissingField("name"));
        }

        let category = Category::new(category);
        if category.is_empty() {
            return Err(CommerceError::MissingField("category"));
        }

        if price.trim().is_empty() {
            return Err(CommerceError::MissingField("price"));
        }
        if cost.trim().is_empty() {
            return Err(CommerceError::MissingField("cost"));
        }

        let img = img.into();
        if img.trim().is_empty() {
            return Err(CommerceError::MissingField("image"));
        }

        Ok(Self {
            name: name.to_string(),
            category,
            price: Money::parse(price)?,
            cost: Money::parse(cost)?,
            img,
        })
    }

    /// Attach the id assigned by the repository.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            cost: self.cost,
            img: self.img,
        }
    }
}

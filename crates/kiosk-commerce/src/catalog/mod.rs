//! Product catalog module.
//!
//! Contains the product record and the normalized category key.

mod category;
mod product;

pub use category::{normalize as normalize_category, Category};
pub use product::{NewProduct, Product};

//! Catalog, cart and search domain logic for the Kiosk storefront.
//!
//! This crate is the pure half of the storefront core:
//!
//! - **Catalog**: Products and normalized category keys
//! - **Cart**: Line aggregation per product, quantities, totals
//! - **Search**: Category selection, free-text search, pagination math, facets
//!
//! Nothing here performs I/O. The controllers that talk to the product
//! repository, identity provider and image host live in `kiosk-storefront`.
//!
//! # Example
//!
//! ```rust
//! use kiosk_commerce::prelude::*;
//!
//! let soda = Product::new(ProductId::new("p-1"), "Cola 500ml", "Bebidas", Money::new(1200), Money::new(800), "/img/cola.webp");
//!
//! let mut cart = Cart::new();
//! cart.add(&soda, Quantity::new(2).unwrap());
//! cart.add(&soda, Quantity::new(3).unwrap());
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_price(), Money::new(6000));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Category, NewProduct, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary, LineSummary, PricingMode, Quantity};

    // Search
    pub use crate::search::{
        apply_category_filter, apply_search, category_facets, paginate, CategoryFacet,
        CategorySelection, FilterMode, FilterState, Page, Pagination, SearchText,
    };
}

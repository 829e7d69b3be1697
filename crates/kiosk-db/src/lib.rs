//! Product repository for the Kiosk storefront.
//!
//! The storefront never talks to the hosted document store directly; it goes
//! through the [`ProductRepository`] trait. This crate defines that contract
//! and ships an in-memory implementation backed by a JSON fixture.
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_db::prelude::*;
//!
//! let repo = MemoryProductRepository::load_fixture("catalog.json")?;
//! let products = repo.list().await?;
//! repo.update_price(&products[0].id, Money::new(1500)).await?;
//! ```

mod error;
mod memory;
mod repository;

pub use error::DbError;
pub use memory::MemoryProductRepository;
pub use repository::{DbResult, ProductRepository, RepoOp, SharedRepository};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DbError, DbResult, MemoryProductRepository, ProductRepository, RepoOp};
    pub use kiosk_commerce::{Money, ProductId};
}

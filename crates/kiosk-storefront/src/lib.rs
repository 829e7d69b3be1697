//! Storefront controllers for the Kiosk product catalog.
//!
//! This crate holds the client-side state of a store visit and the rules that
//! change it:
//!
//! - **Catalog**: [`CatalogStore`] fetches the product list and derives the
//!   visible list from category checkboxes and the search box
//! - **Cart**: [`CartStore`] aggregates adds into one line per product
//! - **Pagination**: [`PaginationController`] pages the visible list with a
//!   page size that follows the viewport width
//! - **Cards**: [`ProductCardController`] drives the quantity stepper, inline
//!   price and cost editors, and deletion
//! - **Forms**: [`ProductForm`] and [`LoginForm`]
//!
//! Everything is wired by [`Storefront`], which takes the product repository,
//! auth provider and image host as shared handles.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kiosk_storefront::prelude::*;
//!
//! let storefront = Storefront::builder()
//!     .with_repository(Arc::new(MemoryProductRepository::load_fixture("catalog.json")?))
//!     .with_auth_provider(Arc::new(MemoryAuthProvider::default()))
//!     .build()?;
//!
//! storefront.load().await?;
//! storefront.set_category("bebidas", true);
//! let page = storefront.current_page();
//! ```

mod card;
mod cart;
mod catalog;
pub mod config;
mod error;
mod form;
mod login;
mod notices;
mod pagination;
mod session;
mod storefront;
pub mod telemetry;

pub use card::{CardState, CommitOutcome, EditField, EditorState, ProductCardController};
pub use cart::CartStore;
pub use catalog::{CatalogStore, VisibleList};
pub use config::{ConfigError, LogFormat, StorefrontConfig};
pub use error::{StorefrontError, StorefrontResult};
pub use form::{ProductDraft, ProductForm};
pub use login::LoginForm;
pub use notices::{Notice, NoticeLevel, Notices};
pub use pagination::{PageView, PaginationController, ViewportTier};
pub use session::Session;
pub use storefront::{Storefront, StorefrontBuilder, DEFAULT_VIEWPORT_WIDTH};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogStore, EditField, Notice, NoticeLevel, ProductCardController, Storefront,
        StorefrontConfig, StorefrontError, StorefrontResult, VisibleList,
    };
    pub use kiosk_auth::{AuthProvider, MemoryAuthProvider};
    pub use kiosk_commerce::prelude::*;
    pub use kiosk_db::{MemoryProductRepository, ProductRepository};
    pub use kiosk_media::{ImageFile, LocalPathHost};
}

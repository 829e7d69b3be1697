//! The product collection contract.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use kiosk_commerce::{catalog::NewProduct, catalog::Product, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::DbError;

/// Result type for repository operations.
pub type DbResult<T> = Result<T, DbError>;

/// Shared handle to a repository.
pub type SharedRepository = Arc<dyn ProductRepository>;

/// CRUD against the product collection.
///
/// Every mutating call may fail. Callers treat a failure as "nothing
/// changed" and re-fetch with [`list`](ProductRepository::list) when they
/// need the authoritative state.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch every product.
    async fn list(&self) -> DbResult<Vec<Product>>;

    /// Insert a product and return its assigned id.
    async fn create(&self, product: NewProduct) -> DbResult<ProductId>;

    /// Overwrite a product's sale price.
    async fn update_price(&self, id: &ProductId, price: Money) -> DbResult<()>;

    /// Overwrite a product's unit cost.
    async fn update_cost(&self, id: &ProductId, cost: Money) -> DbResult<()>;

    /// Delete a product.
    async fn delete(&self, id: &ProductId) -> DbResult<()>;
}

/// Repository operations, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoOp {
    List,
    Create,
    UpdatePrice,
    UpdateCost,
    Delete,
}

impl RepoOp {
    /// All operations.
    pub const ALL: [RepoOp; 5] = [
        RepoOp::List,
        RepoOp::Create,
        RepoOp::UpdatePrice,
        RepoOp::UpdateCost,
        RepoOp::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepoOp::List => "list",
            RepoOp::Create => "create",
            RepoOp::UpdatePrice => "update_price",
            RepoOp::UpdateCost => "update_cost",
            RepoOp::Delete => "delete",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            RepoOp::List => 0,
            RepoOp::Create => 1,
            RepoOp::UpdatePrice => 2,
            RepoOp::UpdateCost => 3,
            RepoOp::Delete => 4,
        }
    }
}

impl fmt::Display for RepoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

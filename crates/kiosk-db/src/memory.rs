//! In-memory product collection.
//!
//! Used by the CLI against a JSON fixture and by tests as a scriptable
//! stand-in for the hosted document store.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kiosk_commerce::{catalog::NewProduct, catalog::Product, Money, ProductId};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::repository::{DbResult, ProductRepository, RepoOp};
use crate::DbError;

/// A failure rule: an operation, optionally limited to one product.
type FailureRule = (RepoOp, Option<ProductId>);

/// In-memory [`ProductRepository`].
///
/// Products keep insertion order. Failures can be injected per operation or
/// per operation and product id, and every call is counted, including calls
/// that fail.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
    failures: Mutex<HashSet<FailureRule>>,
    latency: Mutex<HashMap<RepoOp, Duration>>,
    calls: [AtomicUsize; 5],
}

impl MemoryProductRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `products`.
    ///
    /// Fails if two products share an id.
    pub fn with_products(products: Vec<Product>) -> DbResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(DbError::DuplicateId(product.id.clone()));
            }
        }
        let repo = Self::new();
        *repo.products.write() = products;
        Ok(repo)
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> DbResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::with_products(products)
    }

    /// Load a JSON fixture file.
    pub fn load_fixture(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let repo = Self::from_json(&content)?;
        debug!(path = %path.display(), count = repo.len(), "loaded product fixture");
        Ok(repo)
    }

    /// Delay every call of `op` by `delay`.
    pub fn with_latency(self, op: RepoOp, delay: Duration) -> Self {
        self.latency.lock().insert(op, delay);
        self
    }

    /// Make every call of `op` fail.
    pub fn fail(&self, op: RepoOp) {
        self.failures.lock().insert((op, None));
    }

    /// Make calls of `op` for one product fail.
    pub fn fail_for(&self, op: RepoOp, id: impl Into<ProductId>) {
        self.failures.lock().insert((op, Some(id.into())));
    }

    /// Remove every injected failure.
    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    /// Number of calls of `op` so far.
    pub fn calls(&self, op: RepoOp) -> usize {
        self.calls[op.index()].load(Ordering::SeqCst)
    }

    /// Number of mutating calls so far.
    pub fn mutation_calls(&self) -> usize {
        RepoOp::ALL
            .iter()
            .filter(|op| **op != RepoOp::List)
            .map(|op| self.calls(*op))
            .sum()
    }

    /// Current contents, without counting a call.
    pub fn snapshot(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    /// Get a product by id, without counting a call.
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.products.read().iter().find(|p| &p.id == id).cloned()
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    async fn enter(&self, op: RepoOp, id: Option<&ProductId>) -> DbResult<()> {
        self.calls[op.index()].fetch_add(1, Ordering::SeqCst);

        let delay = self.latency.lock().get(&op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let injected = {
            let failures = self.failures.lock();
            failures.contains(&(op, None))
                || id.is_some_and(|id| failures.contains(&(op, Some(id.clone()))))
        };
        if injected {
            warn!(op = %op, product_id = ?id.map(ProductId::as_str), "injected repository failure");
            return Err(DbError::Unavailable(format!("{op} failed")));
        }
        Ok(())
    }

    fn modify(&self, id: &ProductId, apply: impl FnOnce(&mut Product)) -> DbResult<()> {
        let mut products = self.products.write();
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DbError::NotFound(id.clone()))?;
        apply(product);
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> DbResult<Vec<Product>> {
        self.enter(RepoOp::List, None).await?;
        Ok(self.snapshot())
    }

    async fn create(&self, product: NewProduct) -> DbResult<ProductId> {
        self.enter(RepoOp::Create, None).await?;
        let id = ProductId::generate();
        self.products.write().push(product.with_id(id.clone()));
        debug!(product_id = %id, "product created");
        Ok(id)
    }

    async fn update_price(&self, id: &ProductId, price: Money) -> DbResult<()> {
        self.enter(RepoOp::UpdatePrice, Some(id)).await?;
        self.modify(id, |p| p.price = price)
    }

    async fn update_cost(&self, id: &ProductId, cost: Money) -> DbResult<()> {
        self.enter(RepoOp::UpdateCost, Some(id)).await?;
        self.modify(id, |p| p.cost = cost)
    }

    async fn delete(&self, id: &ProductId) -> DbResult<()> {
        self.enter(RepoOp::Delete, Some(id)).await?;
        let mut products = self.products.write();
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Err(DbError::NotFound(id.clone()));
        }
        Ok(())
    }
}

//! The catalog store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use kiosk_commerce::catalog::{Category, Product};
use kiosk_commerce::search::{category_facets, CategoryFacet, FilterMode, FilterState, SearchText};
use kiosk_commerce::{Money, ProductId};
use kiosk_db::SharedRepository;
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::StorefrontResult;

/// An immutable snapshot of the visible product list.
///
/// `revision` changes whenever the list is re-derived from a new catalog or
/// a new filter state, even if the contents happen to be equal. In-place
/// price and cost updates keep the revision.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleList {
    revision: u64,
    items: Arc<[Product]>,
}

impl VisibleList {
    pub(crate) fn new(revision: u64, items: Vec<Product>) -> Self {
        Self {
            revision,
            items: items.into(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }
}

impl Default for VisibleList {
    fn default() -> Self {
        Self::new(0, Vec::new())
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    all: Vec<Product>,
    filter: FilterState,
    visible: VisibleList,
    loaded: bool,
    /// Sequence number of the fetch whose result is in `all`.
    applied_fetch: u64,
}

impl CatalogState {
    /// Re-derive the visible list under a new revision.
    fn rederive(&mut self, mode: FilterMode) -> VisibleList {
        let revision = self.visible.revision + 1;
        self.visible = VisibleList::new(revision, self.filter.apply(&self.all, mode));
        self.visible.clone()
    }

    /// Whether a fetch started as `seq` is newer than the one applied.
    /// Marks it applied when it is.
    fn accept_fetch(&mut self, seq: u64) -> bool {
        if seq <= self.applied_fetch {
            return false;
        }
        self.applied_fetch = seq;
        true
    }

    /// Re-derive the visible list keeping the revision.
    fn refresh_in_place(&mut self, mode: FilterMode) {
        let revision = self.visible.revision;
        self.visible = VisibleList::new(revision, self.filter.apply(&self.all, mode));
    }
}

/// Holds the full catalog and the active filtered view.
///
/// The catalog is only replaced by a successful repository fetch. Creates
/// and deletes are never spliced in locally. Fetches are numbered when they
/// start, and a result that finishes after a newer one has been applied is
/// dropped.
pub struct CatalogStore {
    repo: SharedRepository,
    mode: FilterMode,
    fetch_seq: AtomicU64,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new(repo: SharedRepository, mode: FilterMode) -> Self {
        Self {
            repo,
            mode,
            fetch_seq: AtomicU64::new(0),
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// How search and category selection combine.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Fetch the catalog and reset filters to "show all".
    ///
    /// On failure the previous catalog stays in place.
    #[instrument(skip(self))]
    pub async fn load(&self) -> StorefrontResult<VisibleList> {
        let (seq, products) = self.fetch().await?;
        let mut state = self.state.write();
        if !state.accept_fetch(seq) {
            debug!(seq, applied = state.applied_fetch, "stale catalog load dropped");
            return Ok(state.visible.clone());
        }
        state.all = products;
        state.filter = FilterState::show_all();
        state.loaded = true;
        let visible = state.rederive(self.mode);
        info!(products = state.all.len(), "catalog loaded");
        Ok(visible)
    }

    /// Re-fetch the catalog after a create or delete, keeping the current
    /// category selection and search text.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> StorefrontResult<VisibleList> {
        let (seq, products) = self.fetch().await?;
        let mut state = self.state.write();
        if !state.accept_fetch(seq) {
            debug!(seq, applied = state.applied_fetch, "stale catalog refresh dropped");
            return Ok(state.visible.clone());
        }
        state.all = products;
        state.loaded = true;
        let visible = state.rederive(self.mode);
        info!(products = state.all.len(), visible = visible.len(), "catalog refreshed");
        Ok(visible)
    }

    async fn fetch(&self) -> StorefrontResult<(u64, Vec<Product>)> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let products = self.repo.list().await.map_err(|e| {
            warn!(error = %e, "catalog fetch failed");
            e
        })?;
        Ok((seq, products))
    }

    /// Whether a fetch has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// The current visible list.
    pub fn visible(&self) -> VisibleList {
        self.state.read().visible.clone()
    }

    /// Every product, in catalog order.
    pub fn products(&self) -> Vec<Product> {
        self.state.read().all.clone()
    }

    /// Get a product by id.
    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.state.read().all.iter().find(|p| &p.id == id).cloned()
    }

    /// Whether the catalog has a product with this id.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.state.read().all.iter().any(|p| &p.id == id)
    }

    /// Ids of every product in the catalog.
    pub fn ids(&self) -> HashSet<ProductId> {
        self.state.read().all.iter().map(|p| p.id.clone()).collect()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.state.read().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().all.is_empty()
    }

    /// Current filter state.
    pub fn filter(&self) -> FilterState {
        self.state.read().filter.clone()
    }

    /// Check or uncheck a category box.
    pub fn set_category(&self, category: impl Into<Category>, checked: bool) -> VisibleList {
        let category = category.into();
        let mut state = self.state.write();
        state.filter.selection.set(category.clone(), checked);
        debug!(category = %category, checked, "category filter changed");
        state.rederive(self.mode)
    }

    /// Flip a category box.
    pub fn toggle_category(&self, category: impl Into<Category>) -> VisibleList {
        let mut state = self.state.write();
        let checked = state.filter.selection.toggle(category);
        debug!(checked, "category filter toggled");
        state.rederive(self.mode)
    }

    /// Uncheck every category box.
    pub fn clear_categories(&self) -> VisibleList {
        let mut state = self.state.write();
        state.filter.selection.clear();
        state.rederive(self.mode)
    }

    /// Replace the search text.
    pub fn set_search(&self, text: impl Into<String>) -> VisibleList {
        let mut state = self.state.write();
        state.filter.search = SearchText::new(text);
        state.rederive(self.mode)
    }

    /// Empty the search box.
    pub fn clear_search(&self) -> VisibleList {
        self.set_search(String::new())
    }

    /// Category checkboxes with counts over the full catalog.
    pub fn facets(&self) -> Vec<CategoryFacet> {
        let state = self.state.read();
        category_facets(&state.all, &state.filter.selection)
    }

    /// Record a confirmed price change. Returns whether the product exists.
    pub fn apply_price(&self, id: &ProductId, price: Money) -> bool {
        self.update_in_place(id, |p| p.price = price)
    }

    /// Record a confirmed cost change. Returns whether the product exists.
    pub fn apply_cost(&self, id: &ProductId, cost: Money) -> bool {
        self.update_in_place(id, |p| p.cost = cost)
    }

    fn update_in_place(&self, id: &ProductId, apply: impl FnOnce(&mut Product)) -> bool {
        let mut state = self.state.write();
        let Some(product) = state.all.iter_mut().find(|p| &p.id == id) else {
            return false;
        };
        apply(product);
        state.refresh_in_place(self.mode);
        true
    }
}

//! Per-product card state: quantity stepper and inline price/cost editors.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use kiosk_commerce::cart::{CartLine, Quantity};
use kiosk_commerce::{Money, ProductId};
use kiosk_db::SharedRepository;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::cart::CartStore;
use crate::catalog::{CatalogStore, VisibleList};
use crate::config::EditingConfig;
use crate::notices::Notices;
use crate::session::Session;
use crate::{StorefrontError, StorefrontResult};

/// Which inline editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditField {
    Price,
    Cost,
}

impl EditField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Price => "price",
            EditField::Cost => "cost",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inline editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditorState {
    /// Whether the input is shown.
    pub open: bool,
    /// Text in the input.
    pub draft: String,
    /// Whether a save is in flight. The input is disabled meanwhile.
    pub pending: bool,
    /// Inline error from the last attempt.
    pub error: Option<String>,
}

impl EditorState {
    fn close(&mut self) {
        self.open = false;
        self.draft.clear();
        self.error = None;
    }
}

/// Ephemeral UI state for one product card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardState {
    /// Stepper value.
    pub count: Quantity,
    /// Price editor.
    pub price: EditorState,
    /// Cost editor.
    pub cost: EditorState,
    /// Whether a delete is in flight.
    pub deleting: bool,
}

impl CardState {
    pub fn editor(&self, field: EditField) -> &EditorState {
        match field {
            EditField::Price => &self.price,
            EditField::Cost => &self.cost,
        }
    }

    fn editor_mut(&mut self, field: EditField) -> &mut EditorState {
        match field {
            EditField::Price => &mut self.price,
            EditField::Cost => &mut self.cost,
        }
    }
}

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The repository accepted the new value.
    Saved(Money),
    /// Nothing changed; the editor was closed without a request.
    Unchanged,
}

type CardMap = Mutex<HashMap<ProductId, CardState>>;

/// What a [`PendingGuard`] marks as in flight.
#[derive(Debug, Clone, Copy)]
enum PendingSlot {
    Editor(EditField),
    Delete,
}

/// Clears a pending flag when dropped, whatever the outcome.
struct PendingGuard<'a> {
    cards: &'a CardMap,
    id: ProductId,
    slot: PendingSlot,
}

impl<'a> PendingGuard<'a> {
    /// Mark `slot` as pending. Fails with [`StorefrontError::Busy`] if it
    /// already is.
    fn acquire(cards: &'a CardMap, id: &ProductId, slot: PendingSlot) -> StorefrontResult<Self> {
        let mut map = cards.lock();
        let card = map.entry(id.clone()).or_default();
        let flag = match slot {
            PendingSlot::Editor(field) => &mut card.editor_mut(field).pending,
            PendingSlot::Delete => &mut card.deleting,
        };
        if *flag {
            return Err(StorefrontError::Busy);
        }
        *flag = true;
        Ok(Self {
            cards,
            id: id.clone(),
            slot,
        })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(card) = self.cards.lock().get_mut(&self.id) {
            match self.slot {
                PendingSlot::Editor(field) => card.editor_mut(field).pending = false,
                PendingSlot::Delete => card.deleting = false,
            }
        }
    }
}

/// Drives every product card.
///
/// Card state is kept in one map keyed by product id and created on first
/// interaction. Requests for different products may be in flight at once
/// and complete in any order; each completion only touches its own card.
pub struct ProductCardController {
    catalog: Arc<CatalogStore>,
    cart: Arc<CartStore>,
    repo: SharedRepository,
    session: Arc<Session>,
    notices: Notices,
    editing: EditingConfig,
    cards: CardMap,
}

impl ProductCardController {
    pub fn new(
        catalog: Arc<CatalogStore>,
        cart: Arc<CartStore>,
        repo: SharedRepository,
        session: Arc<Session>,
        notices: Notices,
        editing: EditingConfig,
    ) -> Self {
        Self {
            catalog,
            cart,
            repo,
            session,
            notices,
            editing,
            cards: Mutex::new(HashMap::new()),
        }
    }

    /// State of a card. Cards never touched report the defaults.
    pub fn state(&self, id: &ProductId) -> CardState {
        self.cards.lock().get(id).cloned().unwrap_or_default()
    }

    /// Ids that currently have card state.
    pub fn tracked(&self) -> HashSet<ProductId> {
        self.cards.lock().keys().cloned().collect()
    }

    fn with_card<T>(&self, id: &ProductId, f: impl FnOnce(&mut CardState) -> T) -> T {
        let mut cards = self.cards.lock();
        f(cards.entry(id.clone()).or_default())
    }

    // -- quantity stepper --

    /// Stepper value.
    pub fn count(&self, id: &ProductId) -> Quantity {
        self.cards.lock().get(id).map(|c| c.count).unwrap_or_default()
    }

    /// Stepper up.
    pub fn increment(&self, id: &ProductId) -> Quantity {
        self.with_card(id, |card| {
            card.count = card.count.increment();
            card.count
        })
    }

    /// Stepper down, never below one.
    pub fn decrement(&self, id: &ProductId) -> Quantity {
        self.with_card(id, |card| {
            card.count = card.count.decrement();
            card.count
        })
    }

    /// Set the stepper directly.
    pub fn set_count(&self, id: &ProductId, count: Quantity) -> StorefrontResult<()> {
        if !self.catalog.contains(id) {
            return Err(StorefrontError::UnknownProduct(id.clone()));
        }
        self.with_card(id, |card| card.count = count);
        Ok(())
    }

    /// Add the stepper's quantity of a product to the cart.
    ///
    /// The stepper keeps its value afterwards.
    pub fn add_to_cart(&self, id: &ProductId) -> StorefrontResult<CartLine> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))?;
        let count = self.count(id);
        Ok(self.cart.add(&product, count))
    }

    // -- inline editors --

    fn check_edit_allowed(&self, field: EditField) -> StorefrontResult<()> {
        let needs_auth = match field {
            EditField::Cost => true,
            EditField::Price => self.editing.price_edit_requires_auth,
        };
        if needs_auth && !self.session.is_authenticated() {
            return Err(StorefrontError::Unauthorized);
        }
        Ok(())
    }

    /// Show an editor. A draft left from earlier is kept.
    pub fn open_editor(&self, id: &ProductId, field: EditField) -> StorefrontResult<()> {
        self.check_edit_allowed(field)?;
        if !self.catalog.contains(id) {
            return Err(StorefrontError::UnknownProduct(id.clone()));
        }
        self.with_card(id, |card| card.editor_mut(field).open = true);
        Ok(())
    }

    /// Show or hide an editor. Returns whether it is now open.
    ///
    /// Hiding keeps the draft. An editor with a save in flight stays open.
    pub fn toggle_editor(&self, id: &ProductId, field: EditField) -> StorefrontResult<bool> {
        let editor = self.state(id).editor(field).clone();
        if !editor.open {
            self.open_editor(id, field)?;
            return Ok(true);
        }
        if editor.pending {
            return Err(StorefrontError::Busy);
        }
        self.with_card(id, |card| card.editor_mut(field).open = false);
        Ok(false)
    }

    /// Replace the draft text.
    pub fn set_draft(&self, id: &ProductId, field: EditField, text: impl Into<String>) {
        let text = text.into();
        self.with_card(id, |card| {
            let editor = card.editor_mut(field);
            if !editor.pending {
                editor.draft = text;
                editor.error = None;
            }
        });
    }

    /// Close the editor and discard the draft (Escape). Ignored while a
    /// save is in flight; returns whether the editor closed.
    pub fn cancel_edit(&self, id: &ProductId, field: EditField) -> bool {
        self.with_card(id, |card| {
            let editor = card.editor_mut(field);
            if editor.pending {
                return false;
            }
            editor.close();
            true
        })
    }

    /// Whether an editor has a save in flight.
    pub fn is_pending(&self, id: &ProductId, field: EditField) -> bool {
        self.cards
            .lock()
            .get(id)
            .is_some_and(|card| card.editor(field).pending)
    }

    /// Focus left the editor.
    ///
    /// An empty draft, or one equal to the current value, closes the editor
    /// without a request. Anything else is saved like [`commit`](Self::commit).
    pub async fn blur(&self, id: &ProductId, field: EditField) -> StorefrontResult<CommitOutcome> {
        let editor = self.state(id).editor(field).clone();
        if !editor.open {
            return Err(StorefrontError::EditorClosed);
        }
        if editor.pending {
            return Err(StorefrontError::Busy);
        }

        let current = self.catalog.product(id).map(|p| match field {
            EditField::Price => p.price,
            EditField::Cost => p.cost,
        });
        let draft = editor.draft.trim();
        let unchanged = draft.is_empty() || Money::parse(draft).ok() == current;
        if unchanged {
            self.with_card(id, |card| card.editor_mut(field).close());
            return Ok(CommitOutcome::Unchanged);
        }
        self.commit(id, field).await
    }

    /// Save the draft (Enter).
    ///
    /// An invalid draft is rejected inline without a request. On success the
    /// catalog takes the new value and the editor closes. On failure the
    /// editor stays open with its draft, and an error notice is posted.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn commit(&self, id: &ProductId, field: EditField) -> StorefrontResult<CommitOutcome> {
        self.check_edit_allowed(field)?;
        let editor = self.state(id).editor(field).clone();
        if !editor.open {
            return Err(StorefrontError::EditorClosed);
        }
        if !self.catalog.contains(id) {
            return Err(StorefrontError::UnknownProduct(id.clone()));
        }

        let amount = match Money::parse(&editor.draft) {
            Ok(amount) => amount,
            Err(e) => {
                let err = StorefrontError::from(e);
                let message = err.user_message();
                self.with_card(id, |card| card.editor_mut(field).error = Some(message));
                return Err(err);
            }
        };

        let _pending = PendingGuard::acquire(&self.cards, id, PendingSlot::Editor(field))?;
        debug!(%amount, "saving");

        let result = match field {
            EditField::Price => self.repo.update_price(id, amount).await,
            EditField::Cost => self.repo.update_cost(id, amount).await,
        };

        match result {
            Ok(()) => {
                match field {
                    EditField::Price => self.catalog.apply_price(id, amount),
                    EditField::Cost => self.catalog.apply_cost(id, amount),
                };
                self.with_card(id, |card| card.editor_mut(field).close());
                info!(%amount, "{field} updated");
                Ok(CommitOutcome::Saved(amount))
            }
            Err(e) => {
                warn!(error = %e, "{field} update failed");
                let message = format!("could not update the {field}");
                self.with_card(id, |card| card.editor_mut(field).error = Some(message.clone()));
                self.notices.error(message);
                Err(e.into())
            }
        }
    }

    // -- delete --

    /// Delete a product, then refresh the catalog.
    ///
    /// A failed delete leaves the catalog untouched. If the delete succeeds
    /// but the refresh fails, the product is gone server-side and the error
    /// is reported as a notice only.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> StorefrontResult<()> {
        if !self.session.is_authenticated() {
            return Err(StorefrontError::Unauthorized);
        }
        if !self.catalog.contains(id) {
            return Err(StorefrontError::UnknownProduct(id.clone()));
        }
        let _pending = PendingGuard::acquire(&self.cards, id, PendingSlot::Delete)?;

        if let Err(e) = self.repo.delete(id).await {
            warn!(error = %e, "delete failed");
            self.notices.error("could not delete the product");
            return Err(e.into());
        }
        info!("product deleted");
        self.notices.success("product deleted");

        // A failed refresh is already posted as a notice.
        let _ = self.refresh_catalog().await;
        Ok(())
    }

    /// Re-fetch the catalog keeping the filters, then settle card state.
    pub(crate) async fn refresh_catalog(&self) -> StorefrontResult<VisibleList> {
        let result = self.catalog.refresh().await;
        self.settle_fetch(result)
    }

    /// Apply the outcome of a catalog fetch to the cards: prune on success,
    /// post a notice on failure.
    pub(crate) fn settle_fetch(
        &self,
        result: StorefrontResult<VisibleList>,
    ) -> StorefrontResult<VisibleList> {
        match &result {
            Ok(_) => self.prune(),
            Err(e) => {
                warn!(error = %e, "catalog unavailable");
                self.notices.error(e.user_message());
            }
        }
        result
    }

    /// Drop card state for products no longer in the catalog.
    pub fn prune(&self) {
        let ids = self.catalog.ids();
        let mut cards = self.cards.lock();
        let before = cards.len();
        cards.retain(|id, _| ids.contains(id));
        if cards.len() < before {
            debug!(removed = before - cards.len(), "pruned card state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_auth::{AuthProvider, MemoryAuthProvider, PasswordHasher};
    use kiosk_commerce::cart::PricingMode;
    use kiosk_commerce::search::FilterMode;
    use kiosk_db::{MemoryProductRepository, RepoOp};

    const FIXTURE: &str = r#"[
        {"id": "a", "name": "Coca Cola", "category": "bebidas", "price": 10, "cost": 6},
        {"id": "b", "name": "Alfajor", "category": "kiosco", "price": 3, "cost": 1}
    ]"#;

    struct Fixture {
        repo: Arc<MemoryProductRepository>,
        auth: Arc<MemoryAuthProvider>,
        catalog: Arc<CatalogStore>,
        cart: Arc<CartStore>,
        notices: Notices,
        cards: ProductCardController,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(MemoryProductRepository::from_json(FIXTURE).unwrap());
        let auth = Arc::new(MemoryAuthProvider::new(PasswordHasher::minimal()));
        auth.add_user("owner@kiosk.test", "secret", None).unwrap();
        let session = Arc::new(Session::new(auth.clone()));
        let catalog = Arc::new(CatalogStore::new(repo.clone(), FilterMode::default()));
        catalog.load().await.unwrap();
        let cart = Arc::new(CartStore::new(PricingMode::default()));
        let notices = Notices::new();
        let cards = ProductCardController::new(
            catalog.clone(),
            cart.clone(),
            repo.clone(),
            session,
            notices.clone(),
            EditingConfig::default(),
        );
        Fixture {
            repo,
            auth,
            catalog,
            cart,
            notices,
            cards,
        }
    }

    async fn sign_in(f: &Fixture) {
        f.auth.login("owner@kiosk.test", "secret").await.unwrap();
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[tokio::test]
    async fn test_stepper_floors_at_one() {
        let f = fixture().await;
        assert_eq!(f.cards.count(&id("a")), Quantity::ONE);
        assert_eq!(f.cards.decrement(&id("a")), Quantity::ONE);
        f.cards.increment(&id("a"));
        assert_eq!(f.cards.increment(&id("a")).get(), 3);
        assert_eq!(f.cards.decrement(&id("a")).get(), 2);
    }

    #[tokio::test]
    async fn test_add_to_cart_uses_stepper() {
        let f = fixture().await;
        f.cards.set_count(&id("a"), Quantity::new(2).unwrap()).unwrap();
        f.cards.add_to_cart(&id("a")).unwrap();
        f.cards.set_count(&id("a"), Quantity::new(3).unwrap()).unwrap();
        let line = f.cards.add_to_cart(&id("a")).unwrap();

        assert_eq!(line.quantity.get(), 5);
        assert_eq!(line.price, Money::new(5000));
        assert_eq!(f.cart.len(), 1);
        assert_eq!(f.cards.count(&id("a")).get(), 3);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let f = fixture().await;
        assert!(matches!(
            f.cards.add_to_cart(&id("zzz")),
            Err(StorefrontError::UnknownProduct(_))
        ));
    }

    #[tokio::test]
    async fn test_price_edit_open_to_anonymous_cost_edit_is_not() {
        let f = fixture().await;
        assert!(f.cards.open_editor(&id("a"), EditField::Price).is_ok());
        assert!(matches!(
            f.cards.open_editor(&id("a"), EditField::Cost),
            Err(StorefrontError::Unauthorized)
        ));

        sign_in(&f).await;
        assert!(f.cards.open_editor(&id("a"), EditField::Cost).is_ok());
    }

    #[tokio::test]
    async fn test_editors_are_independent() {
        let f = fixture().await;
        sign_in(&f).await;
        assert!(f.cards.toggle_editor(&id("a"), EditField::Price).unwrap());
        assert!(f.cards.toggle_editor(&id("a"), EditField::Cost).unwrap());

        let state = f.cards.state(&id("a"));
        assert!(state.price.open && state.cost.open);

        assert!(!f.cards.toggle_editor(&id("a"), EditField::Price).unwrap());
        assert!(f.cards.state(&id("a")).cost.open);
    }

    #[tokio::test]
    async fn test_commit_success_updates_catalog_and_closes() {
        let f = fixture().await;
        let revision = f.catalog.visible().revision();
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        f.cards.set_draft(&id("a"), EditField::Price, "12.5");

        let outcome = f.cards.commit(&id("a"), EditField::Price).await.unwrap();
        assert_eq!(outcome, CommitOutcome::Saved(Money::new(1250)));
        assert_eq!(f.catalog.product(&id("a")).unwrap().price, Money::new(1250));
        assert_eq!(f.repo.get(&id("a")).unwrap().price, Money::new(1250));
        assert_eq!(f.catalog.visible().revision(), revision);

        let editor = f.cards.state(&id("a")).price;
        assert!(!editor.open && !editor.pending);
        assert!(editor.draft.is_empty());
    }

    #[tokio::test]
    async fn test_commit_failure_keeps_editor_open() {
        let f = fixture().await;
        f.repo.fail(RepoOp::UpdatePrice);
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        f.cards.set_draft(&id("a"), EditField::Price, "99");

        let err = f.cards.commit(&id("a"), EditField::Price).await.unwrap_err();
        assert!(!err.is_validation());

        let editor = f.cards.state(&id("a")).price;
        assert!(editor.open);
        assert!(!editor.pending);
        assert_eq!(editor.draft, "99");
        assert_eq!(f.catalog.product(&id("a")).unwrap().price, Money::new(1000));
        assert_eq!(f.notices.latest().unwrap().message, "could not update the price");
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_request() {
        let f = fixture().await;
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();

        for draft in ["abc", "-3", ""] {
            f.cards.set_draft(&id("a"), EditField::Price, draft);
            let err = f.cards.commit(&id("a"), EditField::Price).await.unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(f.repo.calls(RepoOp::UpdatePrice), 0);

        let editor = f.cards.state(&id("a")).price;
        assert!(editor.open);
        assert!(editor.error.is_some());
    }

    #[tokio::test]
    async fn test_commit_requires_open_editor() {
        let f = fixture().await;
        f.cards.set_draft(&id("a"), EditField::Price, "5");
        assert!(matches!(
            f.cards.commit(&id("a"), EditField::Price).await,
            Err(StorefrontError::EditorClosed)
        ));
    }

    #[tokio::test]
    async fn test_blur_unchanged_closes_without_request() {
        let f = fixture().await;
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        assert_eq!(
            f.cards.blur(&id("a"), EditField::Price).await.unwrap(),
            CommitOutcome::Unchanged
        );

        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        f.cards.set_draft(&id("a"), EditField::Price, "10.00");
        assert_eq!(
            f.cards.blur(&id("a"), EditField::Price).await.unwrap(),
            CommitOutcome::Unchanged
        );
        assert_eq!(f.repo.calls(RepoOp::UpdatePrice), 0);
        assert!(!f.cards.state(&id("a")).price.open);
    }

    #[tokio::test]
    async fn test_blur_changed_saves() {
        let f = fixture().await;
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        f.cards.set_draft(&id("a"), EditField::Price, "11");
        assert_eq!(
            f.cards.blur(&id("a"), EditField::Price).await.unwrap(),
            CommitOutcome::Saved(Money::new(1100))
        );
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let f = fixture().await;
        f.cards.open_editor(&id("a"), EditField::Price).unwrap();
        f.cards.set_draft(&id("a"), EditField::Price, "11");
        assert!(f.cards.cancel_edit(&id("a"), EditField::Price));

        let editor = f.cards.state(&id("a")).price;
        assert!(!editor.open);
        assert!(editor.draft.is_empty());
    }

    #[tokio::test]
    async fn test_cost_commit_after_sign_out_is_rejected() {
        let f = fixture().await;
        sign_in(&f).await;
        f.cards.open_editor(&id("b"), EditField::Cost).unwrap();
        f.cards.set_draft(&id("b"), EditField::Cost, "2");
        f.auth.logout().await.unwrap();

        assert!(matches!(
            f.cards.commit(&id("b"), EditField::Cost).await,
            Err(StorefrontError::Unauthorized)
        ));
        assert_eq!(f.repo.calls(RepoOp::UpdateCost), 0);
    }

    #[tokio::test]
    async fn test_delete_refreshes_and_prunes() {
        let f = fixture().await;
        sign_in(&f).await;
        f.cards.increment(&id("b"));
        f.cards.increment(&id("a"));

        f.cards.delete(&id("b")).await.unwrap();
        assert!(!f.catalog.contains(&id("b")));
        assert_eq!(f.cards.tracked(), HashSet::from([id("a")]));
        assert_eq!(f.cards.count(&id("a")).get(), 2);
        assert_eq!(f.repo.calls(RepoOp::List), 2);
    }

    #[tokio::test]
    async fn test_delete_requires_auth() {
        let f = fixture().await;
        assert!(matches!(
            f.cards.delete(&id("a")).await,
            Err(StorefrontError::Unauthorized)
        ));
        assert_eq!(f.repo.calls(RepoOp::Delete), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_catalog() {
        let f = fixture().await;
        sign_in(&f).await;
        f.repo.fail(RepoOp::Delete);

        assert!(f.cards.delete(&id("a")).await.is_err());
        assert!(f.catalog.contains(&id("a")));
        assert!(!f.cards.state(&id("a")).deleting);
        assert_eq!(f.repo.calls(RepoOp::List), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_no_card_state() {
        let f = fixture().await;
        sign_in(&f).await;
        let ghost = id("ghost");

        assert!(matches!(
            f.cards.delete(&ghost).await,
            Err(StorefrontError::UnknownProduct(_))
        ));
        assert!(matches!(
            f.cards.set_count(&ghost, Quantity::new(4).unwrap()),
            Err(StorefrontError::UnknownProduct(_))
        ));
        assert!(f.cards.tracked().is_empty());
        assert_eq!(f.repo.calls(RepoOp::Delete), 0);
    }

    #[tokio::test]
    async fn test_pending_guard_rejects_second_request() {
        let f = fixture().await;
        let _first =
            PendingGuard::acquire(&f.cards.cards, &id("a"), PendingSlot::Editor(EditField::Price))
                .unwrap();
        assert!(f.cards.is_pending(&id("a"), EditField::Price));
        assert!(matches!(
            PendingGuard::acquire(&f.cards.cards, &id("a"), PendingSlot::Editor(EditField::Price)),
            Err(StorefrontError::Busy)
        ));
        assert!(
            PendingGuard::acquire(&f.cards.cards, &id("a"), PendingSlot::Editor(EditField::Cost))
                .is_ok()
        );
        drop(_first);
        assert!(!f.cards.is_pending(&id("a"), EditField::Price));
    }
}

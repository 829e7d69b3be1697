//! Storefront wiring.

use std::sync::Arc;

use kiosk_auth::SharedAuthProvider;
use kiosk_commerce::cart::{CartLine, CartSummary};
use kiosk_commerce::search::CategoryFacet;
use kiosk_commerce::ProductId;
use kiosk_db::SharedRepository;
use kiosk_media::{LocalPathHost, SharedImageHost, ValidatedUploader};
use tracing::info;

use crate::card::ProductCardController;
use crate::cart::CartStore;
use crate::catalog::{CatalogStore, VisibleList};
use crate::config::StorefrontConfig;
use crate::form::ProductForm;
use crate::login::LoginForm;
use crate::notices::Notices;
use crate::pagination::{PageView, PaginationController, ViewportTier};
use crate::session::Session;
use crate::{StorefrontError, StorefrontResult};

/// Viewport width assumed until the first resize.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

/// Builder for a [`Storefront`].
///
/// # Example
///
/// ```rust,ignore
/// let storefront = Storefront::builder()
///     .with_config(StorefrontConfig::load("kiosk.toml")?)
///     .with_repository(Arc::new(MemoryProductRepository::load_fixture("catalog.json")?))
///     .with_auth_provider(Arc::new(MemoryAuthProvider::default()))
///     .build()?;
/// storefront.load().await?;
/// ```
#[derive(Default)]
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    repository: Option<SharedRepository>,
    auth: Option<SharedAuthProvider>,
    images: Option<SharedImageHost>,
    viewport_width: Option<u32>,
}

impl StorefrontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: StorefrontConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_repository(mut self, repository: SharedRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_auth_provider(mut self, auth: SharedAuthProvider) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Use a hosted image service. Without one, images get a local public
    /// path that the store owner fills by hand.
    pub fn with_image_host(mut self, images: SharedImageHost) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = Some(width);
        self
    }

    /// Validate the config and wire the controllers.
    pub fn build(self) -> StorefrontResult<Storefront> {
        self.config.validate()?;
        let repo = self
            .repository
            .ok_or_else(|| missing("product repository"))?;
        let auth = self.auth.ok_or_else(|| missing("auth provider"))?;
        let images: SharedImageHost = match self.images {
            Some(images) => images,
            None => Arc::new(LocalPathHost::new(self.config.media.public_dir.clone())),
        };

        let config = self.config;
        let notices = Notices::new();
        let session = Arc::new(Session::new(Arc::clone(&auth)));
        let catalog = Arc::new(CatalogStore::new(Arc::clone(&repo), config.filters.mode));
        let cart = Arc::new(CartStore::new(config.cart.pricing));
        let pagination = PaginationController::new(
            config.pagination,
            self.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH),
        );
        let cards = Arc::new(ProductCardController::new(
            Arc::clone(&catalog),
            Arc::clone(&cart),
            Arc::clone(&repo),
            Arc::clone(&session),
            notices.clone(),
            config.editing,
        ));
        let form = ProductForm::new(
            Arc::clone(&cards),
            repo,
            Arc::clone(&session),
            ValidatedUploader::new(config.media.upload_policy(), images),
            notices.clone(),
        );
        let login = LoginForm::new(auth, notices.clone());

        info!(
            filter_mode = config.filters.mode.as_str(),
            pricing = config.cart.pricing.as_str(),
            "storefront ready"
        );
        Ok(Storefront {
            config,
            notices,
            session,
            catalog,
            cart,
            pagination,
            cards,
            form,
            login,
        })
    }
}

fn missing(what: &str) -> StorefrontError {
    crate::config::ConfigError::Invalid(format!("no {what} configured")).into()
}

/// One visit to the store: catalog, cart, session and the controllers that
/// drive them, constructed once and shared by handle.
pub struct Storefront {
    config: StorefrontConfig,
    notices: Notices,
    session: Arc<Session>,
    catalog: Arc<CatalogStore>,
    cart: Arc<CartStore>,
    pagination: PaginationController,
    cards: Arc<ProductCardController>,
    form: ProductForm,
    login: LoginForm,
}

impl Storefront {
    pub fn builder() -> StorefrontBuilder {
        StorefrontBuilder::new()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cards(&self) -> &ProductCardController {
        &self.cards
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    // -- catalog --

    /// Fetch the catalog and show everything. A failure is posted as a notice
    /// and the previous catalog stays.
    pub async fn load(&self) -> StorefrontResult<VisibleList> {
        let result = self.catalog.load().await;
        self.cards.settle_fetch(result)
    }

    /// Re-fetch the catalog, keeping the filters.
    pub async fn refresh(&self) -> StorefrontResult<VisibleList> {
        self.cards.refresh_catalog().await
    }

    pub fn visible(&self) -> VisibleList {
        self.catalog.visible()
    }

    pub fn set_category(&self, category: &str, checked: bool) -> VisibleList {
        self.catalog.set_category(category, checked)
    }

    pub fn toggle_category(&self, category: &str) -> VisibleList {
        self.catalog.toggle_category(category)
    }

    pub fn set_search(&self, text: impl Into<String>) -> VisibleList {
        self.catalog.set_search(text)
    }

    pub fn clear_search(&self) -> VisibleList {
        self.catalog.clear_search()
    }

    pub fn facets(&self) -> Vec<CategoryFacet> {
        self.catalog.facets()
    }

    // -- pagination --

    /// The page currently shown.
    pub fn current_page(&self) -> PageView {
        self.pagination.current(&self.catalog.visible())
    }

    pub fn next_page(&self) -> bool {
        self.pagination.next(&self.catalog.visible())
    }

    pub fn prev_page(&self) -> bool {
        self.pagination.prev(&self.catalog.visible())
    }

    pub fn go_to_page(&self, page: usize) -> bool {
        self.pagination.go_to(&self.catalog.visible(), page)
    }

    /// The viewport changed width.
    pub fn resize(&self, width: u32) -> ViewportTier {
        self.pagination.resize(width)
    }

    // -- cart --

    /// Add the card's stepper quantity of a product to the cart.
    pub fn add_to_cart(&self, id: &ProductId) -> StorefrontResult<CartLine> {
        self.cards.add_to_cart(id)
    }

    pub fn remove_from_cart(&self, id: &ProductId) -> bool {
        self.cart.remove(id)
    }

    pub fn clear_cart(&self) {
        self.cart.clear();
    }

    /// Line count for the cart badge.
    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    pub fn checkout_summary(&self) -> CartSummary {
        self.cart.checkout_summary()
    }

    // -- session --

    pub async fn login(&self, email: &str, password: &str) -> StorefrontResult<()> {
        self.login.submit(email, password).await.map(|_| ())
    }

    pub async fn logout(&self) -> StorefrontResult<()> {
        self.login.logout().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

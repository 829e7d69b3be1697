//! The product creation form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use kiosk_commerce::catalog::NewProduct;
use kiosk_commerce::ProductId;
use kiosk_db::SharedRepository;
use kiosk_media::{ImageFile, ValidatedUploader};
use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use crate::card::ProductCardController;
use crate::notices::Notices;
use crate::session::Session;
use crate::{StorefrontError, StorefrontResult};

/// Field values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub cost: String,
    pub image: Option<ImageFile>,
    /// Inline error from the last submit.
    pub error: Option<String>,
}

/// Clears an in-flight flag when dropped.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> StorefrontResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StorefrontError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Creates products: validates the fields, uploads the image, stores the
/// product and refreshes the catalog through the cards.
pub struct ProductForm {
    cards: Arc<ProductCardController>,
    repo: SharedRepository,
    session: Arc<Session>,
    uploader: ValidatedUploader,
    notices: Notices,
    draft: Mutex<ProductDraft>,
    submitting: AtomicBool,
}

impl ProductForm {
    pub fn new(
        cards: Arc<ProductCardController>,
        repo: SharedRepository,
        session: Arc<Session>,
        uploader: ValidatedUploader,
        notices: Notices,
    ) -> Self {
        Self {
            cards,
            repo,
            session,
            uploader,
            notices,
            draft: Mutex::new(ProductDraft::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Copy of the current field values.
    pub fn draft(&self) -> ProductDraft {
        self.draft.lock().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.draft.lock().name = name.into();
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.draft.lock().category = category.into();
    }

    pub fn set_price(&self, price: impl Into<String>) {
        self.draft.lock().price = price.into();
    }

    pub fn set_cost(&self, cost: impl Into<String>) {
        self.draft.lock().cost = cost.into();
    }

    /// Pick an image, or clear it with `None`.
    pub fn set_image(&self, image: Option<ImageFile>) {
        self.draft.lock().image = image;
    }

    /// Empty every field.
    pub fn reset(&self) {
        *self.draft.lock() = ProductDraft::default();
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Submit the form.
    ///
    /// Field problems and image rejections are reported inline before any
    /// upload or repository call. Upload and repository failures post an
    /// error notice; the fields are kept so the user can retry.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> StorefrontResult<ProductId> {
        if !self.session.is_authenticated() {
            return Err(StorefrontError::Unauthorized);
        }
        let _in_flight = InFlight::acquire(&self.submitting)?;
        let draft = self.draft();

        let result = self.create(&draft).await;
        match &result {
            Ok(id) => {
                info!(product_id = %id, "product created");
                self.reset();
            }
            Err(e) if e.is_validation() => {
                self.draft.lock().error = Some(e.user_message());
            }
            Err(e) => {
                warn!(error = %e, "product creation failed");
                self.draft.lock().error = Some(e.user_message());
                self.notices.error(e.user_message());
            }
        }
        result
    }

    async fn create(&self, draft: &ProductDraft) -> StorefrontResult<ProductId> {
        // Check the text fields before spending an upload.
        let image_name = draft.image.as_ref().map(|f| f.name.as_str()).unwrap_or("pending");
        let mut product = NewProduct::from_form(
            &draft.name,
            &draft.category,
            &draft.price,
            &draft.cost,
            image_name,
        )?;

        let uploaded = self.uploader.upload(draft.image.as_ref()).await?;
        product.img = uploaded.url;

        let id = self.repo.create(product).await?;

        let mut message = String::from("product created");
        if let Some(note) = uploaded.note {
            message = format!("{message}; {note}");
        }
        self.notices.success(message);

        // A failed refresh is already posted as a notice.
        let _ = self.cards.refresh_catalog().await;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_auth::{AuthProvider, MemoryAuthProvider, PasswordHasher};
    use kiosk_commerce::cart::PricingMode;
    use kiosk_commerce::search::FilterMode;
    use kiosk_commerce::Money;
    use kiosk_db::{MemoryProductRepository, ProductRepository, RepoOp};
    use kiosk_media::{MediaError, RecordingImageHost, UploadPolicy};

    use crate::cart::CartStore;
    use crate::catalog::CatalogStore;
    use crate::config::EditingConfig;
    use crate::notices::NoticeLevel;

    struct Fixture {
        repo: Arc<MemoryProductRepository>,
        host: Arc<RecordingImageHost>,
        auth: Arc<MemoryAuthProvider>,
        catalog: Arc<CatalogStore>,
        cards: Arc<ProductCardController>,
        notices: Notices,
        form: ProductForm,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(MemoryProductRepository::new());
        let host = Arc::new(RecordingImageHost::new());
        let auth = Arc::new(MemoryAuthProvider::new(PasswordHasher::minimal()));
        auth.add_user("owner@kiosk.test", "secret", None).unwrap();
        auth.login("owner@kiosk.test", "secret").await.unwrap();
        let session = Arc::new(Session::new(auth.clone()));
        let catalog = Arc::new(CatalogStore::new(repo.clone(), FilterMode::default()));
        catalog.load().await.unwrap();
        let notices = Notices::new();
        let cards = Arc::new(ProductCardController::new(
            catalog.clone(),
            Arc::new(CartStore::new(PricingMode::default())),
            repo.clone(),
            session.clone(),
            notices.clone(),
            EditingConfig::default(),
        ));
        let form = ProductForm::new(
            cards.clone(),
            repo.clone(),
            session,
            ValidatedUploader::new(UploadPolicy::default(), host.clone()),
            notices.clone(),
        );
        Fixture {
            repo,
            host,
            auth,
            catalog,
            cards,
            notices,
            form,
        }
    }

    fn fill(form: &ProductForm) {
        form.set_name("Coca Cola 500ml");
        form.set_category("Bebidas");
        form.set_price("12.5");
        form.set_cost("8");
        form.set_image(Some(ImageFile::new("cola.png", "image/png", vec![0; 2048])));
    }

    #[tokio::test]
    async fn test_submit_creates_and_refreshes() {
        let f = fixture().await;
        fill(&f.form);

        let id = f.form.submit().await.unwrap();
        let product = f.catalog.product(&id).unwrap();
        assert_eq!(product.category.as_str(), "bebidas");
        assert_eq!(product.price, Money::new(1250));
        assert_eq!(product.img, "https://img.test/cola.png");

        assert_eq!(f.form.draft(), ProductDraft::default());
        assert_eq!(f.notices.latest().unwrap().level, NoticeLevel::Success);
        assert!(!f.form.is_submitting());
    }

    #[tokio::test]
    async fn test_refresh_after_create_prunes_cards() {
        let f = fixture().await;
        let gone = f
            .repo
            .create(NewProduct::from_form("Alfajor", "kiosco", "3", "1", "a.png").unwrap())
            .await
            .unwrap();
        f.catalog.refresh().await.unwrap();
        f.cards.increment(&gone);
        f.repo.delete(&gone).await.unwrap();

        fill(&f.form);
        let id = f.form.submit().await.unwrap();
        assert!(f.catalog.contains(&id));
        assert!(!f.catalog.contains(&gone));
        assert!(f.cards.tracked().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_makes_no_calls() {
        let f = fixture().await;
        fill(&f.form);
        f.form.set_cost("  ");

        let err = f.form.submit().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(f.form.draft().error.as_deref(), Some("cost is required"));
        assert_eq!(f.host.calls(), 0);
        assert_eq!(f.repo.calls(RepoOp::Create), 0);
    }

    #[tokio::test]
    async fn test_oversized_image_is_rejected_before_upload() {
        let f = fixture().await;
        fill(&f.form);
        f.form.set_image(Some(ImageFile::new("big.png", "image/png", vec![0; 6 * 1024 * 1024])));

        let err = f.form.submit().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Media(MediaError::TooLarge { .. })));
        assert_eq!(f.host.calls(), 0);
        assert_eq!(f.repo.calls(RepoOp::Create), 0);
        assert_eq!(f.form.draft().name, "Coca Cola 500ml");
    }

    #[tokio::test]
    async fn test_missing_image() {
        let f = fixture().await;
        fill(&f.form);
        f.form.set_image(None);

        let err = f.form.submit().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Media(MediaError::NoFile)));
        assert_eq!(f.host.calls(), 0);
    }

    #[tokio::test]
    async fn test_repository_failure_keeps_fields() {
        let f = fixture().await;
        f.repo.fail(RepoOp::Create);
        fill(&f.form);

        assert!(f.form.submit().await.is_err());
        assert_eq!(f.form.draft().price, "12.5");
        assert_eq!(f.notices.latest().unwrap().level, NoticeLevel::Error);
        assert!(f.catalog.is_empty());
    }

    #[tokio::test]
    async fn test_requires_sign_in() {
        let f = fixture().await;
        f.auth.logout().await.unwrap();
        fill(&f.form);

        assert!(matches!(f.form.submit().await, Err(StorefrontError::Unauthorized)));
        assert_eq!(f.host.calls(), 0);
    }

    #[test]
    fn test_in_flight_guard() {
        let flag = AtomicBool::new(false);
        let guard = InFlight::acquire(&flag).unwrap();
        assert!(matches!(InFlight::acquire(&flag), Err(StorefrontError::Busy)));
        drop(guard);
        assert!(InFlight::acquire(&flag).is_ok());
    }
}

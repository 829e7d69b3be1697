//! Image hosts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{MediaError, UploadPolicy};

/// A file picked in the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name as picked.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// URL or public path to store on the product.
    pub url: String,
    /// Host-side identifier, if the host assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// Instruction for the store owner, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UploadedImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: None,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Shared handle to an image host.
pub type SharedImageHost = Arc<dyn ImageHost>;

/// Stores product images and returns their URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload a file.
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, MediaError>;
}

/// Checks files against an [`UploadPolicy`] before handing them to a host.
///
/// A rejected file never reaches the inner host.
pub struct ValidatedUploader {
    policy: UploadPolicy,
    host: SharedImageHost,
}

impl ValidatedUploader {
    pub fn new(policy: UploadPolicy, host: SharedImageHost) -> Self {
        Self { policy, host }
    }

    /// The active policy.
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate, then upload.
    pub async fn upload(&self, file: Option<&ImageFile>) -> Result<UploadedImage, MediaError> {
        let file = file.ok_or(MediaError::NoFile)?;
        let image_type = self.policy.check(file)?;
        debug!(name = %file.name, size = file.size(), %image_type, "uploading image");
        self.host.upload(file).await
    }
}

/// Host that stores nothing and derives a public path instead.
///
/// The store owner copies the file into the site's public directory by
/// hand; the returned note says where.
#[derive(Debug, Clone)]
pub struct LocalPathHost {
    public_dir: String,
    site_root: String,
}

impl Default for LocalPathHost {
    fn default() -> Self {
        Self::new("/images/products")
    }
}

impl LocalPathHost {
    /// Create a host serving from `public_dir`.
    pub fn new(public_dir: impl Into<String>) -> Self {
        let public_dir = public_dir.into().trim_end_matches('/').to_string();
        Self {
            public_dir,
            site_root: "public".to_string(),
        }
    }

    /// Set the directory on disk that the public dir is served from.
    pub fn with_site_root(mut self, root: impl Into<String>) -> Self {
        self.site_root = root.into().trim_end_matches('/').to_string();
        self
    }

    /// `{timestamp_ms}_{name}` with whitespace runs replaced by `_`.
    pub fn file_name(name: &str, timestamp_ms: i64) -> String {
        format!("{timestamp_ms}_{}", underscore_whitespace(name))
    }

    /// The result of placing `name` at `timestamp_ms`.
    pub fn place(&self, name: &str, timestamp_ms: i64) -> UploadedImage {
        let file_name = Self::file_name(name, timestamp_ms);
        let url = format!("{}/{}", self.public_dir, file_name);
        let note = format!("copy the image to {}{}", self.site_root, url);
        UploadedImage {
            url,
            public_id: Some(file_name),
            note: Some(note),
        }
    }
}

#[async_trait]
impl ImageHost for LocalPathHost {
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, MediaError> {
        let placed = self.place(&file.name, Utc::now().timestamp_millis());
        info!(url = %placed.url, "image path assigned");
        Ok(placed)
    }
}

fn underscore_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Host that records uploads and answers with a fixed URL scheme.
///
/// Can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingImageHost {
    uploads: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl RecordingImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every upload with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Number of uploads attempted.
    pub fn calls(&self) -> usize {
        self.uploads.lock().len()
    }

    /// Names of files uploaded, in order.
    pub fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().clone()
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(&self, file: &ImageFile) -> Result<UploadedImage, MediaError> {
        self.uploads.lock().push(file.name.clone());
        if let Some(message) = self.failure.lock().clone() {
            return Err(MediaError::Upload(message));
        }
        Ok(UploadedImage::new(format!("https://img.test/{}", file.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(
            LocalPathHost::file_name("my  cola\tbottle.png", 1700000000000),
            "1700000000000_my_cola_bottle.png"
        );
    }

    #[test]
    fn test_place() {
        let host = LocalPathHost::new("/images/products/");
        let placed = host.place("agua.webp", 42);
        assert_eq!(placed.url, "/images/products/42_agua.webp");
        assert_eq!(placed.public_id.as_deref(), Some("42_agua.webp"));
        assert_eq!(
            placed.note.as_deref(),
            Some("copy the image to public/images/products/42_agua.webp")
        );
    }

    #[tokio::test]
    async fn test_local_host_upload() {
        let host = LocalPathHost::default();
        let file = ImageFile::new("a b.png", "image/png", vec![1, 2, 3]);
        let placed = host.upload(&file).await.unwrap();
        assert!(placed.url.starts_with("/images/products/"));
        assert!(placed.url.ends_with("_a_b.png"));
    }

    #[tokio::test]
    async fn test_oversized_file_never_reaches_host() {
        let host = Arc::new(RecordingImageHost::new());
        let uploader = ValidatedUploader::new(UploadPolicy::default(), host.clone());
        let file = ImageFile::new("big.png", "image/png", vec![0; 6 * 1024 * 1024]);

        let err = uploader.upload(Some(&file)).await.unwrap_err();
        assert!(matches!(err, MediaError::TooLarge { .. }));
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let host = Arc::new(RecordingImageHost::new());
        let uploader = ValidatedUploader::new(UploadPolicy::default(), host.clone());
        assert_eq!(uploader.upload(None).await, Err(MediaError::NoFile));
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_file_is_uploaded() {
        let host = Arc::new(RecordingImageHost::new());
        let uploader = ValidatedUploader::new(UploadPolicy::default(), host.clone());
        let file = ImageFile::new("ok.jpg", "image/jpeg", vec![0; 1024]);

        let uploaded = uploader.upload(Some(&file)).await.unwrap();
        assert_eq!(uploaded.url, "https://img.test/ok.jpg");
        assert_eq!(host.uploaded(), vec!["ok.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_host_failure_is_not_validation() {
        let host = Arc::new(RecordingImageHost::new());
        host.fail_with("quota exceeded");
        let uploader = ValidatedUploader::new(UploadPolicy::default(), host.clone());
        let file = ImageFile::new("ok.png", "image/png", vec![0; 8]);

        let err = uploader.upload(Some(&file)).await.unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(host.calls(), 1);
    }
}

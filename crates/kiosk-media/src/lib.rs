//! Product images for the Kiosk storefront.
//!
//! Files are checked against an [`UploadPolicy`] on the client before any
//! network call, then handed to an [`ImageHost`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kiosk_media::{ImageFile, LocalPathHost, UploadPolicy, ValidatedUploader};
//!
//! let uploader = ValidatedUploader::new(UploadPolicy::default(), Arc::new(LocalPathHost::default()));
//! let file = ImageFile::new("cola.png", "image/png", bytes);
//! let image = uploader.upload(Some(&file)).await?;
//! ```

mod error;
mod host;
mod policy;

pub use error::MediaError;
pub use host::{
    ImageFile, ImageHost, LocalPathHost, RecordingImageHost, SharedImageHost, UploadedImage,
    ValidatedUploader,
};
pub use policy::{ImageType, UploadPolicy};

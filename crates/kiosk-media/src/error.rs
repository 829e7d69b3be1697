//! Media errors.

use thiserror::Error;

/// Errors from image validation and upload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// No file was chosen.
    #[error("no file provided")]
    NoFile,

    /// The file exceeds the size ceiling.
    #[error("file too large: {size} / {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    /// The MIME type is not on the allowlist.
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    /// The policy itself is unusable.
    #[error("invalid upload policy: {0}")]
    InvalidPolicy(String),

    /// The host rejected or failed the upload.
    #[error("upload failed: {0}")]
    Upload(String),
}

impl MediaError {
    /// Check if the error was caught before contacting the host.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MediaError::NoFile | MediaError::TooLarge { .. } | MediaError::UnsupportedType(_)
        )
    }
}

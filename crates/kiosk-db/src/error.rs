//! Repository error types.

use kiosk_commerce::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the product collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// The backing store could not be reached.
    #[error("Product store unavailable: {0}")]
    Unavailable(String),

    /// Failed to deserialize a document.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),

    /// No document with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Two documents share one id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::DeserializeError(e.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        DbError::Unavailable(e.to_string())
    }
}

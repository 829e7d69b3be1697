//! Commerce error types.

use thiserror::Error;

/// Errors that can occur when building domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Quantity below one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Amount could not be parsed as a decimal number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Amount is negative where only non-negative values are allowed.
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    /// A required field was left empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Whether this error comes from user input rather than from a system failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CommerceError::SerializationError(_))
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

//! Storefront errors.

use kiosk_auth::AuthError;
use kiosk_commerce::{CommerceError, ProductId};
use kiosk_db::DbError;
use kiosk_media::MediaError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/// Errors surfaced by the storefront controllers.
///
/// Two kinds matter to the UI: validation errors, caught before any
/// collaborator call, and collaborator failures. See
/// [`is_validation`](StorefrontError::is_validation).
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Input rejected by the domain model.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The product repository failed.
    #[error("product store error: {0}")]
    Repository(#[from] DbError),

    /// The identity provider failed or rejected credentials.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// The image was rejected or the upload failed.
    #[error("image error: {0}")]
    Media(#[from] MediaError),

    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The action needs a signed-in user.
    #[error("sign-in required")]
    Unauthorized,

    /// The control is disabled while a request is in flight.
    #[error("request already in flight")]
    Busy,

    /// The product is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The editor is not open.
    #[error("editor is not open")]
    EditorClosed,
}

impl StorefrontError {
    /// Check if the error was caught before any collaborator call.
    pub fn is_validation(&self) -> bool {
        match self {
            StorefrontError::Commerce(e) => e.is_validation(),
            StorefrontError::Media(e) => e.is_validation(),
            StorefrontError::Auth(e) => e.is_validation(),
            StorefrontError::Repository(_) | StorefrontError::Config(_) => false,
            StorefrontError::Unauthorized
            | StorefrontError::Busy
            | StorefrontError::UnknownProduct(_)
            | StorefrontError::EditorClosed => true,
        }
    }

    /// Text for the notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Commerce(CommerceError::MissingField(field)) => {
                format!("{field} is required")
            }
            StorefrontError::Commerce(CommerceError::InvalidQuantity(_)) => {
                "quantity must be at least 1".to_string()
            }
            StorefrontError::Commerce(
                CommerceError::InvalidAmount(_) | CommerceError::NegativeAmount(_),
            ) => "enter a valid amount".to_string(),
            StorefrontError::Commerce(CommerceError::SerializationError(_)) => {
                "something went wrong, try again".to_string()
            }
            StorefrontError::Repository(_) => {
                "could not reach the product store, try again".to_string()
            }
            StorefrontError::Auth(AuthError::InvalidCredentials) => {
                "could not sign in, check your credentials".to_string()
            }
            StorefrontError::Auth(AuthError::MissingField(field)) => {
                format!("{field} is required")
            }
            StorefrontError::Auth(AuthError::NotSignedIn) | StorefrontError::Unauthorized => {
                "sign in to manage products".to_string()
            }
            StorefrontError::Auth(_) => "could not reach the sign-in service, try again".to_string(),
            StorefrontError::Media(MediaError::NoFile) => "choose an image".to_string(),
            StorefrontError::Media(MediaError::TooLarge { limit, .. }) => {
                format!("image is too large (max {})", format_bytes(*limit))
            }
            StorefrontError::Media(MediaError::UnsupportedType(_)) => {
                "image must be JPEG, PNG or WebP".to_string()
            }
            StorefrontError::Media(_) => "could not upload the image, try again".to_string(),
            StorefrontError::Config(e) => e.to_string(),
            StorefrontError::Busy => "please wait for the current request".to_string(),
            StorefrontError::UnknownProduct(_) => "this product is no longer available".to_string(),
            StorefrontError::EditorClosed => "open the editor first".to_string(),
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds() {
        assert!(StorefrontError::from(CommerceError::InvalidAmount("x".into())).is_validation());
        assert!(StorefrontError::from(MediaError::TooLarge { size: 2, limit: 1 }).is_validation());
        assert!(StorefrontError::Unauthorized.is_validation());
        assert!(!StorefrontError::from(DbError::Unavailable("down".into())).is_validation());
        assert!(!StorefrontError::from(MediaError::Upload("500".into())).is_validation());
        assert!(!StorefrontError::from(AuthError::InvalidCredentials).is_validation());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            StorefrontError::from(AuthError::InvalidCredentials).user_message(),
            "could not sign in, check your credentials"
        );
        assert_eq!(
            StorefrontError::from(MediaError::TooLarge {
                size: 6 * 1024 * 1024,
                limit: 5 * 1024 * 1024
            })
            .user_message(),
            "image is too large (max 5 MB)"
        );
        assert_eq!(
            StorefrontError::from(CommerceError::MissingField("name")).user_message(),
            "name is required"
        );
    }
}

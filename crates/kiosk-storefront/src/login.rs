//! Sign-in and sign-out.

use std::sync::atomic::{AtomicBool, Ordering};

use kiosk_auth::{AuthError, SharedAuthProvider, User};
use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use crate::form::InFlight;
use crate::notices::Notices;
use crate::{StorefrontError, StorefrontResult};

/// Email and password form backed by the auth provider.
///
/// The resulting session change reaches the rest of the storefront through
/// the provider's subscription, not through this form.
pub struct LoginForm {
    provider: SharedAuthProvider,
    notices: Notices,
    pending: AtomicBool,
    error: Mutex<Option<String>>,
}

impl LoginForm {
    pub fn new(provider: SharedAuthProvider, notices: Notices) -> Self {
        Self {
            provider,
            notices,
            pending: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    /// Whether a sign-in is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Message from the last failed attempt.
    pub fn error(&self) -> Option<String> {
        self.error.lock().clone()
    }

    /// Sign in.
    ///
    /// Empty fields are rejected without contacting the provider. Wrong
    /// credentials and provider outages both leave the user signed out.
    #[instrument(skip(self, password))]
    pub async fn submit(&self, email: &str, password: &str) -> StorefrontResult<User> {
        let missing = if email.trim().is_empty() {
            Some("email")
        } else if password.is_empty() {
            Some("password")
        } else {
            None
        };
        if let Some(field) = missing {
            let err = StorefrontError::from(AuthError::MissingField(field));
            *self.error.lock() = Some(err.user_message());
            return Err(err);
        }

        let result = {
            let _in_flight = InFlight::acquire(&self.pending)?;
            self.provider.login(email, password).await
        };

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "signed in");
                *self.error.lock() = None;
                Ok(user)
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                warn!(error = %err, "sign-in failed");
                let message = err.user_message();
                *self.error.lock() = Some(message.clone());
                self.notices.error(message);
                Err(err)
            }
        }
    }

    /// Sign out.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> StorefrontResult<()> {
        match self.provider.logout().await {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(e) => {
                let err = StorefrontError::from(e);
                self.notices.error(err.user_message());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use kiosk_auth::{AuthProvider, MemoryAuthProvider, PasswordHasher};

    fn form() -> (Arc<MemoryAuthProvider>, Notices, LoginForm) {
        let provider = Arc::new(MemoryAuthProvider::new(PasswordHasher::minimal()));
        provider.add_user("owner@kiosk.test", "secret", Some("Owner".into())).unwrap();
        let notices = Notices::new();
        let form = LoginForm::new(provider.clone(), notices.clone());
        (provider, notices, form)
    }

    #[tokio::test]
    async fn test_sign_in() {
        let (provider, _, form) = form();
        let user = form.submit("owner@kiosk.test", "secret").await.unwrap();
        assert_eq!(user.email, "owner@kiosk.test");
        assert!(provider.is_authenticated());
        assert!(form.error().is_none());
        assert!(!form.is_pending());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (provider, notices, form) = form();
        let err = form.submit("owner@kiosk.test", "nope").await.unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(
            form.error().as_deref(),
            Some("could not sign in, check your credentials")
        );
        assert_eq!(notices.len(), 1);
        assert!(!provider.is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_fields_skip_provider() {
        let (provider, _, form) = form();
        assert!(form.submit("  ", "secret").await.unwrap_err().is_validation());
        assert!(form.submit("owner@kiosk.test", "").await.unwrap_err().is_validation());
        assert_eq!(form.error().as_deref(), Some("password is required"));
        assert_eq!(provider.login_calls(), 0);
    }

    #[tokio::test]
    async fn test_logout() {
        let (provider, _, form) = form();
        form.submit("owner@kiosk.test", "secret").await.unwrap();
        form.logout().await.unwrap();
        assert!(!provider.is_authenticated());
    }
}

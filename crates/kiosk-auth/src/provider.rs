//! The identity service contract.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{AuthCallback, AuthError, AuthState, Subscription, User};

/// Shared handle to an identity provider.
pub type SharedAuthProvider = Arc<dyn AuthProvider>;

/// Email/password sign-in with session-change notifications.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign in. Fails with [`AuthError::InvalidCredentials`] on a bad email
    /// or password.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Sign out.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Register for session changes, including the initial resolution.
    fn subscribe(&self, callback: AuthCallback) -> Subscription;

    /// Current session state.
    fn state(&self) -> AuthState;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    /// Whether a user is signed in.
    fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }
}

//! The storefront's view of the signed-in user.

use std::sync::Arc;

use kiosk_auth::{AuthState, SharedAuthProvider, Subscription, User};
use parking_lot::RwLock;
use tracing::info;

/// Tracks the session through provider callbacks.
///
/// Starts as [`AuthState::Resolving`] until the provider reports a session.
/// The subscription lives as long as the `Session`.
pub struct Session {
    provider: SharedAuthProvider,
    state: Arc<RwLock<AuthState>>,
    _subscription: Subscription,
}

impl Session {
    /// Subscribe to `provider`.
    pub fn new(provider: SharedAuthProvider) -> Self {
        let state = Arc::new(RwLock::new(AuthState::Resolving));
        let sink = Arc::clone(&state);
        let subscription = provider.subscribe(Arc::new(move |user: Option<&User>| {
            let next = AuthState::from_user(user.cloned());
            match &next {
                AuthState::SignedIn(user) => info!(user_id = %user.id, "session active"),
                _ => info!("no active session"),
            }
            *sink.write() = next;
        }));

        Self {
            provider,
            state,
            _subscription: subscription,
        }
    }

    /// Current state.
    pub fn state(&self) -> AuthState {
        self.state.read().clone()
    }

    /// Whether the provider has reported a session yet.
    pub fn is_resolved(&self) -> bool {
        self.state.read().is_resolved()
    }

    /// `user != None`.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    /// The provider behind this session.
    pub fn provider(&self) -> &SharedAuthProvider {
        &self.provider
    }
}

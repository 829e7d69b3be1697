//! In-memory identity provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kiosk_commerce::UserId;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::user::normalize_email;
use crate::{
    AuthCallback, AuthError, AuthProvider, AuthState, PasswordHasher, SessionWatcher,
    Subscription, User, UserCredentials,
};

/// [`AuthProvider`] over a local account table.
///
/// Used by the CLI and by tests. Passwords are stored as Argon2 hashes.
pub struct MemoryAuthProvider {
    hasher: PasswordHasher,
    users: RwLock<HashMap<String, UserCredentials>>,
    watcher: SessionWatcher,
    latency: Option<Duration>,
    unavailable: AtomicBool,
    login_calls: AtomicUsize,
}

impl MemoryAuthProvider {
    /// Create a provider whose session is already resolved as signed out.
    pub fn new(hasher: PasswordHasher) -> Self {
        let provider = Self::unresolved(hasher);
        provider.watcher.publish(AuthState::SignedOut);
        provider
    }

    /// Create a provider that stays [`AuthState::Resolving`] until
    /// [`resolve`](Self::resolve) is called.
    pub fn unresolved(hasher: PasswordHasher) -> Self {
        Self {
            hasher,
            users: RwLock::new(HashMap::new()),
            watcher: SessionWatcher::new(),
            latency: None,
            unavailable: AtomicBool::new(false),
            login_calls: AtomicUsize::new(0),
        }
    }

    /// Delay login and logout by `delay`.
    pub fn with_latency(mut self, delay: Duration) -> Self {
        self.latency = Some(delay);
        self
    }

    /// Report the initial session: the given user, or signed out.
    pub fn resolve(&self, user: Option<User>) {
        self.watcher.publish(AuthState::from_user(user));
    }

    /// Register an account.
    pub fn add_user(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<User, AuthError> {
        let key = normalize_email(email);
        if key.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        if self.users.read().contains_key(&key) {
            return Err(AuthError::UserAlreadyExists(key));
        }

        let user = User::new(UserId::generate(), &key, name);
        let password_hash = self.hasher.hash(password)?;
        self.users.write().insert(
            key,
            UserCredentials {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    /// Simulate an identity service outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of login attempts so far.
    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    /// Access the watcher, for publishing sessions from outside.
    pub fn watcher(&self) -> &SessionWatcher {
        &self.watcher
    }

    async fn round_trip(&self) -> Result<(), AuthError> {
        if let Some(delay) = self.latency {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable("identity service offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new(PasswordHasher::default())
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let key = normalize_email(email);
        let credentials = self.users.read().get(&key).cloned();
        let Some(credentials) = credentials else {
            warn!("login for unknown account");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &credentials.password_hash)? {
            warn!(user_id = %credentials.user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %credentials.user.id, "signed in");
        self.watcher
            .publish(AuthState::SignedIn(credentials.user.clone()));
        Ok(credentials.user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.round_trip().await?;
        if let Some(user) = self.watcher.current_user() {
            info!(user_id = %user.id, "signed out");
        }
        self.watcher.publish(AuthState::SignedOut);
        Ok(())
    }

    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        self.watcher.subscribe(callback)
    }

    fn state(&self) -> AuthState {
        self.watcher.state()
    }
}

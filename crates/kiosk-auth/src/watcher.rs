//! Session-change fan-out.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tracing::debug;

use crate::{AuthState, User};

/// Callback invoked with the signed-in user, or `None` after sign-out.
pub type AuthCallback = Arc<dyn Fn(Option<&User>) + Send + Sync>;

#[derive(Default)]
struct WatcherInner {
    /// Held across a state change and its delivery. Reentrant so callbacks
    /// may publish or subscribe.
    delivery: ReentrantMutex<()>,
    state: RwLock<AuthState>,
    subscribers: Mutex<BTreeMap<u64, AuthCallback>>,
    next_id: AtomicU64,
}

/// Holds the current [`AuthState`] and notifies subscribers of changes.
///
/// Changes reach subscribers in the order they were stored, so the last
/// callback a subscriber sees always matches [`state`](Self::state).
/// Clones share state.
#[derive(Clone, Default)]
pub struct SessionWatcher {
    inner: Arc<WatcherInner>,
}

impl SessionWatcher {
    /// Create a watcher that has not resolved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> AuthState {
        self.inner.state.read().clone()
    }

    /// Current user, if signed in.
    pub fn current_user(&self) -> Option<User> {
        self.inner.state.read().user().cloned()
    }

    /// Register a callback.
    ///
    /// If the session has already resolved, the callback fires immediately
    /// with the current user. It then fires on every later change until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let _delivery = self.inner.delivery.lock();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().insert(id, Arc::clone(&callback));

        let state = self.state();
        if state.is_resolved() {
            callback(state.user());
        }

        Subscription {
            id,
            watcher: Arc::downgrade(&self.inner),
        }
    }

    /// Record a new state and notify subscribers.
    ///
    /// Publishing [`AuthState::Resolving`] is ignored; a resolved session
    /// never goes back to resolving.
    pub fn publish(&self, state: AuthState) {
        if !state.is_resolved() {
            return;
        }
        let _delivery = self.inner.delivery.lock();
        *self.inner.state.write() = state.clone();

        // Callbacks run without the subscriber lock so they may subscribe or
        // drop subscriptions themselves.
        let callbacks: Vec<AuthCallback> =
            self.inner.subscribers.lock().values().cloned().collect();
        debug!(
            authenticated = state.is_authenticated(),
            subscribers = callbacks.len(),
            "session changed"
        );
        for callback in callbacks {
            callback(state.user());
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl fmt::Debug for SessionWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionWatcher")
            .field("state", &*self.inner.state.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for a registered callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    watcher: Weak<WatcherInner>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.watcher.upgrade() {
            inner.subscribers.lock().remove(&self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

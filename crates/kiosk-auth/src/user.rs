//! User types.

use kiosk_commerce::UserId;
use serde::{Deserialize, Serialize};

/// A signed-in store owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Email address, lower-cased.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
}

impl User {
    /// Create a user.
    pub fn new(id: UserId, email: impl AsRef<str>, name: Option<String>) -> Self {
        Self {
            id,
            email: normalize_email(email.as_ref()),
            name,
        }
    }

    /// Name if set, else the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Stored user credentials.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The account.
    pub user: User,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Trim and lower-case an email for lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Session state as seen by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum AuthState {
    /// The identity service has not reported a session yet.
    #[default]
    Resolving,
    /// No user is signed in.
    SignedOut,
    /// A user is signed in.
    SignedIn(User),
}

impl AuthState {
    /// Build from an optional user.
    pub fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => AuthState::SignedIn(user),
            None => AuthState::SignedOut,
        }
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    /// Whether the first session event has arrived.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthState::Resolving)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

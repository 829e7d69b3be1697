//! Authentication for the Kiosk storefront.
//!
//! Store owners sign in with email and password. The storefront learns about
//! sign-in and sign-out through [`SessionWatcher`] callbacks rather than by
//! polling, and gates its editing affordances on the current [`AuthState`].

mod error;
mod memory;
mod password;
mod provider;
mod user;
mod watcher;

pub use error::AuthError;
pub use memory::MemoryAuthProvider;
pub use password::PasswordHasher;
pub use provider::{AuthProvider, SharedAuthProvider};
pub use user::{normalize_email, AuthState, User, UserCredentials};
pub use watcher::{AuthCallback, SessionWatcher, Subscription};

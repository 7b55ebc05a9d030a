//! Trait abstraction for the hosted account service to enable mocking in tests

use crate::state::{Notification, Session, UserProfile};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by the account service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("An account for {0} already exists")]
    AccountExists(String),
    #[error("No account found for {0}")]
    UnknownAccount(String),
    #[error("Session expired, please sign in again")]
    NotSignedIn,
}

/// Account service operations, the downstream target of every form submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountBackend: Send + Sync {
    /// Record a name/email registration
    async fn register(&mut self, name: &str, email: &str) -> Result<(), BackendError>;

    /// Create an account with a password
    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserProfile, BackendError>;

    /// Exchange credentials for a session
    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Send password reset instructions to an address
    async fn request_password_reset(&mut self, email: &str) -> Result<(), BackendError>;

    /// Update the signed-in user's profile metadata
    async fn update_profile(
        &mut self,
        session: &Session,
        full_name: &str,
        username: &str,
    ) -> Result<UserProfile, BackendError>;

    /// Notifications visible to the signed-in user, newest first
    async fn list_notifications(
        &mut self,
        session: &Session,
    ) -> Result<Vec<Notification>, BackendError>;

    /// End a session
    async fn sign_out(&mut self, session: &Session) -> Result<(), BackendError>;
}

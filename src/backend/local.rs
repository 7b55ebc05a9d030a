//! In-process account service
//!
//! Keeps accounts, sessions and notifications in memory. Used when no hosted
//! service is configured and as the default target for the forms.

use super::traits::{AccountBackend, BackendError};
use crate::state::{Notification, Session, UserProfile};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

struct Account {
    profile: UserProfile,
    password: String,
}

/// Name/email pair recorded by the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
}

/// Account service backed by process memory
pub struct LocalBackend {
    accounts: HashMap<String, Account>,
    sessions: HashMap<Uuid, String>,
    registrations: Vec<Registration>,
    notifications: Vec<Notification>,
}

impl LocalBackend {
    /// Create a backend with the sample notification feed
    pub fn new() -> Self {
        let now = Utc::now();
        let notifications = [
            ("Jane Doe", "Web Design", Duration::hours(2)),
            ("John Smith", "App Mockup", Duration::hours(5)),
            ("Sara Lee", "Marketing Strategy", Duration::days(1)),
        ]
        .into_iter()
        .map(|(sender, subject, age)| Notification {
            id: Uuid::new_v4(),
            sender: sender.to_string(),
            subject: subject.to_string(),
            created_at: now - age,
        })
        .collect();

        Self {
            accounts: HashMap::new(),
            sessions: HashMap::new(),
            registrations: Vec::new(),
            notifications,
        }
    }

    /// Seed an account
    #[cfg(test)]
    pub fn with_account(mut self, email: &str, password: &str, full_name: &str) -> Self {
        self.insert_account(email, password, full_name);
        self
    }

    #[cfg(test)]
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    fn insert_account(&mut self, email: &str, password: &str, full_name: &str) -> UserProfile {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: email.trim().to_string(),
            full_name: full_name.to_string(),
            username: String::new(),
        };
        self.accounts.insert(
            account_key(email),
            Account {
                profile: profile.clone(),
                password: password.to_string(),
            },
        );
        profile
    }

    fn account_for(&mut self, session: &Session) -> Result<&mut Account, BackendError> {
        let key = self
            .sessions
            .get(&session.token)
            .ok_or(BackendError::NotSignedIn)?;
        self.accounts
            .get_mut(key)
            .ok_or_else(|| BackendError::UnknownAccount(session.user.email.clone()))
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AccountBackend for LocalBackend {
    async fn register(&mut self, name: &str, email: &str) -> Result<(), BackendError> {
        let registration = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        if self
            .registrations
            .iter()
            .any(|r| account_key(&r.email) == account_key(&registration.email))
        {
            return Err(BackendError::AccountExists(registration.email));
        }
        tracing::debug!(
            "Recording registration for {} <{}>",
            registration.name,
            registration.email
        );
        self.registrations.push(registration);
        Ok(())
    }

    async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<UserProfile, BackendError> {
        if self.accounts.contains_key(&account_key(email)) {
            return Err(BackendError::AccountExists(email.trim().to_string()));
        }
        Ok(self.insert_account(email, password, full_name))
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, BackendError> {
        let key = account_key(email);
        let account = self
            .accounts
            .get(&key)
            .filter(|a| a.password == password)
            .ok_or(BackendError::InvalidCredentials)?;

        let session = Session {
            token: Uuid::new_v4(),
            user: account.profile.clone(),
            signed_in_at: Utc::now(),
        };
        self.sessions.insert(session.token, key);
        Ok(session)
    }

    async fn request_password_reset(&mut self, email: &str) -> Result<(), BackendError> {
        // Same answer whether or not the account exists
        tracing::debug!(
            "Password reset requested for {} (known: {})",
            email.trim(),
            self.accounts.contains_key(&account_key(email))
        );
        Ok(())
    }

    async fn update_profile(
        &mut self,
        session: &Session,
        full_name: &str,
        username: &str,
    ) -> Result<UserProfile, BackendError> {
        let account = self.account_for(session)?;
        account.profile.full_name = full_name.to_string();
        account.profile.username = username.to_string();
        Ok(account.profile.clone())
    }

    async fn list_notifications(
        &mut self,
        session: &Session,
    ) -> Result<Vec<Notification>, BackendError> {
        self.account_for(session)?;
        let mut notifications = self.notifications.clone();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn sign_out(&mut self, session: &Session) -> Result<(), BackendError> {
        self.sessions.remove(&session.token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio_test::assert_ok;

    fn seeded() -> LocalBackend {
        LocalBackend::new().with_account("alice@example.com", "hunter22", "Alice Smith")
    }

    #[tokio::test]
    async fn test_sign_in_with_correct_password() {
        let mut backend = seeded();
        let session = backend.sign_in("Alice@Example.com ", "hunter22").await.unwrap();
        assert_eq!(session.user.full_name, "Alice Smith");
    }

    #[tokio::test]
    async fn test_sign_in_rejects_wrong_password() {
        let mut backend = seeded();
        let err = backend.sign_in("alice@example.com", "nope").await.unwrap_err();
        assert_eq!(err, BackendError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_in_rejects_unknown_account() {
        let mut backend = LocalBackend::new();
        let err = backend.sign_in("bob@example.com", "x").await.unwrap_err();
        assert_eq!(err, BackendError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let mut backend = LocalBackend::new();
        let profile = backend
            .sign_up("bob@example.com", "pw", "Bob Jones")
            .await
            .unwrap();
        assert_eq!(profile.email, "bob@example.com");
        assert_ok!(backend.sign_in("bob@example.com", "pw").await);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_fails() {
        let mut backend = seeded();
        let err = backend
            .sign_up("ALICE@example.com", "pw", "Other")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BackendError::AccountExists("ALICE@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_records_trimmed_values() {
        let mut backend = LocalBackend::new();
        backend.register(" Alice ", " a@b.co ").await.unwrap();
        assert_eq!(
            backend.registrations(),
            &[Registration {
                name: "Alice".to_string(),
                email: "a@b.co".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_register_rejects_same_email_twice() {
        let mut backend = LocalBackend::new();
        assert_ok!(backend.register("Alice", "a@b.co").await);
        let err = backend.register("Alicia", " A@B.co").await.unwrap_err();
        assert_eq!(err, BackendError::AccountExists("A@B.co".to_string()));
        assert_eq!(backend.registrations().len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_persists() {
        let mut backend = seeded();
        let session = backend.sign_in("alice@example.com", "hunter22").await.unwrap();
        let profile = backend
            .update_profile(&session, "Alice B. Smith", "alice")
            .await
            .unwrap();
        assert_eq!(profile.username, "alice");

        let again = backend.sign_in("alice@example.com", "hunter22").await.unwrap();
        assert_eq!(again.user.full_name, "Alice B. Smith");
    }

    #[tokio::test]
    async fn test_notifications_newest_first() {
        let mut backend = seeded();
        let session = backend.sign_in("alice@example.com", "hunter22").await.unwrap();
        let notifications = backend.list_notifications(&session).await.unwrap();
        let senders: Vec<&str> = notifications.iter().map(|n| n.sender.as_str()).collect();
        assert_eq!(senders, vec!["Jane Doe", "John Smith", "Sara Lee"]);
    }

    #[tokio::test]
    async fn test_signed_out_session_is_rejected() {
        let mut backend = seeded();
        let session = backend.sign_in("alice@example.com", "hunter22").await.unwrap();
        backend.sign_out(&session).await.unwrap();
        let err = backend.list_notifications(&session).await.unwrap_err();
        assert_eq!(err, BackendError::NotSignedIn);
    }

    #[tokio::test]
    async fn test_password_reset_does_not_reveal_accounts() {
        let mut backend = seeded();
        assert_ok!(backend.request_password_reset("alice@example.com").await);
        assert_ok!(backend.request_password_reset("nobody@example.com").await);
    }
}

//! Application state definitions

use super::forms::AccountForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    SignUp,
    Registration,
    Dashboard,
    Profile,
}

impl View {
    /// Views that need a signed-in session
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile)
    }
}

/// Signed-in user's account data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub username: String,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

/// Authenticated session returned by the account service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub user: UserProfile,
    pub signed_in_at: DateTime<Utc>,
}

/// Dashboard notification entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub sender: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Relative age such as "2 hours ago"
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let age = now.signed_duration_since(self.created_at);
        let (amount, unit) = if age.num_days() > 0 {
            (age.num_days(), "day")
        } else if age.num_hours() > 0 {
            (age.num_hours(), "hour")
        } else if age.num_minutes() > 0 {
            (age.num_minutes(), "minute")
        } else {
            return "just now".to_string();
        };
        let plural = if amount == 1 { "" } else { "s" };
        format!("{amount} {unit}{plural} ago")
    }
}

/// Message shown above a form after a backend round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    Info(String),
    Error(String),
}

impl FormNotice {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(s) | Self::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Session
    pub session: Option<Session>,
    pub notifications: Vec<Notification>,
    pub notifications_error: Option<String>,
    pub selected_index: usize,

    // Form state
    pub form: Option<AccountForm>,
    pub form_notice: Option<FormNotice>,

    // Errors waiting to be shown in the modal dialog
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Drop everything tied to the signed-in user
    pub fn clear_session(&mut self) {
        self.session = None;
        self.notifications.clear();
        self.notifications_error = None;
        self.selected_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notification(age: Duration, now: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            sender: "Jane Doe".to_string(),
            subject: "Web Design".to_string(),
            created_at: now - age,
        }
    }

    #[test]
    fn test_default_view_is_login() {
        assert_eq!(AppState::default().current_view, View::Login);
    }

    #[test]
    fn test_requires_session() {
        assert!(View::Dashboard.requires_session());
        assert!(View::Profile.requires_session());
        assert!(!View::Login.requires_session());
        assert!(!View::Registration.requires_session());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState::default();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down(2);
        state.move_selection_down(2);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_age_labels() {
        let now = Utc::now();
        assert_eq!(notification(Duration::hours(2), now).age_label(now), "2 hours ago");
        assert_eq!(notification(Duration::days(1), now).age_label(now), "1 day ago");
        assert_eq!(
            notification(Duration::minutes(1), now).age_label(now),
            "1 minute ago"
        );
        assert_eq!(notification(Duration::seconds(5), now).age_label(now), "just now");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = UserProfile {
            id: Uuid::new_v4(),
            email: "a@b.co".to_string(),
            full_name: " ".to_string(),
            username: String::new(),
        };
        assert_eq!(user.display_name(), "a@b.co");
        user.full_name = "Alice".to_string();
        assert_eq!(user.display_name(), "Alice");
    }
}

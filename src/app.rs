//! Application state and core logic
//!
//! Translates key events into field edits and submission attempts, and forwards
//! submissions that pass validation to the account service.

use crate::backend::{AccountBackend, BackendError};
use crate::config::TuiConfig;
use crate::state::{AccountForm, AccountRequest, AppState, FormKind, FormNotice, View};
use crate::validation::{FieldKind, RuleTable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

const REGISTRATION_FAILED: &str = "There was an error registering your account.";
const SIGN_UP_SUCCEEDED: &str =
    "Registration successful! Please check your email to confirm your account.";
const PROFILE_SAVED: &str = "Profile updated successfully!";
const PROFILE_FAILED: &str = "There was an error updating your profile.";
const RESET_NEEDS_EMAIL: &str = "Please enter your email.";
const RESET_SENT: &str = "Check your email for reset instructions.";
const NOTIFICATIONS_FAILED: &str = "Failed to fetch notifications. Please try again.";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Account service every valid submission is forwarded to
    backend: Box<dyn AccountBackend>,
    config: TuiConfig,
    rules: Arc<RuleTable>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance showing the login form
    pub fn new(backend: Box<dyn AccountBackend>, config: TuiConfig) -> Self {
        let rules = Arc::new(RuleTable::from_policy(&config.validation));
        let mut app = Self {
            state: AppState::default(),
            backend,
            config,
            rules,
            quit: false,
        };
        app.open_form(FormKind::Login);
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Switch views, building the view's form and loading its data
    pub async fn navigate(&mut self, view: View) -> Result<()> {
        let view = if view.requires_session() && self.state.session.is_none() {
            tracing::debug!("No session for {view:?}, showing login");
            View::Login
        } else {
            view
        };

        self.state.current_view = view;
        self.state.form_notice = None;
        self.state.form = None;

        match view {
            View::Login => self.open_form(FormKind::Login),
            View::SignUp => self.open_form(FormKind::SignUp),
            View::Registration => self.open_form(FormKind::Registration),
            View::Profile => {
                if let Some(session) = &self.state.session {
                    self.state.form = Some(AccountForm::profile(self.rules.clone(), &session.user));
                }
            }
            View::Dashboard => self.load_notifications().await?,
        }
        Ok(())
    }

    fn open_form(&mut self, kind: FormKind) {
        let mut form = AccountForm::new(kind, self.rules.clone());
        if kind == FormKind::Login {
            if let Some(email) = self.config.remembered_email() {
                form.controller = form.controller.with_value(FieldKind::Email, email);
            }
        }
        self.state.form = Some(form);
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Dashboard => self.handle_dashboard_key(key).await,
            _ => self.handle_form_key(key).await,
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let view = self.state.current_view;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => match view {
                View::Login => self.quit = true,
                View::SignUp | View::Registration => self.navigate(View::Login).await?,
                View::Profile | View::Dashboard => self.navigate(View::Dashboard).await?,
            },
            KeyCode::Enter => self.submit_form().await?,
            KeyCode::Char('s') if ctrl => self.submit_form().await?,
            KeyCode::Char('n') if ctrl && view == View::Login => {
                self.navigate(View::SignUp).await?
            }
            KeyCode::Char('r') if ctrl && view == View::Login => {
                self.navigate(View::Registration).await?
            }
            KeyCode::Char('f') if ctrl && view == View::Login => {
                self.request_password_reset().await?
            }
            KeyCode::Char('l') if ctrl && view == View::SignUp => {
                self.navigate(View::Login).await?
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = &mut self.state.form {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = &mut self.state.form {
                    form.prev_field();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = &mut self.state.form {
                    form.backspace();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(form) = &mut self.state.form {
                    form.type_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.state.notifications.len();
                self.state.move_selection_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('p') => self.navigate(View::Profile).await?,
            KeyCode::Char('r') => self.load_notifications().await?,
            KeyCode::Char('l') => self.sign_out().await?,
            _ => {}
        }
        Ok(())
    }

    /// Run submit-mode validation on the current form and forward it if it passes
    pub async fn submit_form(&mut self) -> Result<()> {
        let Some(form) = self.state.form.as_mut() else {
            return Ok(());
        };
        if form.busy {
            return Ok(());
        }

        let kind = form.kind;
        let request = match form.submit() {
            Ok(request) => request,
            Err(blocked) => {
                tracing::info!("{kind:?} {blocked}");
                self.state.form_notice = None;
                return Ok(());
            }
        };

        tracing::info!("Forwarding {kind:?} submission");
        form.busy = true;
        let result = self.forward(request).await;
        if let Some(form) = self.state.form.as_mut() {
            form.busy = false;
        }
        result
    }

    async fn forward(&mut self, request: AccountRequest) -> Result<()> {
        match request {
            AccountRequest::Register { name, email } => {
                match self.backend.register(&name, &email).await {
                    Ok(()) => {
                        self.state.form_notice = Some(FormNotice::Info(format!(
                            "Thanks {}, we will be in touch at {}.",
                            name.trim(),
                            email.trim()
                        )));
                        if let Some(form) = self.state.form.as_mut() {
                            form.controller.clear();
                            form.set_active_field(0);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Registration failed: {e}");
                        self.state.form_notice = Some(FormNotice::Error(REGISTRATION_FAILED.into()));
                    }
                }
            }
            AccountRequest::SignUp {
                email,
                password,
                full_name,
            } => match self.backend.sign_up(&email, &password, &full_name).await {
                Ok(profile) => {
                    tracing::info!("Created account {}", profile.id);
                    self.navigate(View::Login).await?;
                    self.state.form_notice = Some(FormNotice::Info(SIGN_UP_SUCCEEDED.into()));
                }
                Err(e) => {
                    tracing::warn!("Sign up failed: {e}");
                    self.state.form_notice = Some(FormNotice::Error(REGISTRATION_FAILED.into()));
                }
            },
            AccountRequest::SignIn { email, password } => {
                match self.backend.sign_in(&email, &password).await {
                    Ok(session) => {
                        tracing::info!("Signed in as {}", session.user.email);
                        self.remember_email(&email);
                        self.state.session = Some(session);
                        self.navigate(View::Dashboard).await?;
                    }
                    Err(e) => {
                        tracing::info!("Sign in rejected: {e}");
                        self.state.form_notice = Some(FormNotice::Error(e.to_string()));
                    }
                }
            }
            AccountRequest::UpdateProfile {
                full_name,
                username,
            } => {
                let Some(session) = self.state.session.clone() else {
                    return self.navigate(View::Login).await;
                };
                match self
                    .backend
                    .update_profile(&session, &full_name, &username)
                    .await
                {
                    Ok(profile) => {
                        if let Some(session) = self.state.session.as_mut() {
                            session.user = profile;
                        }
                        self.state.form_notice = Some(FormNotice::Info(PROFILE_SAVED.into()));
                    }
                    Err(BackendError::NotSignedIn) => self.session_expired().await?,
                    Err(e) => {
                        tracing::warn!("Profile update failed: {e}");
                        self.state.form_notice = Some(FormNotice::Error(PROFILE_FAILED.into()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Send reset instructions to the address on the login form
    pub async fn request_password_reset(&mut self) -> Result<()> {
        let Some(form) = self.state.form.as_mut() else {
            return Ok(());
        };
        let email_ok = form
            .controller
            .validate_field(FieldKind::Email)
            .is_some_and(|v| v.is_valid());
        if !email_ok {
            self.state.form_notice = Some(FormNotice::Error(RESET_NEEDS_EMAIL.into()));
            return Ok(());
        }

        let email = form.controller.value(FieldKind::Email).to_string();
        self.state.form_notice = Some(match self.backend.request_password_reset(&email).await {
            Ok(()) => FormNotice::Info(RESET_SENT.into()),
            Err(e) => FormNotice::Error(e.to_string()),
        });
        Ok(())
    }

    /// Refresh the dashboard notification list
    pub async fn load_notifications(&mut self) -> Result<()> {
        let Some(session) = self.state.session.clone() else {
            return Ok(());
        };
        match self.backend.list_notifications(&session).await {
            Ok(notifications) => {
                tracing::debug!("Loaded {} notifications", notifications.len());
                self.state.notifications = notifications;
                self.state.notifications_error = None;
                if self.state.selected_index >= self.state.notifications.len() {
                    self.state.selected_index = 0;
                }
            }
            Err(BackendError::NotSignedIn) => self.session_expired().await?,
            Err(e) => {
                tracing::warn!("Error fetching notifications: {e}");
                self.state.notifications_error = Some(NOTIFICATIONS_FAILED.into());
            }
        }
        Ok(())
    }

    /// End the session and return to the login form
    pub async fn sign_out(&mut self) -> Result<()> {
        if let Some(session) = self.state.session.clone() {
            if let Err(e) = self.backend.sign_out(&session).await {
                tracing::warn!("Sign out failed: {e}");
            }
        }
        self.state.clear_session();
        self.navigate(View::Login).await
    }

    async fn session_expired(&mut self) -> Result<()> {
        self.state.clear_session();
        self.push_error(BackendError::NotSignedIn.to_string());
        Box::pin(self.navigate(View::Login)).await
    }

    fn remember_email(&mut self, email: &str) {
        if !self.config.remembers_email() {
            return;
        }
        self.config.last_email = Some(email.trim().to_string());
        if let Err(e) = self.config.save() {
            tracing::warn!("Could not save config: {e}");
        }
    }
}

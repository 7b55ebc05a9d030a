//! Account form structs

use crate::state::UserProfile;
use crate::validation::{
    Blocked, FieldDescriptor, FieldKind, FieldState, FormValidationController, FormValues,
    RuleTable,
};
use std::sync::Arc;

/// Which account form is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Name, email and confirmation
    Registration,
    /// Full account creation with password
    SignUp,
    Login,
    Profile,
}

impl FormKind {
    /// Field layout in declaration order
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        match self {
            Self::Registration => vec![
                FieldDescriptor::new(FieldKind::Name, "Name"),
                FieldDescriptor::new(FieldKind::Email, "Email"),
                FieldDescriptor::new(FieldKind::ConfirmEmail, "Confirm Email"),
            ],
            Self::SignUp => vec![
                FieldDescriptor::new(FieldKind::FirstName, "Firstname"),
                FieldDescriptor::new(FieldKind::LastName, "Lastname"),
                FieldDescriptor::new(FieldKind::Email, "Email"),
                FieldDescriptor::new(FieldKind::Password, "Password"),
                FieldDescriptor::new(FieldKind::ConfirmPassword, "Confirm password"),
            ],
            Self::Login => vec![
                FieldDescriptor::new(FieldKind::Email, "Email Address"),
                FieldDescriptor::new(FieldKind::Password, "Password"),
            ],
            Self::Profile => vec![
                FieldDescriptor::new(FieldKind::Name, "Full Name"),
                FieldDescriptor::new(FieldKind::Username, "Username"),
            ],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::SignUp => "Register",
            Self::Login => "Welcome Back",
            Self::Profile => "Edit Profile",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Registration | Self::SignUp => "Submit",
            Self::Login => "Sign In",
            Self::Profile => "Save Changes",
        }
    }

    /// Build the account service call for a form that passed validation
    pub fn request(&self, values: &FormValues) -> AccountRequest {
        match self {
            Self::Registration => AccountRequest::Register {
                name: values.get(FieldKind::Name).to_string(),
                email: values.get(FieldKind::Email).to_string(),
            },
            Self::SignUp => AccountRequest::SignUp {
                email: values.get(FieldKind::Email).to_string(),
                password: values.get(FieldKind::Password).to_string(),
                full_name: format!(
                    "{} {}",
                    values.get(FieldKind::FirstName),
                    values.get(FieldKind::LastName)
                ),
            },
            Self::Login => AccountRequest::SignIn {
                email: values.get(FieldKind::Email).to_string(),
                password: values.get(FieldKind::Password).to_string(),
            },
            Self::Profile => AccountRequest::UpdateProfile {
                full_name: values.get(FieldKind::Name).to_string(),
                username: values.get(FieldKind::Username).to_string(),
            },
        }
    }

    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::Registration => "Submitting...",
            Self::SignUp => "Signing Up...",
            Self::Login => "Loading...",
            Self::Profile => "Saving...",
        }
    }
}

/// Account service call produced by a valid submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRequest {
    Register {
        name: String,
        email: String,
    },
    SignUp {
        email: String,
        password: String,
        full_name: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    UpdateProfile {
        full_name: String,
        username: String,
    },
}

/// A form instance: layout, validation state and focus
#[derive(Debug, Clone)]
pub struct AccountForm {
    pub kind: FormKind,
    pub controller: FormValidationController,
    pub active_field_index: usize,
    /// Set while a submission is in flight
    pub busy: bool,
}

impl AccountForm {
    pub fn new(kind: FormKind, rules: Arc<RuleTable>) -> Self {
        Self {
            kind,
            controller: FormValidationController::new(rules, kind.descriptors()),
            active_field_index: 0,
            busy: false,
        }
    }

    /// Profile editor pre-filled from the signed-in user
    pub fn profile(rules: Arc<RuleTable>, user: &UserProfile) -> Self {
        let mut form = Self::new(FormKind::Profile, rules);
        form.controller = form
            .controller
            .with_value(FieldKind::Name, user.full_name.clone())
            .with_value(FieldKind::Username, user.username.clone());
        form
    }

    /// Fields plus the submit button row
    pub fn field_count(&self) -> usize {
        self.controller.len() + 1
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }

    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.field_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.field_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    /// Returns true if the submit button row has focus
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == self.controller.len()
    }

    pub fn active_field(&self) -> Option<&FieldState> {
        self.controller.field_at(self.active_field_index)
    }

    fn active_kind(&self) -> Option<FieldKind> {
        self.active_field().map(FieldState::kind)
    }

    /// Append a character to the focused field
    pub fn type_char(&mut self, c: char) {
        if let Some(kind) = self.active_kind() {
            self.controller.push_char(kind, c);
        }
    }

    /// Remove the last character of the focused field
    pub fn backspace(&mut self) {
        if let Some(kind) = self.active_kind() {
            self.controller.pop_char(kind);
        }
    }

    /// Whether the submit button should be drawn enabled
    pub fn can_submit(&self) -> bool {
        !self.busy && self.controller.is_submittable()
    }

    /// Submit-mode validation. A valid form yields its service request; a
    /// blocked one moves focus to the first invalid field.
    pub fn submit(&mut self) -> Result<AccountRequest, Blocked> {
        let kind = self.kind;
        let result = self.controller.submit_with(|values| kind.request(&values));
        if let Err(blocked) = &result {
            if let Some(first) = blocked.failures.first() {
                if let Some(index) = self
                    .controller
                    .fields()
                    .iter()
                    .position(|f| f.kind() == first.field)
                {
                    self.active_field_index = index;
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rules() -> Arc<RuleTable> {
        Arc::new(RuleTable::default())
    }

    fn type_str(form: &mut AccountForm, s: &str) {
        for c in s.chars() {
            form.type_char(c);
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = AccountForm::new(FormKind::Registration, rules());
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.field_count(), 4);
            assert!(!form.busy);
            assert_eq!(form.active_field().unwrap().kind(), FieldKind::Name);
        }

        #[test]
        fn test_next_field_cycles() {
            let mut form = AccountForm::new(FormKind::Login, rules());
            for _ in 0..3 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_submit_row() {
            let mut form = AccountForm::new(FormKind::Login, rules());
            form.prev_field();
            assert!(form.is_submit_row_active());
            assert!(form.active_field().is_none());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = AccountForm::new(FormKind::SignUp, rules());
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 5);
        }

        #[test]
        fn test_typing_on_submit_row_is_ignored() {
            let mut form = AccountForm::new(FormKind::Login, rules());
            form.set_active_field(2);
            form.type_char('x');
            form.backspace();
            assert_eq!(form.controller.value(FieldKind::Email), "");
        }
    }

    mod layouts {
        use super::*;

        fn kinds(kind: FormKind) -> Vec<FieldKind> {
            kind.descriptors().iter().map(|d| d.kind).collect()
        }

        #[test]
        fn test_registration_order() {
            assert_eq!(
                kinds(FormKind::Registration),
                vec![FieldKind::Name, FieldKind::Email, FieldKind::ConfirmEmail]
            );
        }

        #[test]
        fn test_sign_up_order() {
            assert_eq!(
                kinds(FormKind::SignUp),
                vec![
                    FieldKind::FirstName,
                    FieldKind::LastName,
                    FieldKind::Email,
                    FieldKind::Password,
                    FieldKind::ConfirmPassword,
                ]
            );
        }

        #[test]
        fn test_profile_is_prefilled() {
            let user = UserProfile {
                id: Uuid::new_v4(),
                email: "a@b.co".to_string(),
                full_name: "Alice Smith".to_string(),
                username: "alice".to_string(),
            };
            let form = AccountForm::profile(rules(), &user);
            assert_eq!(form.controller.value(FieldKind::Name), "Alice Smith");
            assert_eq!(form.controller.value(FieldKind::Username), "alice");
            assert!(!form.controller.has_visible_errors());
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_typing_runs_realtime_validation() {
            let mut form = AccountForm::new(FormKind::Registration, rules());
            type_str(&mut form, "Al");
            assert!(form.active_field().unwrap().show_error());
            form.type_char('i');
            assert!(!form.active_field().unwrap().show_error());
        }

        #[test]
        fn test_blocked_submit_focuses_first_failure() {
            let mut form = AccountForm::new(FormKind::Registration, rules());
            type_str(&mut form, "Alice");
            form.next_field();
            type_str(&mut form, "a@b.co");
            form.set_active_field(3);

            assert!(form.submit().is_err());
            assert_eq!(form.active_field().unwrap().kind(), FieldKind::ConfirmEmail);
        }

        #[test]
        fn test_sign_up_password_mismatch_only_on_submit() {
            let mut form = AccountForm::new(FormKind::SignUp, rules());
            for (index, value) in ["Ada", "Lovelace", "ada@example.com", "engine", "engin"]
                .iter()
                .enumerate()
            {
                form.set_active_field(index);
                type_str(&mut form, value);
            }
            assert!(!form.controller.has_visible_errors());

            let blocked = form.submit().unwrap_err();
            assert_eq!(blocked.failures.len(), 1);
            assert_eq!(blocked.failures[0].field, FieldKind::ConfirmPassword);
        }

        #[test]
        fn test_valid_login_proceeds() {
            let mut form = AccountForm::new(FormKind::Login, rules());
            type_str(&mut form, "a@b.co");
            form.next_field();
            type_str(&mut form, "pw");
            assert_eq!(
                form.submit().unwrap(),
                AccountRequest::SignIn {
                    email: "a@b.co".to_string(),
                    password: "pw".to_string(),
                }
            );
        }

        #[test]
        fn test_sign_up_request_joins_full_name() {
            let mut form = AccountForm::new(FormKind::SignUp, rules());
            for (index, value) in ["Ada", "Lovelace", "ada@example.com", "engine", "engine"]
                .iter()
                .enumerate()
            {
                form.set_active_field(index);
                type_str(&mut form, value);
            }
            match form.submit() {
                Ok(AccountRequest::SignUp { full_name, .. }) => {
                    assert_eq!(full_name, "Ada Lovelace")
                }
                other => panic!("expected sign up request, got {other:?}"),
            }
        }

        #[test]
        fn test_can_submit_tracks_current_values() {
            let mut form = AccountForm::new(FormKind::Login, rules());
            assert!(!form.can_submit());
            type_str(&mut form, "a@b.co");
            form.next_field();
            type_str(&mut form, "pw");
            assert!(form.can_submit());

            form.busy = true;
            assert!(!form.can_submit());
        }

        #[test]
        fn test_can_submit_does_not_paint_errors() {
            let form = AccountForm::new(FormKind::Registration, rules());
            assert!(!form.can_submit());
            assert!(!form.controller.has_visible_errors());
        }
    }
}

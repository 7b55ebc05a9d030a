//! Form domain layer
//!
//! Account forms pair a field layout with a validation controller and track
//! which row has focus. The last row of every form is its submit button.

mod form_state;

pub use form_state::{AccountForm, AccountRequest, FormKind};

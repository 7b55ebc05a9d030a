//! Client-side form validation
//!
//! Rules live in [`rules`] and are pure; [`controller`] owns per-form field state
//! and gates submission. Neither depends on the rendering layer.

mod controller;
mod error;
pub(crate) mod rules;

pub use controller::{Blocked, FieldDescriptor, FieldState, FormValidationController, FormValues};
pub use rules::{FieldKind, RuleTable, ValidationPolicy};

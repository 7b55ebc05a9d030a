//! Validation failure type

use super::rules::FieldKind;
use thiserror::Error;

/// A single field that failed validation, with the message shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationFailure {
    pub field: FieldKind,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: FieldKind, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_and_message() {
        let failure = ValidationFailure::new(FieldKind::Email, "Please enter a valid email address.");
        assert_eq!(
            failure.to_string(),
            "email: Please enter a valid email address."
        );
    }
}

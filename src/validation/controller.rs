//! Form validation controller
//!
//! Owns the field values and their visible error state for one form instance.
//! Real-time validation touches only the field that changed; submit-mode
//! validation clears everything, re-checks every field in declaration order and
//! decides whether the submission may proceed.

use super::error::ValidationFailure;
use super::rules::{FieldKind, RuleTable, Trigger, Verdict};
use std::sync::Arc;
use thiserror::Error;

/// Static description of a field: what it is and how it is labelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub label: String,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// A field's current value and visible error state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    descriptor: FieldDescriptor,
    value: String,
    invalid: bool,
    message: Option<String>,
}

impl FieldState {
    fn new(descriptor: FieldDescriptor) -> Self {
        Self {
            descriptor,
            value: String::new(),
            invalid: false,
            message: None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.descriptor.kind
    }

    pub fn label(&self) -> &str {
        &self.descriptor.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the presentation layer should mark this field invalid
    pub fn show_error(&self) -> bool {
        self.invalid
    }

    /// Message to display next to the field, only while it is invalid
    pub fn error_message(&self) -> Option<&str> {
        if self.invalid {
            self.message.as_deref()
        } else {
            None
        }
    }

    /// Value as it should be drawn (secrets masked)
    pub fn display_value(&self) -> String {
        if self.kind().is_secret() {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn apply(&mut self, verdict: &Verdict) {
        self.invalid = !verdict.valid;
        self.message = verdict.message.clone();
    }

    fn clear_error(&mut self) {
        self.invalid = false;
        self.message = None;
    }
}

/// Snapshot of every field's value, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(Vec<(FieldKind, String)>);

impl FormValues {
    /// Value of a field, or `""` when the form has no such field
    pub fn get(&self, kind: FieldKind) -> &str {
        self.0
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Every field passed; forward these values downstream
    Proceed(FormValues),
    /// At least one field failed; nothing may be sent
    Blocked(Vec<ValidationFailure>),
}

impl SubmitDecision {
    #[cfg(test)]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed(_))
    }
}

/// Returned by [`FormValidationController::submit_with`] when the callback was not run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission blocked by {} invalid field(s)", failures.len())]
pub struct Blocked {
    pub failures: Vec<ValidationFailure>,
}

/// Validation state machine for one form
#[derive(Debug, Clone)]
pub struct FormValidationController {
    rules: Arc<RuleTable>,
    fields: Vec<FieldState>,
}

impl FormValidationController {
    /// Create a controller over `descriptors`; declaration order is submit order
    pub fn new(rules: Arc<RuleTable>, descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Self {
            rules,
            fields: descriptors.into_iter().map(FieldState::new).collect(),
        }
    }

    /// Pre-fill a field without validating it
    pub fn with_value(mut self, kind: FieldKind, value: impl Into<String>) -> Self {
        if let Some(field) = self.field_mut(kind) {
            field.value = value.into();
        }
        self
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, kind: FieldKind) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.kind() == kind)
    }

    pub fn field_at(&self, index: usize) -> Option<&FieldState> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Current value of a field, `""` if the form has no such field
    pub fn value(&self, kind: FieldKind) -> &str {
        self.field(kind).map(FieldState::value).unwrap_or("")
    }

    pub fn values(&self) -> FormValues {
        FormValues(
            self.fields
                .iter()
                .map(|f| (f.kind(), f.value.clone()))
                .collect(),
        )
    }

    /// Replace a field's value and validate that field in real time
    #[cfg(test)]
    pub fn set_value(&mut self, kind: FieldKind, value: impl Into<String>) -> Option<Verdict> {
        self.field_mut(kind)?.value = value.into();
        self.validate_field(kind)
    }

    pub fn push_char(&mut self, kind: FieldKind, c: char) -> Option<Verdict> {
        self.field_mut(kind)?.value.push(c);
        self.validate_field(kind)
    }

    pub fn pop_char(&mut self, kind: FieldKind) -> Option<Verdict> {
        self.field_mut(kind)?.value.pop();
        self.validate_field(kind)
    }

    /// Real-time pass for one field. Other fields keep their state.
    ///
    /// Returns `None` for unknown fields and for rules that only run on submit.
    pub fn validate_field(&mut self, kind: FieldKind) -> Option<Verdict> {
        let index = self.index_of(kind)?;
        if self.trigger_at(index) == Trigger::SubmitOnly {
            return None;
        }
        let verdict = self.evaluate(index);
        self.fields[index].apply(&verdict);
        Some(verdict)
    }

    /// Submit-mode pass: clear every error, then re-check all fields in order.
    ///
    /// Returns the failures in declaration order.
    pub fn validate_all(&mut self) -> Vec<ValidationFailure> {
        self.reset_errors();
        let verdicts: Vec<Verdict> = (0..self.fields.len()).map(|i| self.evaluate(i)).collect();
        for (field, verdict) in self.fields.iter_mut().zip(&verdicts) {
            field.apply(verdict);
        }
        self.failures()
    }

    /// Run a submit-mode pass and decide whether the submission may proceed
    pub fn submit(&mut self) -> SubmitDecision {
        let failures = self.validate_all();
        if failures.is_empty() {
            SubmitDecision::Proceed(self.values())
        } else {
            SubmitDecision::Blocked(failures)
        }
    }

    /// Run a submit-mode pass and hand the values to `downstream` only if it passes
    pub fn submit_with<R>(&mut self, downstream: impl FnOnce(FormValues) -> R) -> Result<R, Blocked> {
        match self.submit() {
            SubmitDecision::Proceed(values) => Ok(downstream(values)),
            SubmitDecision::Blocked(failures) => Err(Blocked { failures }),
        }
    }

    /// Whether every field passes its rule against current values
    pub fn is_submittable(&self) -> bool {
        (0..self.fields.len()).all(|i| self.evaluate(i).valid)
    }

    /// Fields currently showing an error, in declaration order
    pub fn failures(&self) -> Vec<ValidationFailure> {
        self.fields
            .iter()
            .filter(|f| f.invalid)
            .map(|f| ValidationFailure::new(f.kind(), f.message.clone().unwrap_or_default()))
            .collect()
    }

    pub fn has_visible_errors(&self) -> bool {
        self.fields.iter().any(|f| f.invalid)
    }

    pub fn reset_errors(&mut self) {
        self.fields.iter_mut().for_each(FieldState::clear_error);
    }

    /// Empty every value and clear every error
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.clear_error();
        }
    }

    fn index_of(&self, kind: FieldKind) -> Option<usize> {
        self.fields.iter().position(|f| f.kind() == kind)
    }

    fn field_mut(&mut self, kind: FieldKind) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.kind() == kind)
    }

    fn trigger_at(&self, index: usize) -> Trigger {
        self.rules
            .get(self.fields[index].kind())
            .map(|e| e.trigger)
            .unwrap_or_default()
    }

    fn evaluate(&self, index: usize) -> Verdict {
        let field = &self.fields[index];
        match self.rules.get(field.kind()) {
            Some(entry) => {
                let related = entry
                    .rule
                    .depends_on()
                    .and_then(|other| self.field(other))
                    .map(FieldState::value);
                entry.evaluate(&field.value, related)
            }
            None => Verdict::pass(),
        }
    }
}

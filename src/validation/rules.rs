//! Field validation rules
//!
//! Every field kind maps to one [`RuleEntry`] in a [`RuleTable`]. Rules are pure:
//! they read the value under test and, for cross-field rules, the current value
//! of the field they compare against. Nothing here holds field state.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Characters stripped by [`trim`], as a regex class body. Unicode `White_Space`
/// plus U+FEFF, minus U+0085.
const SPACE_CLASS: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let local = format!("[^{SPACE_CLASS}@]+");
    Regex::new(&format!(r"^{local}@{local}\.{local}$")).expect("email pattern compiles")
});

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Strip leading and trailing whitespace, counting U+FEFF as whitespace
fn trim(value: &str) -> &str {
    value.trim_matches(is_space)
}

pub const NAME_TOO_SHORT: &str = "Name must be at least 3 characters long.";
pub const NAME_MISSING: &str = "Please enter your name.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const EMAILS_MISMATCH: &str = "Emails do not match.";
pub const EMAILS_MISMATCH_RE_ENTER: &str = "Emails do not match. Please re-enter.";
pub const PASSWORDS_MISMATCH: &str = "Passwords don't match";
pub const PASSWORD_MISSING: &str = "Please enter your password.";
pub const FIRST_NAME_MISSING: &str = "Please enter your first name.";
pub const LAST_NAME_MISSING: &str = "Please enter your last name.";

/// Minimum trimmed length under [`NamePolicy::MinLength`]
pub const NAME_MIN_LENGTH: usize = 3;

/// Semantic identity of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Email,
    ConfirmEmail,
    Password,
    ConfirmPassword,
    FirstName,
    LastName,
    Username,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::ConfirmEmail,
        FieldKind::Password,
        FieldKind::ConfirmPassword,
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Username,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::ConfirmEmail => "confirm_email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Username => "username",
        }
    }

    /// Whether the value should be masked when displayed
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating one field's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[cfg(test)]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// A validity check over a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Always valid
    Unchecked,
    /// At least one non-whitespace character
    NonBlank,
    /// Value is not empty (whitespace counts)
    NonEmpty,
    /// Trimmed value is at least this many UTF-16 code units long
    MinTrimmedLength(usize),
    /// Trimmed value matches the email pattern
    Email,
    /// Trimmed value equals the trimmed current value of another field
    MatchesTrimmed(FieldKind),
    /// Value equals the current value of another field exactly
    MatchesExact(FieldKind),
}

impl Rule {
    /// The sibling field this rule reads, if any
    pub fn depends_on(&self) -> Option<FieldKind> {
        match self {
            Self::MatchesTrimmed(other) | Self::MatchesExact(other) => Some(*other),
            _ => None,
        }
    }

    /// Check `value`; `related` is the current value of [`Rule::depends_on`].
    /// A missing sibling compares as the empty string.
    pub fn check(&self, value: &str, related: Option<&str>) -> bool {
        let related = related.unwrap_or("");
        match self {
            Self::Unchecked => true,
            Self::NonBlank => !trim(value).is_empty(),
            Self::NonEmpty => !value.is_empty(),
            Self::MinTrimmedLength(min) => trim(value).encode_utf16().count() >= *min,
            Self::Email => EMAIL_PATTERN.is_match(trim(value)),
            Self::MatchesTrimmed(_) => trim(value) == trim(related),
            Self::MatchesExact(_) => value == related,
        }
    }
}

/// When a rule is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// On every value change and on submit
    #[default]
    Realtime,
    /// Only when the whole form is submitted
    SubmitOnly,
}

/// A rule plus the message shown when it fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub rule: Rule,
    pub message: String,
    pub trigger: Trigger,
}

impl RuleEntry {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            trigger: Trigger::Realtime,
        }
    }

    pub fn submit_only(mut self) -> Self {
        self.trigger = Trigger::SubmitOnly;
        self
    }

    pub fn evaluate(&self, value: &str, related: Option<&str>) -> Verdict {
        if self.rule.check(value, related) {
            Verdict::pass()
        } else {
            Verdict::fail(self.message.clone())
        }
    }
}

/// Which name check applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Trimmed name must be at least three characters
    #[default]
    MinLength,
    /// Trimmed name must not be empty
    NonBlank,
}

/// Which message a confirm-email mismatch shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmEmailWording {
    #[default]
    Short,
    ReEnter,
}

/// Configurable choices for the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub name: NamePolicy,
    pub confirm_email: ConfirmEmailWording,
}

/// Lookup from field kind to its rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    entries: HashMap<FieldKind, RuleEntry>,
}

impl RuleTable {
    pub fn from_policy(policy: &ValidationPolicy) -> Self {
        let entries = FieldKind::ALL
            .iter()
            .map(|kind| (*kind, default_entry(*kind, policy)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, kind: FieldKind) -> Option<&RuleEntry> {
        self.entries.get(&kind)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::from_policy(&ValidationPolicy::default())
    }
}

fn default_entry(kind: FieldKind, policy: &ValidationPolicy) -> RuleEntry {
    match kind {
        FieldKind::Name => match policy.name {
            NamePolicy::MinLength => {
                RuleEntry::new(Rule::MinTrimmedLength(NAME_MIN_LENGTH), NAME_TOO_SHORT)
            }
            NamePolicy::NonBlank => RuleEntry::new(Rule::NonBlank, NAME_MISSING),
        },
        FieldKind::Email => RuleEntry::new(Rule::Email, EMAIL_INVALID),
        FieldKind::ConfirmEmail => {
            let message = match policy.confirm_email {
                ConfirmEmailWording::Short => EMAILS_MISMATCH,
                ConfirmEmailWording::ReEnter => EMAILS_MISMATCH_RE_ENTER,
            };
            RuleEntry::new(Rule::MatchesTrimmed(FieldKind::Email), message)
        }
        FieldKind::Password => RuleEntry::new(Rule::NonEmpty, PASSWORD_MISSING),
        FieldKind::ConfirmPassword => {
            RuleEntry::new(Rule::MatchesExact(FieldKind::Password), PASSWORDS_MISMATCH)
                .submit_only()
        }
        FieldKind::FirstName => RuleEntry::new(Rule::NonBlank, FIRST_NAME_MISSING),
        FieldKind::LastName => RuleEntry::new(Rule::NonBlank, LAST_NAME_MISSING),
        FieldKind::Username => RuleEntry::new(Rule::Unchecked, ""),
    }
}

//! Pre-insertion validation rules for user records.
//!
//! # Responsibility
//! - Check candidate users against the form rules before they reach remote
//!   or store write paths.
//! - Report every violated rule at once so callers can show all of them.
//!
//! # Invariants
//! - Rules are reported in a fixed order: name, email, phone, website.
//! - Validation is pure; it never mutates the candidate.

use crate::model::user::{RecordId, User};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
// Host labels are ASCII word characters only; `\w` alone would admit
// Unicode letters.
static WEBSITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?((?-u:[\w-])+\.)+(?-u:[\w-]){2,}(/\S*)?$")
        .expect("valid website regex")
});

/// One violated validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    /// Trimmed name is shorter than two characters.
    NameTooShort,
    /// Email is not shaped like `local@domain.tld`.
    InvalidEmail,
    /// Fewer than ten digits remain after stripping non-digits.
    InvalidPhone,
    /// Website is empty or not hostname/URL shaped.
    InvalidWebsite,
}

impl Display for ValidationRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::NameTooShort => "Name must be at least 2 characters",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::InvalidPhone => "Please enter a valid phone number",
            Self::InvalidWebsite => "Please enter a valid website address",
        };
        f.write_str(message)
    }
}

/// Structural or validation failure for a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRecordError {
    /// One or more field rules failed; never empty.
    Validation(Vec<ValidationRule>),
    /// Another held record already carries this id.
    DuplicateId(RecordId),
}

impl InvalidRecordError {
    /// Returns violated field rules, empty for structural errors.
    pub fn violations(&self) -> &[ValidationRule] {
        match self {
            Self::Validation(rules) => rules,
            Self::DuplicateId(_) => &[],
        }
    }
}

impl Display for InvalidRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(rules) => {
                let messages = rules
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "invalid user: {messages}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate user id: {id}"),
        }
    }
}

impl Error for InvalidRecordError {}

/// Returns every rule `user` violates, in rule order.
pub fn validate_user(user: &User) -> Vec<ValidationRule> {
    let mut violations = Vec::new();

    if user.name.trim().chars().count() < MIN_NAME_CHARS {
        violations.push(ValidationRule::NameTooShort);
    }

    if !EMAIL_RE.is_match(&user.email) {
        violations.push(ValidationRule::InvalidEmail);
    }

    if user.clean_phone().len() < MIN_PHONE_DIGITS {
        violations.push(ValidationRule::InvalidPhone);
    }

    let website = user.website.trim();
    if website.is_empty() || !WEBSITE_RE.is_match(website) {
        violations.push(ValidationRule::InvalidWebsite);
    }

    violations
}

impl User {
    /// Validates form rules.
    ///
    /// # Errors
    /// - Returns `InvalidRecordError::Validation` listing every violated rule.
    pub fn validate(&self) -> Result<(), InvalidRecordError> {
        let violations = validate_user(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(InvalidRecordError::Validation(violations))
        }
    }
}

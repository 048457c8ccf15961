//! Input validation for user payloads
//!
//! Validation never stops at the first problem: every violation found in a
//! payload is reported together so a client can fix them in one round trip.

use crate::types::{UserFields, UserInput};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Minimum name length, counted in characters after trimming
pub const NAME_MIN_CHARS: usize = 2;

/// Column width of both `name` and `email`
pub const FIELD_MAX_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// A single rule a payload broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    NameTooShort,
    NameTooLong,
    EmailMissing,
    EmailInvalid,
    EmailTooLong,
}

impl Violation {
    /// Human readable message sent to clients
    pub fn message(self) -> &'static str {
        match self {
            Violation::NameTooShort => "Name must be at least 2 characters",
            Violation::NameTooLong => "Name must be at most 100 characters",
            Violation::EmailMissing => "Email is required",
            Violation::EmailInvalid => "Email must be valid",
            Violation::EmailTooLong => "Email must be at most 100 characters",
        }
    }

    /// Whether the violation concerns the `email` field
    pub fn is_email(self) -> bool {
        matches!(
            self,
            Violation::EmailMissing | Violation::EmailInvalid | Violation::EmailTooLong
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// All violations found in one payload (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message().to_string()).collect()
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check an email against the `local@domain.tld` shape.
///
/// The check is applied to the string as given; callers normalize first.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a raw payload and normalize it.
///
/// The name is trimmed; the email is trimmed and lowercased before it is
/// matched, so `" Ana@X.com "` is accepted as `ana@x.com`.
pub fn validate(input: &UserInput) -> Result<UserFields, ValidationErrors> {
    let mut violations = Vec::new();

    let name = input.name.as_deref().map(str::trim).unwrap_or_default();
    let name_chars = name.chars().count();
    if name_chars < NAME_MIN_CHARS {
        violations.push(Violation::NameTooShort);
    } else if name_chars > FIELD_MAX_CHARS {
        violations.push(Violation::NameTooLong);
    }

    let email = input
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        violations.push(Violation::EmailMissing);
    } else if !is_valid_email(&email) {
        violations.push(Violation::EmailInvalid);
    } else if email.chars().count() > FIELD_MAX_CHARS {
        violations.push(Violation::EmailTooLong);
    }

    if violations.is_empty() {
        Ok(UserFields {
            name: name.to_string(),
            email,
        })
    } else {
        Err(ValidationErrors(violations))
    }
}

//! Subscriber email value object.
//!
//! The email is the only identity the gate knows about. Every store key and
//! every lookup goes through [`SubscriberEmail`] so that `" A@B.com "` and
//! `"a@b.com"` always land on the same record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Normalized (trimmed, lowercased) subscriber email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Normalizes and wraps a raw email string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        Ok(Self(normalized))
    }

    /// Like [`SubscriberEmail::parse`], but treats absent and blank input alike.
    ///
    /// Provider payloads routinely carry `null` or `""` for unknown emails;
    /// both mean "no email" rather than an error.
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| Self::parse(value).ok())
    }

    /// Returns the normalized email.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubscriberEmail> for String {
    fn from(email: SubscriberEmail) -> Self {
        email.0
    }
}

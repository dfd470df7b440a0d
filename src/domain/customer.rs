use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::errors::DomainError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

const MAX_NAME_CHARS: usize = 255;
const MAX_EMAIL_CHARS: usize = 255;
const MAX_PHONE_CHARS: usize = 50;

/// A customer as returned to callers. The credential never leaves the
/// persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub shipping_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated registration input.
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub shipping_address: Option<String>,
}

/// Unvalidated partial update. `None` means "leave unchanged"; for the
/// optional fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub shipping_address: Option<Option<String>>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.shipping_address.is_none()
    }
}

/// Row-ready customer with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewCustomerRecord {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub shipping_address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub shipping_address: Option<Option<String>>,
}

/// An email address, trimmed and lowercased so that lookups and the
/// uniqueness check are case-insensitive.
#[derive(Debug)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    pub fn parse(s: String) -> Result<Self, DomainError> {
        let s = s.trim().to_lowercase();
        if s.chars().count() > MAX_EMAIL_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "email must be at most {MAX_EMAIL_CHARS} characters"
            )));
        }
        if EMAIL_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(DomainError::InvalidInput(format!(
                "{s} is not a valid email address"
            )))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(field: &str, s: String) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(format!("{field} must not be blank")));
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "{field} must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(s: String) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.chars().count() > MAX_PHONE_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "phone_number must be at most {MAX_PHONE_CHARS} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parses an optional phone number, passing `None` through.
    pub fn parse_optional(s: Option<String>) -> Result<Option<String>, DomainError> {
        s.map(|p| Self::parse(p).map(Self::into_inner)).transpose()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn check_password(password: &str) -> Result<(), DomainError> {
    if password.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "password must not be blank".to_string(),
        ));
    }
    Ok(())
}

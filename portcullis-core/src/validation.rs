//! Centralized validation for sign-in and sign-up input
//!
//! This module is the single source of truth for email shape checks and
//! the password policy, so every form applies identical rules.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Longest accepted email address, per the practical RFC 5321 limit.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length at which a password earns its second strength point.
const LONG_PASSWORD_LENGTH: usize = 12;

/// Lazy-loaded email validation regex
///
/// This regex validates email addresses according to a practical subset of RFC 5322.
/// It's loaded once at runtime and reused for all email validation operations.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

/// Validates an email address
///
/// # Arguments
///
/// * `email` - The email address to validate
///
/// # Returns
///
/// Returns `Ok(())` if the email is valid, or a `ValidationError` if it is
/// empty, longer than [`MAX_EMAIL_LENGTH`], or not of the shape
/// `local@domain.tld`.
///
/// # Examples
///
/// ```rust
/// use portcullis_core::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField(
            "Email is required".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(
            "Email is too long".to_string(),
        ));
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(format!(
            "Invalid email format: {email}"
        )))
    }
}

/// Boolean form of [`validate_email`] for form code that only branches.
///
/// # Examples
///
/// ```rust
/// use portcullis_core::validation::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("user@domain"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}

/// Ordered strength classification for a password.
///
/// The ordering is part of the contract: `Weak < Medium < Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Medium => "medium",
            PasswordStrength::Strong => "strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of checking a password against the sign-up policy.
///
/// All violated rules are reported together so a form can surface every
/// problem at once, and the strength classification is computed even for
/// rejected passwords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub strength: PasswordStrength,
}

/// Validates a password according to the sign-up policy
///
/// # Arguments
///
/// * `password` - The password to validate
///
/// # Returns
///
/// A [`PasswordValidation`] carrying every violated rule plus the
/// password's strength classification. Never fails or panics, including
/// for the empty string.
///
/// # Password Requirements
///
/// - Minimum 8 characters
/// - At least one lowercase letter
/// - At least one uppercase letter
/// - At least one digit
///
/// # Examples
///
/// ```rust
/// use portcullis_core::validation::validate_password;
///
/// assert!(validate_password("SecurePass123").valid);
/// assert!(!validate_password("weak").valid);
/// ```
pub fn validate_password(password: &str) -> PasswordValidation {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit".to_string());
    }

    PasswordValidation {
        valid: errors.is_empty(),
        errors,
        strength: password_strength(password),
    }
}

/// Scores a password into one of the three strength buckets
///
/// The score is a composite of length tiers and character-class variety:
/// one point each for reaching 8 and 12 characters, mixing upper and
/// lower case, containing a digit, and containing a symbol. Scores of 0-2
/// are [`PasswordStrength::Weak`], 3-4 [`PasswordStrength::Medium`], and
/// 5 [`PasswordStrength::Strong`]. Adding length or a new character class
/// never lowers the bucket.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    let mut score = 0;
    if length >= MIN_PASSWORD_LENGTH {
        score += 1;
    }
    if length >= LONG_PASSWORD_LENGTH {
        score += 1;
    }
    if has_lowercase && has_uppercase {
        score += 1;
    }
    if has_digit {
        score += 1;
    }
    if has_symbol {
        score += 1;
    }

    match score {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

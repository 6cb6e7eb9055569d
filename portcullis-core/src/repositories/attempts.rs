//! Repository trait for login-attempt throttling.
//!
//! This module defines the storage interface for per-identifier failed
//! login counts and lockout deadlines.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, error::ValidationError};

/// A login identifier normalized for throttle bookkeeping.
///
/// Identifiers are trimmed and lowercased on construction, so
/// `" User@Example.COM "` and `"user@example.com"` share one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginIdentifier(String);

impl LoginIdentifier {
    /// Normalize a raw identifier.
    ///
    /// Returns an error for identifiers that are empty after trimming;
    /// throttling an unnamed identifier would silently merge unrelated
    /// attempts into one record.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::MissingField(
                "Login identifier is required".to_string(),
            ));
        }
        Ok(LoginIdentifier(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for LoginIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-identifier failed login bookkeeping.
///
/// `count` only moves up on failures and resets by record removal;
/// `locked_until` is stamped when the failure threshold is reached. A
/// record whose deadline has passed simply stops gating until the next
/// failure re-arms it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttemptRecord {
    /// Consecutive failed attempts since the last success.
    pub count: u32,

    /// Deadline until which the identifier is locked out, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

/// Storage operations for per-identifier attempt records.
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync + 'static {
    /// Fetch the record for an identifier, if one exists.
    async fn get(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<Option<LoginAttemptRecord>, Error>;

    /// Insert or replace the record for an identifier.
    async fn put(
        &self,
        identifier: &LoginIdentifier,
        record: &LoginAttemptRecord,
    ) -> Result<(), Error>;

    /// Remove the record for an identifier.
    ///
    /// Called on successful login or password reset to clear the attempt
    /// history. Removing a missing record is not an error.
    async fn clear(&self, identifier: &LoginIdentifier) -> Result<(), Error>;
}

//! Login-attempt throttling with per-identifier lockout.
//!
//! This module tracks consecutive failed sign-in attempts per identifier
//! and locks the identifier out once the configured threshold is reached.
//! It is a client-side, defense-in-depth layer: the authoritative rate
//! limit belongs to the backend, so concurrent contexts racing the same
//! record are tolerated rather than coordinated.
//!
//! # Features
//!
//! - Per-identifier failed attempt counting
//! - Automatic lockout after configurable failed attempts
//! - Lockout deadline re-armed by failures during and after a lockout
//! - Counter reset only on recorded success
//!
//! # Example
//!
//! ```rust,ignore
//! use portcullis_core::services::RateLimitService;
//!
//! // Gate before attempting authentication
//! if let Some(seconds) = service.check_rate_limit("user@example.com").await? {
//!     // Tell the user to retry in `seconds`
//! }
//!
//! // Record the outcome after authentication
//! let status = service.record_attempt("user@example.com", false).await?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    clock::Clock,
    config::RateLimitConfig,
    repositories::{LoginAttemptRepository, LoginIdentifier},
};

/// Result of recording a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptStatus {
    /// Whether the identifier is at or past the lockout threshold.
    pub limited: bool,

    /// Consecutive failed attempts on record.
    pub attempts: u32,

    /// Failed attempts left before lockout engages.
    pub remaining_attempts: u32,

    /// Deadline until which the identifier is locked, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
}

/// Service tracking failed sign-in attempts per identifier.
///
/// # Thread Safety
///
/// This service is thread-safe and can be shared across multiple tasks.
/// Updates are read-modify-write without locking; racing contexts settle
/// on last-write-wins, which is acceptable for an advisory limiter.
pub struct RateLimitService<R: LoginAttemptRepository> {
    repository: Arc<R>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl<R: LoginAttemptRepository> RateLimitService<R> {
    /// Create a new RateLimitService.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository implementation for storing attempt records
    /// * `config` - Threshold and lockout duration
    /// * `clock` - Time source used to arm and check lockout deadlines
    pub fn new(repository: Arc<R>, config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record the outcome of a sign-in attempt.
    ///
    /// A success clears the identifier's record entirely. A failure
    /// increments the counter (also while already locked, so the history
    /// keeps accumulating) and re-arms the lockout deadline whenever the
    /// count is at or past the threshold. Gating belongs to
    /// [`check_rate_limit`](Self::check_rate_limit); this method only does
    /// bookkeeping and reports the updated status.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The identifier that was attempted (may or may not exist)
    /// * `success` - Whether the attempt authenticated successfully
    pub async fn record_attempt(
        &self,
        identifier: &str,
        success: bool,
    ) -> Result<AttemptStatus, Error> {
        let identifier = LoginIdentifier::new(identifier)?;

        if success {
            self.repository.clear(&identifier).await?;
            return Ok(AttemptStatus {
                limited: false,
                attempts: 0,
                remaining_attempts: self.config.max_attempts,
                locked_until: None,
            });
        }

        let mut record = self.repository.get(&identifier).await?.unwrap_or_default();
        record.count = record.count.saturating_add(1);

        let limited = record.count >= self.config.max_attempts;
        if limited {
            record.locked_until = Some(self.clock.now() + self.config.lockout_duration);
            tracing::warn!(
                identifier = %identifier,
                attempts = record.count,
                "Failed attempt threshold reached, identifier locked out"
            );
        }

        self.repository.put(&identifier, &record).await?;

        Ok(AttemptStatus {
            limited,
            attempts: record.count,
            remaining_attempts: self.config.max_attempts.saturating_sub(record.count),
            locked_until: record.locked_until,
        })
    }

    /// Seconds remaining in the identifier's lockout, if it is locked.
    ///
    /// Returns `Ok(None)` both when no record exists and when a previous
    /// lockout has expired, so callers gate purely on the presence of a
    /// value. A returned value is always at least 1, even in the final
    /// sub-second sliver of a lockout.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The identifier to check
    pub async fn check_rate_limit(&self, identifier: &str) -> Result<Option<i64>, Error> {
        let identifier = LoginIdentifier::new(identifier)?;

        let Some(record) = self.repository.get(&identifier).await? else {
            return Ok(None);
        };
        let Some(locked_until) = record.locked_until else {
            return Ok(None);
        };

        let remaining = locked_until - self.clock.now();
        if remaining > Duration::zero() {
            Ok(Some(remaining.num_seconds().max(1)))
        } else {
            Ok(None)
        }
    }

    /// Whether the identifier is currently locked out (convenience method).
    pub async fn is_limited(&self, identifier: &str) -> Result<bool, Error> {
        Ok(self.check_rate_limit(identifier).await?.is_some())
    }

    /// Clear the attempt history for an identifier.
    ///
    /// This should be called after a successful authentication or a
    /// password reset to reset the failed attempt counter and drop any
    /// lockout.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The identifier to reset
    pub async fn reset_attempts(&self, identifier: &str) -> Result<(), Error> {
        let identifier = LoginIdentifier::new(identifier)?;
        self.repository.clear(&identifier).await
    }
}

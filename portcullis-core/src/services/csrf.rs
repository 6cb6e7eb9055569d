//! Anti-forgery token lifecycle.
//!
//! One token per session: issuing a new token replaces the previous one,
//! and validation is an exact string comparison against the stored value.
//! The token is attached to state-changing requests so the backend can
//! reject submissions that did not originate from the session; this
//! service is the client-side half of that handshake.

use std::sync::Arc;

use crate::{Error, repositories::CsrfTokenRepository, token::CsrfToken};

/// Service managing the session's anti-forgery token.
///
/// # Thread Safety
///
/// This service is thread-safe and can be shared across multiple tasks.
/// Contexts issuing concurrently race on the single slot; the last write
/// wins and earlier tokens stop validating.
pub struct CsrfService<R: CsrfTokenRepository> {
    repository: Arc<R>,
}

impl<R: CsrfTokenRepository> CsrfService<R> {
    /// Create a new CsrfService.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Issue a fresh token and persist it as the session's sole token.
    ///
    /// Any previously issued token is silently replaced; requests still
    /// carrying the old value will no longer validate.
    pub async fn issue(&self) -> Result<CsrfToken, Error> {
        let token = CsrfToken::generate();
        self.repository.store(&token).await?;
        Ok(token)
    }

    /// Check a presented token against the stored one.
    ///
    /// `true` only for an exact match. No trimming, case folding or other
    /// normalization is applied, and `false` is returned when no token was
    /// ever issued this session.
    pub async fn validate(&self, candidate: &str) -> Result<bool, Error> {
        match self.repository.get().await? {
            Some(stored) => Ok(stored.as_str() == candidate),
            None => Ok(false),
        }
    }

    /// The currently stored token, if any.
    pub async fn current(&self) -> Result<Option<CsrfToken>, Error> {
        self.repository.get().await
    }

    /// Drop the stored token, e.g. when tearing down a session.
    pub async fn clear(&self) -> Result<(), Error> {
        self.repository.clear().await
    }
}

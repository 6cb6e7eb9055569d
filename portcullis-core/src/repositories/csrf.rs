//! Repository trait for the session CSRF token slot.

use async_trait::async_trait;

use crate::{Error, token::CsrfToken};

/// Single-slot storage for the session's anti-forgery token.
///
/// The slot holds at most one token. Storing a new one replaces the
/// previous without any coordination; contexts sharing the slot (tabs,
/// windows) race on a last-write-wins basis.
#[async_trait]
pub trait CsrfTokenRepository: Send + Sync + 'static {
    /// Persist `token` as the session's sole token.
    async fn store(&self, token: &CsrfToken) -> Result<(), Error>;

    /// Fetch the currently stored token, if one was ever issued.
    async fn get(&self) -> Result<Option<CsrfToken>, Error>;

    /// Drop the stored token.
    async fn clear(&self) -> Result<(), Error>;
}

//! Repository trait for the cached authenticated-user record.

use async_trait::async_trait;

use crate::{Error, user::CachedUser};

/// Storage for the last-known authenticated identity.
///
/// Implementations must treat unreadable stored state as absent rather
/// than failing: a corrupt record means "no cached user", not an error,
/// so a bad write can never wedge the sign-in flow.
#[async_trait]
pub trait UserCacheRepository: Send + Sync + 'static {
    /// Fetch the cached record, if present and well formed.
    async fn get(&self) -> Result<Option<CachedUser>, Error>;

    /// Store `user` as the cached record, replacing any previous one.
    async fn set(&self, user: &CachedUser) -> Result<(), Error>;

    /// Remove the cached record.
    async fn clear(&self) -> Result<(), Error>;
}

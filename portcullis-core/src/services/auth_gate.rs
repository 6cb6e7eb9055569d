//! Route-guard support: cached identity lookup and demo-mode gating.
//!
//! Protected views ask this service what identity to render for. The
//! answer comes from the cached record the external sign-in flow last
//! wrote, or, when demo mode is explicitly enabled, from a fabricated
//! identity that is unmistakably fake. The cached record informs
//! rendering only; authorization stays with the backend.

use std::sync::Arc;

use crate::{
    Error,
    clock::Clock,
    config::SecurityConfig,
    repositories::UserCacheRepository,
    user::{CachedUser, UserRole},
};

/// Service deciding what identity, if any, protected views render for.
///
/// # Thread Safety
///
/// This service is thread-safe and can be shared across multiple tasks.
pub struct AuthGateService<R: UserCacheRepository> {
    repository: Arc<R>,
    config: SecurityConfig,
    clock: Arc<dyn Clock>,
}

impl<R: UserCacheRepository> AuthGateService<R> {
    /// Create a new AuthGateService.
    ///
    /// # Arguments
    ///
    /// * `repository` - The repository holding the cached identity record
    /// * `config` - Configuration carrying the demo-mode switch
    /// * `clock` - Time source used to stamp fabricated demo identities
    pub fn new(repository: Arc<R>, config: SecurityConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Whether demo mode is active.
    pub fn is_demo_mode(&self) -> bool {
        self.config.demo_mode
    }

    /// The cached authenticated identity, if a well-formed record exists.
    ///
    /// Absent and unreadable records both yield `None`; a corrupt record
    /// never surfaces as an error to the calling view.
    pub async fn check_auth(&self) -> Result<Option<CachedUser>, Error> {
        self.repository.get().await
    }

    /// Resolve the identity a protected view should render for.
    ///
    /// With demo mode off this defers entirely to [`check_auth`](Self::check_auth):
    /// it reports whatever the sign-in flow cached and fabricates nothing,
    /// so an unauthenticated visitor stays unauthenticated. With demo mode
    /// on it returns a synthetic identity for `role`, marked as demo and
    /// addressed under the reserved demo domain.
    pub async fn require_auth_or_demo(&self, role: UserRole) -> Result<Option<CachedUser>, Error> {
        if !self.config.demo_mode {
            return self.check_auth().await;
        }

        tracing::debug!(role = %role, "Demo mode active, fabricating identity");
        Ok(Some(CachedUser::demo(role, self.clock.now())))
    }

    /// Store `user` as the cached identity.
    ///
    /// Called by the sign-in flow after the backend accepts credentials.
    pub async fn cache_user(&self, user: &CachedUser) -> Result<(), Error> {
        self.repository.set(user).await
    }

    /// Remove the cached identity. Called on sign-out.
    pub async fn clear_cached_user(&self) -> Result<(), Error> {
        self.repository.clear().await
    }
}

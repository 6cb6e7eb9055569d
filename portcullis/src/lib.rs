//! # Portcullis
//!
//! Portcullis is a client-side account protection toolkit for applications
//! that authenticate against a managed backend. It bundles the defensive
//! plumbing every sign-in surface needs: login-attempt throttling with
//! progressive lockout, a per-session anti-forgery token, recursive
//! sanitization of untrusted strings, an email and password policy with
//! strength scoring, and a fail-closed demo mode for protected views.
//!
//! None of this replaces the backend's own enforcement. The limiter, the
//! token and the cached identity exist so forms can give instant feedback
//! and demo deployments can run without real credentials; the server
//! remains the authority on every decision.
//!
//! ## Storage Support
//!
//! State lives behind a small key-value port with two backends included:
//! - In-memory (session-scoped state and tests)
//! - JSON file (durable state)
//!
//! Anything implementing [`KeyValueStorage`] works in their place.
//!
//! ## Example
//!
//! ```rust,no_run
//! use portcullis::{MemoryStorage, Portcullis};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), portcullis::Error> {
//!     let durable = Arc::new(MemoryStorage::new());
//!     let session = Arc::new(MemoryStorage::new());
//!
//!     let guard = Portcullis::new(durable, session);
//!
//!     let token = guard.csrf().issue().await?;
//!     assert!(guard.csrf().validate(token.as_str()).await?);
//!     Ok(())
//! }
//! ```
use std::sync::Arc;

use portcullis_core::{
    repositories::{KvCsrfTokenRepository, KvLoginAttemptRepository, KvUserCacheRepository},
    services::{AuthGateService, CsrfService, RateLimitService},
};

/// Re-export core types from portcullis_core
///
/// These types are commonly used when working with the Portcullis API.
pub use portcullis_core::{
    CachedUser, Clock, CsrfToken, DEMO_EMAIL_DOMAIN, Error, KeyValueStorage, ManualClock,
    RateLimitConfig, SecurityConfig, SystemClock, UserRole,
    sanitize::{sanitize_object, sanitize_text, sanitize_value},
    services::AttemptStatus,
    validation::{
        PasswordStrength, PasswordValidation, is_valid_email, password_strength, validate_email,
        validate_password,
    },
};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding feature is enabled.
#[cfg(feature = "memory")]
pub use portcullis_storage_memory::MemoryStorage;

#[cfg(feature = "json")]
pub use portcullis_storage_json::JsonFileStorage;

/// The central coordinator wiring the protection services to storage.
///
/// `Portcullis` owns one instance of each service, bound to two injected
/// stores: `D` is the durable store (attempt records and the cached-user
/// record), `S` the session-scoped store (the CSRF token slot). The
/// stateless helpers (sanitization, validation) are plain functions
/// re-exported at the crate root and need no coordinator.
///
/// # Example
///
/// ```rust,no_run
/// use portcullis::{MemoryStorage, Portcullis, SecurityConfig, UserRole};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), portcullis::Error> {
///     let guard = Portcullis::new(
///         Arc::new(MemoryStorage::new()),
///         Arc::new(MemoryStorage::new()),
///     )
///     .with_config(SecurityConfig::from_env());
///
///     if let Some(seconds) = guard.rate_limiter().check_rate_limit("user@example.com").await? {
///         println!("locked out for another {seconds}s");
///     }
///
///     let viewer = guard.auth_gate().require_auth_or_demo(UserRole::Athlete).await?;
///     println!("render for: {viewer:?}");
///     Ok(())
/// }
/// ```
pub struct Portcullis<D: KeyValueStorage, S: KeyValueStorage> {
    durable: Arc<D>,
    session: Arc<S>,
    config: SecurityConfig,
    clock: Arc<dyn Clock>,
    rate_limiter: Arc<RateLimitService<KvLoginAttemptRepository<D>>>,
    csrf: Arc<CsrfService<KvCsrfTokenRepository<S>>>,
    auth_gate: Arc<AuthGateService<KvUserCacheRepository<D>>>,
}

impl<D: KeyValueStorage, S: KeyValueStorage> Portcullis<D, S> {
    /// Create a new Portcullis instance over the given stores.
    ///
    /// Uses the default configuration (demo mode off, five attempts,
    /// fifteen-minute lockout) and the system clock.
    ///
    /// # Arguments
    ///
    /// * `durable` - Store for attempt records and the cached-user record
    /// * `session` - Store for the session's CSRF token slot
    pub fn new(durable: Arc<D>, session: Arc<S>) -> Self {
        Self::assemble(
            durable,
            session,
            SecurityConfig::default(),
            Arc::new(SystemClock),
        )
    }

    /// Replace the configuration, rebuilding the affected services.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use portcullis::{MemoryStorage, Portcullis, SecurityConfig};
    /// use std::sync::Arc;
    ///
    /// let guard = Portcullis::new(
    ///     Arc::new(MemoryStorage::new()),
    ///     Arc::new(MemoryStorage::new()),
    /// )
    /// .with_config(SecurityConfig::new().with_demo_mode(true));
    /// ```
    pub fn with_config(self, config: SecurityConfig) -> Self {
        Self::assemble(self.durable, self.session, config, self.clock)
    }

    /// Replace the time source, rebuilding the affected services.
    ///
    /// Production code keeps the default system clock; tests inject a
    /// [`ManualClock`] to step through lockout expiry deterministically.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self::assemble(self.durable, self.session, self.config, clock)
    }

    fn assemble(
        durable: Arc<D>,
        session: Arc<S>,
        config: SecurityConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rate_limiter = Arc::new(RateLimitService::new(
            Arc::new(KvLoginAttemptRepository::new(durable.clone())),
            config.rate_limit.clone(),
            clock.clone(),
        ));
        let csrf = Arc::new(CsrfService::new(Arc::new(KvCsrfTokenRepository::new(
            session.clone(),
        ))));
        let auth_gate = Arc::new(AuthGateService::new(
            Arc::new(KvUserCacheRepository::new(durable.clone())),
            config.clone(),
            clock.clone(),
        ));

        Self {
            durable,
            session,
            config,
            clock,
            rate_limiter,
            csrf,
            auth_gate,
        }
    }

    /// The login-attempt rate limiter.
    pub fn rate_limiter(&self) -> &RateLimitService<KvLoginAttemptRepository<D>> {
        &self.rate_limiter
    }

    /// The session anti-forgery token guard.
    pub fn csrf(&self) -> &CsrfService<KvCsrfTokenRepository<S>> {
        &self.csrf
    }

    /// The cached-identity gate with its demo mode.
    pub fn auth_gate(&self) -> &AuthGateService<KvUserCacheRepository<D>> {
        &self.auth_gate
    }

    /// The active configuration.
    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// The durable store backing attempt records and the user cache.
    pub fn durable_storage(&self) -> &Arc<D> {
        &self.durable
    }

    /// The session-scoped store backing the CSRF slot.
    pub fn session_storage(&self) -> &Arc<S> {
        &self.session
    }
}

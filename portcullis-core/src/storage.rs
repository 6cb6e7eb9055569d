//! Key-value storage port
//!
//! Every value this crate persists goes through [`KeyValueStorage`], so
//! applications can plug in whatever store the platform offers (a file, a
//! browser's local storage bridge, an embedded database) while tests run
//! against an in-memory map. Values are opaque strings; callers decide
//! the encoding. Records in this crate are JSON documents, except the
//! CSRF slot which holds the bare token.

use crate::Error;
use async_trait::async_trait;

/// Key under which the session's CSRF token is stored.
pub const CSRF_TOKEN_KEY: &str = "auth:csrf_token";

/// Key under which the cached authenticated-user record is stored.
pub const CURRENT_USER_KEY: &str = "auth:current_user";

/// Prefix for per-identifier login attempt records.
pub const LOGIN_ATTEMPTS_KEY_PREFIX: &str = "auth:login_attempts:";

/// Build the storage key for an identifier's attempt record.
pub fn login_attempts_key(identifier: &str) -> String {
    format!("{LOGIN_ATTEMPTS_KEY_PREFIX}{identifier}")
}

/// Minimal string key-value store.
///
/// Implementations must be safe to share across tasks. None of the
/// operations are transactional; the protection services tolerate
/// last-write-wins semantics.
#[async_trait]
pub trait KeyValueStorage: Send + Sync + 'static {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Delete the value under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_attempts_key_is_namespaced() {
        assert_eq!(
            login_attempts_key("user@example.com"),
            "auth:login_attempts:user@example.com"
        );
    }

    #[test]
    fn test_reserved_keys_share_namespace() {
        assert!(CSRF_TOKEN_KEY.starts_with("auth:"));
        assert!(CURRENT_USER_KEY.starts_with("auth:"));
        assert!(LOGIN_ATTEMPTS_KEY_PREFIX.starts_with("auth:"));
    }
}

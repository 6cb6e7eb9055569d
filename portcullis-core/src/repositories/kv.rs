//! Key-value backed repository implementations.
//!
//! These adapters bind the repository traits to any [`KeyValueStorage`]
//! backend, handling key namespacing and JSON encoding. A stored value
//! that no longer parses is logged and treated as absent; the bytes stay
//! in place until the next write replaces them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    Error,
    error::StorageError,
    repositories::{
        CsrfTokenRepository, LoginAttemptRecord, LoginAttemptRepository, LoginIdentifier,
        UserCacheRepository,
    },
    storage::{CSRF_TOKEN_KEY, CURRENT_USER_KEY, KeyValueStorage, login_attempts_key},
    token::CsrfToken,
    user::CachedUser,
};

/// Login-attempt records stored as JSON documents.
pub struct KvLoginAttemptRepository<S: KeyValueStorage> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage> KvLoginAttemptRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: KeyValueStorage> LoginAttemptRepository for KvLoginAttemptRepository<S> {
    async fn get(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<Option<LoginAttemptRecord>, Error> {
        let key = login_attempts_key(identifier.as_str());
        let Some(raw) = self.storage.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    "Stored attempt record is malformed, treating as absent"
                );
                Ok(None)
            }
        }
    }

    async fn put(
        &self,
        identifier: &LoginIdentifier,
        record: &LoginAttemptRecord,
    ) -> Result<(), Error> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage
            .set(&login_attempts_key(identifier.as_str()), &raw)
            .await
    }

    async fn clear(&self, identifier: &LoginIdentifier) -> Result<(), Error> {
        self.storage
            .remove(&login_attempts_key(identifier.as_str()))
            .await
    }
}

/// The session anti-forgery slot, stored as the bare token string.
pub struct KvCsrfTokenRepository<S: KeyValueStorage> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage> KvCsrfTokenRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: KeyValueStorage> CsrfTokenRepository for KvCsrfTokenRepository<S> {
    async fn store(&self, token: &CsrfToken) -> Result<(), Error> {
        self.storage.set(CSRF_TOKEN_KEY, token.as_str()).await
    }

    async fn get(&self) -> Result<Option<CsrfToken>, Error> {
        Ok(self.storage.get(CSRF_TOKEN_KEY).await?.map(CsrfToken::from))
    }

    async fn clear(&self) -> Result<(), Error> {
        self.storage.remove(CSRF_TOKEN_KEY).await
    }
}

/// The cached-user record, stored as a JSON document.
pub struct KvUserCacheRepository<S: KeyValueStorage> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage> KvUserCacheRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: KeyValueStorage> UserCacheRepository for KvUserCacheRepository<S> {
    async fn get(&self) -> Result<Option<CachedUser>, Error> {
        let Some(raw) = self.storage.get(CURRENT_USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Stored user record is malformed, treating as absent"
                );
                Ok(None)
            }
        }
    }

    async fn set(&self, user: &CachedUser) -> Result<(), Error> {
        let raw =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(CURRENT_USER_KEY, &raw).await
    }

    async fn clear(&self) -> Result<(), Error> {
        self.storage.remove(CURRENT_USER_KEY).await
    }
}

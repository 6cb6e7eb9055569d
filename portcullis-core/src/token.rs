//! Anti-forgery token generation
//!
//! Tokens are opaque 64-character lowercase hex strings backed by 256 bits
//! of OS randomness. They are compared by exact string equality: the token
//! accompanies state-changing requests inside an already-authenticated
//! session, so unpredictability is what matters, not hashing at rest.

use rand::{TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes in a token (64 hex characters once encoded).
pub const CSRF_TOKEN_BYTES: usize = 32;

/// A per-session anti-forgery token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Draw a fresh token from the operating system RNG.
    ///
    /// # Panics
    ///
    /// Panics if the OS random number generator fails. This indicates a critical
    /// system failure (e.g., /dev/urandom unavailable) from which recovery is not
    /// possible for security-sensitive operations.
    pub fn generate() -> Self {
        let mut bytes = [0u8; CSRF_TOKEN_BYTES]; // 256 bits of entropy
        OsRng
            .try_fill_bytes(&mut bytes)
            .expect("OS RNG failure - system entropy source unavailable");
        CsrfToken(hex::encode(bytes))
    }

    pub fn new(token: impl Into<String>) -> Self {
        CsrfToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for CsrfToken {
    fn from(token: String) -> Self {
        CsrfToken(token)
    }
}

impl From<&str> for CsrfToken {
    fn from(token: &str) -> Self {
        CsrfToken(token.to_string())
    }
}

impl fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

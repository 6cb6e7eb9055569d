//! Repository traits for the data access layer
//!
//! This module defines the storage interfaces the services talk to. Each
//! data domain gets its own `*Repository` trait, and the `Kv*` adapters
//! in [`kv`] implement every trait on top of any [`KeyValueStorage`]
//! backend, so applications normally only supply a store and never touch
//! these traits directly. Custom backends (an ORM table, a remote cache)
//! can implement the traits themselves instead.
//!
//! [`KeyValueStorage`]: crate::storage::KeyValueStorage

pub mod attempts;
pub mod csrf;
pub mod kv;
pub mod user_cache;

pub use attempts::{LoginAttemptRecord, LoginAttemptRepository, LoginIdentifier};
pub use csrf::CsrfTokenRepository;
pub use kv::{KvCsrfTokenRepository, KvLoginAttemptRepository, KvUserCacheRepository};
pub use user_cache::UserCacheRepository;

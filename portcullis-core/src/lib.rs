//! Core functionality for the portcullis account protection toolkit
//!
//! This module contains the building blocks the main `portcullis` crate
//! wires together: input sanitization and validation, the login-attempt
//! rate limiter, the session anti-forgery token, and the cached-identity
//! gate with its demo mode.
//!
//! Everything stateful runs against the [`KeyValueStorage`] port, and
//! everything time-dependent against the [`Clock`] trait, so the services
//! can be exercised hermetically in tests.
//!
//! See [`CachedUser`] for the cached identity record, [`CsrfToken`] for
//! the anti-forgery token, and the [`services`] module for the service
//! layer.

pub mod clock;
pub mod config;
pub mod error;
pub mod repositories;
pub mod sanitize;
pub mod services;
pub mod storage;
pub mod token;
pub mod user;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RateLimitConfig, SecurityConfig};
pub use error::Error;
pub use storage::KeyValueStorage;
pub use token::CsrfToken;
pub use user::{CachedUser, DEMO_EMAIL_DOMAIN, UserRole};

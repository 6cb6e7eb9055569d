//! Service layer for the protection logic
//!
//! This module contains the concrete service implementations that
//! encapsulate throttling, anti-forgery and identity-gating behavior.

pub mod auth_gate;
pub mod csrf;
pub mod rate_limit;

pub use auth_gate::AuthGateService;
pub use csrf::CsrfService;
pub use rate_limit::{AttemptStatus, RateLimitService};

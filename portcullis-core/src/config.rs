//! Runtime configuration for the protection services.
//!
//! Configuration is plain data handed to the services at construction
//! time. The only ambient source is [`SecurityConfig::from_env`], which
//! reads the demo-mode switch and nothing else; a missing or malformed
//! environment never enables demo mode.

use chrono::Duration;

/// Environment variable consulted by [`SecurityConfig::from_env`].
pub const DEMO_MODE_ENV_VAR: &str = "PORTCULLIS_DEMO_MODE";

/// Configuration for login-attempt throttling.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Failed attempts tolerated before the identifier is locked out.
    pub max_attempts: u32,

    /// How long a lockout lasts once it engages.
    pub lockout_duration: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_duration: Duration::minutes(15),
        }
    }
}

impl RateLimitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_lockout_duration(mut self, lockout_duration: Duration) -> Self {
        self.lockout_duration = lockout_duration;
        self
    }
}

/// Top-level configuration injected into the facade and services.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Whether protected views may fall back to fabricated demo
    /// identities. Off unless explicitly enabled.
    pub demo_mode: bool,

    /// Throttling parameters for the login rate limiter.
    pub rate_limit: RateLimitConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl SecurityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Build a configuration from the process environment.
    ///
    /// Demo mode turns on only for an explicit affirmative value of
    /// [`DEMO_MODE_ENV_VAR`] (`1`, `true`, `yes` or `on`, case-insensitive,
    /// surrounding whitespace ignored). An unset variable or any other
    /// value leaves it off.
    pub fn from_env() -> Self {
        let demo_mode = std::env::var(DEMO_MODE_ENV_VAR)
            .map(|value| parse_demo_mode(&value))
            .unwrap_or(false);

        if demo_mode {
            tracing::warn!("Demo mode enabled via {DEMO_MODE_ENV_VAR}");
        }

        Self {
            demo_mode,
            ..Self::default()
        }
    }
}

fn parse_demo_mode(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fail_closed() {
        let config = SecurityConfig::default();
        assert!(!config.demo_mode);
        assert_eq!(config.rate_limit.max_attempts, 5);
        assert_eq!(config.rate_limit.lockout_duration, Duration::minutes(15));
    }

    #[test]
    fn test_builder_methods() {
        let config = SecurityConfig::new()
            .with_demo_mode(true)
            .with_rate_limit(
                RateLimitConfig::new()
                    .with_max_attempts(3)
                    .with_lockout_duration(Duration::minutes(5)),
            );

        assert!(config.demo_mode);
        assert_eq!(config.rate_limit.max_attempts, 3);
        assert_eq!(config.rate_limit.lockout_duration, Duration::minutes(5));
    }

    #[test]
    fn test_parse_demo_mode_affirmatives() {
        assert!(parse_demo_mode("1"));
        assert!(parse_demo_mode("true"));
        assert!(parse_demo_mode("TRUE"));
        assert!(parse_demo_mode("Yes"));
        assert!(parse_demo_mode("on"));
        assert!(parse_demo_mode("  true  "));
    }

    #[test]
    fn test_parse_demo_mode_rejects_everything_else() {
        assert!(!parse_demo_mode(""));
        assert!(!parse_demo_mode("0"));
        assert!(!parse_demo_mode("false"));
        assert!(!parse_demo_mode("enabled"));
        assert!(!parse_demo_mode("2"));
        assert!(!parse_demo_mode("demo"));
    }
}

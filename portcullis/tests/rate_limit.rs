use std::sync::Arc;

use chrono::{Duration, Utc};
use portcullis::{ManualClock, Portcullis, RateLimitConfig, SecurityConfig};

#[cfg(feature = "memory")]
use portcullis::MemoryStorage;

#[cfg(feature = "memory")]
fn guard_with_clock() -> (Portcullis<MemoryStorage, MemoryStorage>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let guard = Portcullis::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryStorage::new()),
    )
    .with_clock(clock.clone());
    (guard, clock)
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_lockout_engages_after_five_failures() {
    let (guard, _) = guard_with_clock();
    let limiter = guard.rate_limiter();

    // Four failures leave headroom
    for expected in 1..=4u32 {
        let status = limiter
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
        assert!(!status.limited);
        assert_eq!(status.attempts, expected);
        assert_eq!(status.remaining_attempts, 5 - expected);
        assert_eq!(
            limiter.check_rate_limit("user@example.com").await.unwrap(),
            None
        );
    }

    // The fifth engages the lockout
    let status = limiter
        .record_attempt("user@example.com", false)
        .await
        .unwrap();
    assert!(status.limited);
    assert_eq!(status.attempts, 5);
    assert_eq!(status.remaining_attempts, 0);

    let seconds = limiter
        .check_rate_limit("user@example.com")
        .await
        .unwrap()
        .expect("identifier should be locked");
    assert_eq!(seconds, 900);
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_lockout_expires_with_time() {
    let (guard, clock) = guard_with_clock();
    let limiter = guard.rate_limiter();

    for _ in 0..5 {
        limiter
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
    }

    // Partway through, the countdown shrinks
    clock.advance(Duration::minutes(14));
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        Some(60)
    );

    // Past the deadline, gating stops
    clock.advance(Duration::minutes(1) + Duration::seconds(1));
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        None
    );
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_failure_after_expiry_relocks() {
    let (guard, clock) = guard_with_clock();
    let limiter = guard.rate_limiter();

    for _ in 0..5 {
        limiter
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
    }

    clock.advance(Duration::minutes(20));
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        None
    );

    // History survives expiry, so one more failure locks again
    let status = limiter
        .record_attempt("user@example.com", false)
        .await
        .unwrap();
    assert!(status.limited);
    assert_eq!(status.attempts, 6);
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        Some(900)
    );
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_success_resets_everything() {
    let (guard, _) = guard_with_clock();
    let limiter = guard.rate_limiter();

    for _ in 0..5 {
        limiter
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
    }
    assert!(
        limiter
            .check_rate_limit("user@example.com")
            .await
            .unwrap()
            .is_some()
    );

    let status = limiter
        .record_attempt("user@example.com", true)
        .await
        .unwrap();
    assert!(!status.limited);
    assert_eq!(status.attempts, 0);
    assert_eq!(status.remaining_attempts, 5);
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        None
    );

    // The next failure starts a fresh count
    let status = limiter
        .record_attempt("user@example.com", false)
        .await
        .unwrap();
    assert_eq!(status.attempts, 1);
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_identifiers_normalized_and_isolated() {
    let (guard, _) = guard_with_clock();
    let limiter = guard.rate_limiter();

    // Same identifier through different spellings
    limiter
        .record_attempt("User@Example.com", false)
        .await
        .unwrap();
    let status = limiter
        .record_attempt("  user@example.COM ", false)
        .await
        .unwrap();
    assert_eq!(status.attempts, 2);

    // A different identifier is untouched
    let status = limiter
        .record_attempt("other@example.com", false)
        .await
        .unwrap();
    assert_eq!(status.attempts, 1);
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_empty_identifier_is_a_validation_error() {
    let (guard, _) = guard_with_clock();
    let limiter = guard.rate_limiter();

    let err = limiter.record_attempt("", false).await.unwrap_err();
    assert!(err.is_validation_error());

    let err = limiter.check_rate_limit("   ").await.unwrap_err();
    assert!(err.is_validation_error());
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_store_clear_resets_state_between_cases() {
    let durable = Arc::new(MemoryStorage::new());
    let guard = Portcullis::new(durable.clone(), Arc::new(MemoryStorage::new()));

    for _ in 0..5 {
        guard
            .rate_limiter()
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
    }
    assert!(!durable.is_empty());

    // The reset hook a test harness would run between cases
    durable.clear();

    assert_eq!(
        guard
            .rate_limiter()
            .check_rate_limit("user@example.com")
            .await
            .unwrap(),
        None
    );
    let status = guard
        .rate_limiter()
        .record_attempt("user@example.com", false)
        .await
        .unwrap();
    assert_eq!(status.attempts, 1);
}

#[cfg(feature = "memory")]
#[tokio::test]
async fn test_custom_rate_limit_config() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let guard = Portcullis::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(MemoryStorage::new()),
    )
    .with_config(SecurityConfig::new().with_rate_limit(
        RateLimitConfig::new()
            .with_max_attempts(3)
            .with_lockout_duration(Duration::minutes(1)),
    ))
    .with_clock(clock.clone());
    let limiter = guard.rate_limiter();

    for _ in 0..3 {
        limiter
            .record_attempt("user@example.com", false)
            .await
            .unwrap();
    }
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        Some(60)
    );

    clock.advance(Duration::seconds(61));
    assert_eq!(
        limiter.check_rate_limit("user@example.com").await.unwrap(),
        None
    );
}

#[cfg(all(feature = "json", feature = "memory"))]
use std::path::PathBuf;
#[cfg(all(feature = "json", feature = "memory"))]
use std::sync::Arc;

#[cfg(all(feature = "json", feature = "memory"))]
use portcullis::{CachedUser, JsonFileStorage, MemoryStorage, Portcullis, UserRole};

#[cfg(all(feature = "json", feature = "memory"))]
fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("portcullis-facade-{}.json", uuid::Uuid::new_v4()))
}

#[cfg(all(feature = "json", feature = "memory"))]
#[tokio::test]
async fn test_cached_user_survives_restart() -> Result<(), Box<dyn std::error::Error>> {
    let path = temp_store_path();

    {
        let durable = Arc::new(JsonFileStorage::open(&path).await?);
        let guard = Portcullis::new(durable, Arc::new(MemoryStorage::new()));

        let user = CachedUser::builder()
            .email("runner@example.com")
            .role(UserRole::Athlete)
            .build()?;
        guard.auth_gate().cache_user(&user).await?;
    }

    // A new process opens the same file and still sees the user.
    let durable = Arc::new(JsonFileStorage::open(&path).await?);
    let guard = Portcullis::new(durable, Arc::new(MemoryStorage::new()));

    let cached = guard.auth_gate().check_auth().await?.unwrap();
    assert_eq!(cached.email, "runner@example.com");
    assert_eq!(cached.role, Some(UserRole::Athlete));

    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[cfg(all(feature = "json", feature = "memory"))]
#[tokio::test]
async fn test_attempt_counters_survive_restart() -> Result<(), Box<dyn std::error::Error>> {
    let path = temp_store_path();
    let email = "runner@example.com";

    {
        let durable = Arc::new(JsonFileStorage::open(&path).await?);
        let guard = Portcullis::new(durable, Arc::new(MemoryStorage::new()));

        for _ in 0..3 {
            guard.rate_limiter().record_attempt(email, false).await?;
        }
    }

    // Restarting does not forgive earlier failures.
    let durable = Arc::new(JsonFileStorage::open(&path).await?);
    let guard = Portcullis::new(durable, Arc::new(MemoryStorage::new()));

    let status = guard.rate_limiter().record_attempt(email, false).await?;
    assert_eq!(status.attempts, 4);
    assert!(!status.limited);

    let status = guard.rate_limiter().record_attempt(email, false).await?;
    assert!(status.limited);
    assert!(guard.rate_limiter().is_limited(email).await?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}

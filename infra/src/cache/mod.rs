//! Store backends for rate-limit windows and verification entries
//!
//! The in-memory backend is the default. With the `redis-cache` feature and
//! `cache.backend = "redis"`, both stores live in Redis so several server
//! instances share them.

pub mod memory_rate_limiter;
pub mod memory_verification_store;

#[cfg(feature = "redis-cache")]
pub mod redis_client;
#[cfg(feature = "redis-cache")]
pub mod redis_rate_limiter;
#[cfg(feature = "redis-cache")]
pub mod redis_verification_store;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use er_core::services::cleanup::CleanupTask;
use er_core::services::clock::Clock;
use er_core::services::rate_limit::RateLimiter;
use er_core::services::verification::VerificationStore;
use er_shared::{AppConfig, CacheBackend};

use crate::InfrastructureError;

pub use memory_rate_limiter::InMemoryRateLimiter;
pub use memory_verification_store::InMemoryVerificationStore;

#[cfg(feature = "redis-cache")]
pub use redis_client::RedisClient;
#[cfg(feature = "redis-cache")]
pub use redis_rate_limiter::RedisRateLimiter;
#[cfg(feature = "redis-cache")]
pub use redis_verification_store::RedisVerificationStore;

/// The two stores shared by every request handler
#[derive(Clone)]
pub struct Stores {
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub verification_store: Arc<dyn VerificationStore>,
}

impl Stores {
    /// Process-local stores
    pub fn in_memory(clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        Self {
            rate_limiter: Arc::new(InMemoryRateLimiter::new(clock.clone())),
            verification_store: Arc::new(InMemoryVerificationStore::new(clock, max_attempts)),
        }
    }

    /// Start the periodic sweeps configured for both stores
    pub fn spawn_cleanup(&self, config: &AppConfig) -> Vec<CleanupTask> {
        vec![
            CleanupTask::for_rate_limiter(
                self.rate_limiter.clone(),
                Duration::from_secs(config.rate_limit.cleanup_interval_secs),
            ),
            CleanupTask::for_verification_store(
                self.verification_store.clone(),
                Duration::from_secs(config.verification.cleanup_interval_secs),
            ),
        ]
    }
}

/// Build the stores selected by `cache.backend`
pub async fn build_stores(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<Stores, InfrastructureError> {
    let max_attempts = config.verification.max_attempts;

    match config.cache.backend {
        CacheBackend::Memory => {
            info!(backend = "memory", "Using in-process stores");
            Ok(Stores::in_memory(clock, max_attempts))
        }
        #[cfg(feature = "redis-cache")]
        CacheBackend::Redis => {
            let redis = RedisClient::connect(&config.cache).await?;
            info!(backend = "redis", "Using Redis stores");
            Ok(Stores {
                rate_limiter: Arc::new(RedisRateLimiter::new(redis.clone(), clock.clone())),
                verification_store: Arc::new(RedisVerificationStore::new(redis, clock, max_attempts)),
            })
        }
        #[cfg(not(feature = "redis-cache"))]
        CacheBackend::Redis => Err(InfrastructureError::Config(
            "cache.backend = \"redis\" requires the redis-cache feature".to_string(),
        )),
    }
}

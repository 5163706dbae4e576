//! Redis connection handling and key layout

use redis::aio::{Connection, MultiplexedConnection};
use sha2::{Digest, Sha256};
use tracing::info;

use er_shared::CacheConfig;

use crate::InfrastructureError;

/// Optimistic transactions retried this many times before giving up
pub(crate) const MAX_TRANSACTION_RETRIES: usize = 8;

/// Redis client with the application's key prefix
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    key_prefix: String,
}

impl RedisClient {
    /// Open a client and check the server answers
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let redis = Self {
            client,
            key_prefix: config.key_prefix.clone(),
        };
        redis.ping().await?;

        info!(prefix = %redis.key_prefix, "Connected to Redis");
        Ok(redis)
    }

    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        let mut conn = self.multiplexed().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Shared connection for single-command operations
    pub async fn multiplexed(&self) -> Result<MultiplexedConnection, InfrastructureError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// Dedicated connection, required for WATCH/MULTI transactions
    pub async fn dedicated(&self) -> Result<Connection, InfrastructureError> {
        Ok(self.client.get_async_connection().await?)
    }

    /// `<prefix>:<namespace>:<id>`
    pub fn key(&self, namespace: &str, id: &str) -> String {
        format!("{}:{}:{}", self.key_prefix, namespace, id)
    }

    /// Like `key`, with the id replaced by its SHA-256 so raw values never reach Redis
    pub fn hashed_key(&self, namespace: &str, id: &str) -> String {
        self.key(namespace, &hash_id(id))
    }
}

fn hash_id(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! Memcached client wrapper.

use std::sync::Arc;

use tokio::task;

use crate::TRACING_TARGET;
use crate::backend::{CacheBackend, MAX_ITEM_SIZE};
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::item::CacheItem;

/// Memcached-backed [`CacheBackend`].
///
/// The memcache crate's client is blocking, so every call runs on the
/// blocking thread pool via `spawn_blocking`.
#[derive(Clone)]
pub struct MemcacheClient {
    client: Arc<memcache::Client>,
    endpoint: String,
}

impl MemcacheClient {
    /// Connects to the configured endpoint.
    pub async fn connect(config: CacheConfig) -> CacheResult<Self> {
        let endpoint = config.endpoint();
        let url = endpoint.clone();

        let client = task::spawn_blocking(move || memcache::connect(url))
            .await
            .map_err(|err| CacheError::join(err.to_string()))?
            .map_err(|err| CacheError::connect(&endpoint, err.to_string()))?;

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            "cache client connected"
        );

        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }

    /// The endpoint URL this client is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CacheBackend for MemcacheClient {
    async fn set(&self, key: &str, value: &[u8], expiration: u32) -> CacheResult<()> {
        if value.len() > MAX_ITEM_SIZE {
            return Err(CacheError::too_large(value.len()));
        }

        let client = Arc::clone(&self.client);
        let owned_key = key.to_owned();
        let owned_value = value.to_vec();

        task::spawn_blocking(move || {
            client.set(owned_key.as_str(), owned_value.as_slice(), expiration)
        })
        .await
        .map_err(|err| CacheError::join(err.to_string()))?
        .map_err(|err| CacheError::store(key, err.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size = value.len(),
            expiration = expiration,
            "stored cache value"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<CacheItem>> {
        let client = Arc::clone(&self.client);
        let owned_key = key.to_owned();

        // Fetch the (value, flags) pair so the server-assigned flags survive.
        let fetched: Option<(Vec<u8>, u32)> =
            task::spawn_blocking(move || client.get(owned_key.as_str()))
                .await
                .map_err(|err| CacheError::join(err.to_string()))?
                .map_err(|err| CacheError::fetch(key, err.to_string()))?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            cache_hit = fetched.is_some(),
            "fetched cache value"
        );

        Ok(fetched.map(|(value, flags)| CacheItem::new(key, value).with_flags(flags)))
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let client = Arc::clone(&self.client);
        let owned_key = key.to_owned();

        task::spawn_blocking(move || client.delete(owned_key.as_str()))
            .await
            .map_err(|err| CacheError::join(err.to_string()))?
            .map_err(|err| CacheError::delete(key, err.to_string()))?;

        tracing::debug!(target: TRACING_TARGET, key = %key, "deleted cache key");

        Ok(())
    }
}

//! The cache seam and the roundtrip flow.

use crate::TRACING_TARGET;
use crate::error::{CacheError, CacheResult};
use crate::item::CacheItem;

/// Largest value (in bytes) a classic memcached item accepts.
pub const MAX_ITEM_SIZE: usize = 1024 * 1024;

/// Operations the cache-roundtrip flow needs from a cache.
///
/// Implemented by [`MemcacheClient`](crate::MemcacheClient) for the real
/// service and by the in-memory cache in [`mock`](crate::mock) for tests.
#[async_trait::async_trait]
pub trait CacheBackend: Send + Sync {
    /// Stores a value under a key with an expiration in seconds (0 never expires).
    async fn set(&self, key: &str, value: &[u8], expiration: u32) -> CacheResult<()>;

    /// Fetches the item stored under a key.
    async fn get(&self, key: &str) -> CacheResult<Option<CacheItem>>;

    /// Removes a key.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}

/// Stores one key and reads it back.
///
/// Values larger than [`MAX_ITEM_SIZE`] are rejected before the backend is
/// touched. A miss after a successful store is an error; callers running
/// the probe treat it as fatal.
pub async fn roundtrip<B>(
    backend: &B,
    key: &str,
    value: &[u8],
    expiration: u32,
) -> CacheResult<CacheItem>
where
    B: CacheBackend + ?Sized,
{
    if value.len() > MAX_ITEM_SIZE {
        return Err(CacheError::too_large(value.len()));
    }

    backend.set(key, value, expiration).await?;

    let mut item = backend
        .get(key)
        .await?
        .ok_or_else(|| CacheError::miss(key))?;
    // The classic get does not report TTL; echo what was requested.
    item.expiration = expiration;

    tracing::debug!(
        target: TRACING_TARGET,
        key = %key,
        size = item.size(),
        "roundtrip complete"
    );

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryCache;

    #[tokio::test]
    async fn test_roundtrip_byte_equality() {
        let cache = MemoryCache::new();
        for value in [&b""[..], &b"Hello World"[..], &[0u8, 255, 7, 42][..]] {
            let item = roundtrip(&cache, "greeting", value, 0).await.unwrap();
            assert_eq!(item.key, "greeting");
            assert_eq!(item.value, value);
            assert_eq!(item.flags, 0);
            assert_eq!(item.expiration, 0);
        }
    }

    #[tokio::test]
    async fn test_roundtrip_at_size_limit() {
        let cache = MemoryCache::new();
        let value = vec![0xa5u8; MAX_ITEM_SIZE];
        let item = roundtrip(&cache, "big", &value, 60).await.unwrap();
        assert_eq!(item.value.len(), MAX_ITEM_SIZE);
        assert_eq!(item.expiration, 60);
    }

    #[tokio::test]
    async fn test_oversize_value_never_reaches_backend() {
        let cache = MemoryCache::new();
        let value = vec![0u8; MAX_ITEM_SIZE + 1];
        let err = roundtrip(&cache, "big", &value, 0).await.unwrap_err();
        assert!(matches!(err, CacheError::TooLarge { .. }));
        assert!(cache.is_empty());
    }

    /// Backend that reports server-assigned flags on every item.
    struct FlaggedCache(MemoryCache);

    #[async_trait::async_trait]
    impl CacheBackend for FlaggedCache {
        async fn set(&self, key: &str, value: &[u8], expiration: u32) -> CacheResult<()> {
            self.0.set(key, value, expiration).await
        }

        async fn get(&self, key: &str) -> CacheResult<Option<CacheItem>> {
            Ok(self.0.get(key).await?.map(|item| item.with_flags(7)))
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.0.delete(key).await
        }
    }

    #[tokio::test]
    async fn test_roundtrip_keeps_reported_flags() {
        let cache = FlaggedCache(MemoryCache::new());
        let item = roundtrip(&cache, "greeting", b"Hello World", 0).await.unwrap();
        assert_eq!(item.flags, 7);
    }

    /// Backend that silently drops stores.
    struct DroppingCache;

    #[async_trait::async_trait]
    impl CacheBackend for DroppingCache {
        async fn set(&self, _key: &str, _value: &[u8], _expiration: u32) -> CacheResult<()> {
            Ok(())
        }

        async fn get(&self, _key: &str) -> CacheResult<Option<CacheItem>> {
            Ok(None)
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_miss_after_store_is_error() {
        let err = roundtrip(&DroppingCache, "greeting", b"hi", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Miss { .. }));
    }
}

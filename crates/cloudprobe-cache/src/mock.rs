//! In-memory [`CacheBackend`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::backend::CacheBackend;
use crate::error::CacheResult;
use crate::item::CacheItem;

/// In-memory cache backend. Expirations are stored but never enforced.
#[derive(Debug, Default)]
pub struct MemoryCache {
    items: Mutex<HashMap<String, CacheItem>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.lock().expect("lock poisoned").len()
    }

    /// Whether the cache holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl CacheBackend for MemoryCache {
    async fn set(&self, key: &str, value: &[u8], expiration: u32) -> CacheResult<()> {
        let item = CacheItem::new(key, value).with_expiration(expiration);
        self.items
            .lock()
            .expect("lock poisoned")
            .insert(key.to_owned(), item);
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<CacheItem>> {
        Ok(self.items.lock().expect("lock poisoned").get(key).cloned())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.items.lock().expect("lock poisoned").remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCache::new();
        cache.set("greeting", b"Hello World", 0).await.unwrap();
        assert_eq!(cache.len(), 1);

        let item = cache.get("greeting").await.unwrap().unwrap();
        assert_eq!(item.value, b"Hello World");

        cache.delete("greeting").await.unwrap();
        assert_eq!(cache.get("greeting").await.unwrap(), None);
    }
}

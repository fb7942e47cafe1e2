//! Cache item type.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A key/value pair with the metadata memcached tracks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheItem {
    /// Item key.
    pub key: String,
    /// Stored bytes.
    pub value: Vec<u8>,
    /// Flags stored with the item; raw byte values are written with zero
    /// flags, and `get` reports whatever the server has.
    pub flags: u32,
    /// Expiration in seconds as requested at store time; 0 never expires.
    /// The classic text protocol does not report the remaining TTL on get.
    pub expiration: u32,
}

impl CacheItem {
    /// Creates a new item.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            flags: 0,
            expiration: 0,
        }
    }

    /// Sets the flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the expiration.
    pub fn with_expiration(mut self, expiration: u32) -> Self {
        self.expiration = expiration;
        self
    }

    /// The value as UTF-8 text, with invalid bytes replaced.
    pub fn value_utf8(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Stored value size in bytes.
    pub fn size(&self) -> usize {
        self.value.len()
    }
}

impl fmt::Display for CacheItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key={} flags={} expiration={} value={}",
            self.key,
            self.flags,
            self.expiration,
            self.value_utf8()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_utf8() {
        let item = CacheItem::new("greeting", "Hello World");
        assert_eq!(item.value_utf8(), "Hello World");
        assert_eq!(item.size(), 11);
    }

    #[test]
    fn test_value_utf8_lossy() {
        let item = CacheItem::new("blob", vec![0xff, 0xfe]);
        assert_eq!(item.value_utf8(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_display() {
        let item = CacheItem::new("greeting", "hi").with_expiration(60);
        assert_eq!(item.to_string(), "key=greeting flags=0 expiration=60 value=hi");
    }
}

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod client;
mod config;
mod error;
mod item;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use backend::{CacheBackend, MAX_ITEM_SIZE, roundtrip};
pub use client::MemcacheClient;
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use item::CacheItem;

/// Tracing target for cache operations.
pub const TRACING_TARGET: &str = "cloudprobe_cache";

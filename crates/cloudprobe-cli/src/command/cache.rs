//! Memcached roundtrip probe.

use anyhow::Context;
use clap::Args;
use cloudprobe_cache::{CacheConfig, MemcacheClient, roundtrip};

/// Arguments for the `cache` probe.
#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Cache endpoint configuration.
    #[clap(flatten)]
    pub config: CacheConfig,

    /// Key stored and read back.
    #[arg(long, env = "CLOUDPROBE_CACHE_KEY", default_value = "greeting")]
    pub key: String,

    /// Value stored under the key.
    #[arg(long, default_value = "Hello World")]
    pub value: String,

    /// Expiration in seconds; 0 never expires.
    #[arg(long, default_value_t = 0)]
    pub expiration: u32,
}

/// Stores one key, reads it back, and prints the item. Any error is fatal.
pub async fn run(args: CacheArgs) -> anyhow::Result<()> {
    let client = MemcacheClient::connect(args.config)
        .await
        .context("cannot connect to cache")?;

    let item = roundtrip(&client, &args.key, args.value.as_bytes(), args.expiration)
        .await
        .context("cache roundtrip failed")?;

    println!("key: {}", item.key);
    println!("value: {}", item.value_utf8());
    println!("flags: {}", item.flags);
    println!("expiration: {}", item.expiration);

    Ok(())
}

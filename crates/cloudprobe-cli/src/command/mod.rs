//! Command-line surface for the probes.
//!
//! ```text
//! cloudprobe
//! ├── objects   # first-page bucket listing (fatal on error)
//! ├── secrets   # secret-lifecycle sequence (soft/continue per step)
//! └── cache     # memcached set/get roundtrip (fatal on error)
//! ```

mod cache;
mod objects;
mod secrets;

use clap::{Parser, Subcommand};

pub use cache::CacheArgs;
pub use objects::ObjectsArgs;
pub use secrets::SecretsArgs;

/// Complete CLI configuration.
#[derive(Debug, Parser)]
#[command(name = "cloudprobe")]
#[command(about = "Smoke probes for managed cloud services")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// The available probes.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the first page of objects in a bucket.
    Objects(ObjectsArgs),
    /// Run the secret-lifecycle sequence against one secret name.
    Secrets(SecretsArgs),
    /// Store one key in memcached and read it back.
    Cache(CacheArgs),
}

impl Cli {
    /// Runs the selected probe.
    pub async fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Command::Objects(args) => objects::run(args).await,
            Command::Secrets(args) => secrets::run(args).await,
            Command::Cache(args) => cache::run(args).await,
        }
    }
}

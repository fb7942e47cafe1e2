//! First-page bucket listing probe.

use anyhow::Context;
use clap::Args;
use cloudprobe_object::{ObjectClient, ObjectConfig};

/// Arguments for the `objects` probe.
#[derive(Debug, Args)]
pub struct ObjectsArgs {
    /// Bucket and credential configuration.
    #[clap(flatten)]
    pub config: ObjectConfig,
}

/// Lists the first page of the bucket and prints one `key=... size=...`
/// row per object. Any error is fatal.
pub async fn run(args: ObjectsArgs) -> anyhow::Result<()> {
    let client = ObjectClient::connect(args.config)
        .await
        .context("cannot load AWS configuration")?;

    let entries = client
        .list_first_page()
        .await
        .context("cannot list bucket")?;

    println!("first page results:");
    for entry in &entries {
        println!("{entry}");
    }

    Ok(())
}

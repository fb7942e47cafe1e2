//! Secret-lifecycle probe.

use anyhow::Context;
use clap::Args;
use cloudprobe_secrets::{
    AwsSecretsClient, LifecyclePlan, RecoveryWindow, SecretPayload, SecretsConfig, run_lifecycle,
};

/// Arguments for the `secrets` probe.
#[derive(Debug, Args)]
pub struct SecretsArgs {
    /// Credential and endpoint configuration.
    #[clap(flatten)]
    pub config: SecretsConfig,

    /// Secret name the whole sequence operates on.
    #[arg(
        long,
        env = "CLOUDPROBE_SECRET_NAME",
        default_value = "cloudprobe/sample/configs/v1"
    )]
    pub name: String,

    /// Description attached on create and update.
    #[arg(long, default_value = "cloudprobe sample secret")]
    pub description: String,

    /// JSON object stored by the create step.
    #[arg(
        long,
        default_value = r#"{"dbName":"dbname","dbPassword":"dbpassword","dbPort":"3306"}"#
    )]
    pub create_payload: String,

    /// JSON object stored by the update step.
    #[arg(
        long,
        default_value = r#"{"dbName":"modDbname","dbPassword":"modDbpassword","dbPort":"3306"}"#
    )]
    pub update_payload: String,

    /// JSON object stored by the put-value step.
    #[arg(
        long,
        default_value = r#"{"dbName":"putDbname","dbPassword":"putDbpassword","dbPort":"3306"}"#
    )]
    pub put_payload: String,

    /// Recovery window in days for the delete step; 0 deletes immediately.
    #[arg(long, default_value_t = 30)]
    pub recovery_window_days: u32,
}

impl SecretsArgs {
    fn plan(&self) -> anyhow::Result<LifecyclePlan> {
        Ok(LifecyclePlan::new(&self.name)
            .with_description(&self.description)
            .with_create_payload(
                SecretPayload::from_json(&self.create_payload)
                    .context("invalid --create-payload")?,
            )
            .with_update_payload(
                SecretPayload::from_json(&self.update_payload)
                    .context("invalid --update-payload")?,
            )
            .with_put_payload(
                SecretPayload::from_json(&self.put_payload).context("invalid --put-payload")?,
            )
            .with_recovery_window(RecoveryWindow::days(self.recovery_window_days)))
    }
}

/// Runs the fixed lifecycle sequence and prints each step's outcome.
///
/// Step failures do not fail the probe; only an unusable configuration or
/// credential set does.
pub async fn run(args: SecretsArgs) -> anyhow::Result<()> {
    let plan = args.plan()?;

    let client = AwsSecretsClient::connect(args.config)
        .await
        .context("cannot load AWS configuration")?;

    let report = run_lifecycle(&client, &plan).await;
    for outcome in report.steps() {
        println!("{outcome}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[clap(flatten)]
        args: SecretsArgs,
    }

    #[test]
    fn test_default_plan() {
        let harness = Harness::try_parse_from(["probe"]).unwrap();
        let plan = harness.args.plan().unwrap();
        assert_eq!(plan.name, "cloudprobe/sample/configs/v1");
        assert_eq!(plan.create_payload.get("dbName"), Some("dbname"));
        assert_eq!(plan.recovery_window, RecoveryWindow::Days(30));
    }

    #[test]
    fn test_bad_payload_is_rejected() {
        let harness =
            Harness::try_parse_from(["probe", "--create-payload", "not json"]).unwrap();
        assert!(harness.args.plan().is_err());
    }
}

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
pub mod lifecycle;
mod payload;
mod store;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use client::AwsSecretsClient;
pub use config::SecretsConfig;
pub use error::{ErrorKind, SecretsError, SecretsResult};
pub use lifecycle::{LifecyclePlan, LifecycleReport, Step, StepOutcome, run_lifecycle};
pub use payload::SecretPayload;
pub use store::SecretStore;
pub use types::{DeletedSecret, RecoveryWindow, SecretPolicy, SecretRecord, SecretValue};

/// Tracing target for secret store operations.
pub const TRACING_TARGET: &str = "cloudprobe_secrets";

/// Tracing target for the lifecycle driver.
pub const TRACING_TARGET_LIFECYCLE: &str = "cloudprobe_secrets::lifecycle";

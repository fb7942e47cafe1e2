//! The fixed secret-lifecycle sequence.
//!
//! Runs create, describe, get-policy, get-value, update, put-value, and
//! delete against one secret name under a soft/continue policy: a failed
//! step is recorded with its mapped label and the sequence keeps going with
//! its own inputs. Steps never depend on the output of earlier steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_LIFECYCLE;
use crate::error::SecretsResult;
use crate::payload::SecretPayload;
use crate::store::SecretStore;
use crate::types::RecoveryWindow;

/// The steps of the lifecycle sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Create,
    Describe,
    GetPolicy,
    GetValue,
    Update,
    PutValue,
    Delete,
}

impl Step {
    /// Short name used in logs and printed output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Describe => "describe",
            Self::GetPolicy => "get-policy",
            Self::GetValue => "get-value",
            Self::Update => "update",
            Self::PutValue => "put-value",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs for one lifecycle run. Every value is an explicit parameter;
/// nothing is read from shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use = "plan does nothing unless you run it"]
pub struct LifecyclePlan {
    /// Secret name the whole sequence operates on.
    pub name: String,
    /// Description attached on create and update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Payload stored by the create step.
    pub create_payload: SecretPayload,
    /// Payload stored by the update step.
    pub update_payload: SecretPayload,
    /// Payload stored by the put-value step.
    pub put_payload: SecretPayload,
    /// Recovery window requested by the delete step.
    pub recovery_window: RecoveryWindow,
}

impl LifecyclePlan {
    /// Creates a plan for the given secret name with empty payloads and the
    /// default (maximum) recovery window.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            create_payload: SecretPayload::new(),
            update_payload: SecretPayload::new(),
            put_payload: SecretPayload::new(),
            recovery_window: RecoveryWindow::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the payload stored on create.
    pub fn with_create_payload(mut self, payload: SecretPayload) -> Self {
        self.create_payload = payload;
        self
    }

    /// Sets the payload stored on update.
    pub fn with_update_payload(mut self, payload: SecretPayload) -> Self {
        self.update_payload = payload;
        self
    }

    /// Sets the payload stored on put-value.
    pub fn with_put_payload(mut self, payload: SecretPayload) -> Self {
        self.put_payload = payload;
        self
    }

    /// Sets the recovery window for the delete step.
    pub fn with_recovery_window(mut self, window: RecoveryWindow) -> Self {
        self.recovery_window = window;
        self
    }
}

/// The recorded result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Which step ran.
    pub step: Step,
    /// A one-line summary on success, the mapped error label on failure.
    pub result: Result<String, String>,
}

impl StepOutcome {
    /// Whether the step succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The error label, when the step failed.
    pub fn error(&self) -> Option<&str> {
        self.result.as_ref().err().map(String::as_str)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(summary) => write!(f, "{}: {summary}", self.step),
            Err(label) => write!(f, "{}: {label}", self.step),
        }
    }
}

/// Outcome of a full lifecycle run, one entry per step.
#[derive(Debug, Clone, Default)]
pub struct LifecycleReport {
    steps: Vec<StepOutcome>,
}

impl LifecycleReport {
    /// The recorded step outcomes, in execution order.
    pub fn steps(&self) -> &[StepOutcome] {
        &self.steps
    }

    /// Whether every step succeeded.
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(StepOutcome::is_success)
    }

    /// The outcomes of steps that failed.
    pub fn failures(&self) -> Vec<&StepOutcome> {
        self.steps
            .iter()
            .filter(|outcome| !outcome.is_success())
            .collect()
    }

    fn record<T>(&mut self, step: Step, result: SecretsResult<T>, summarize: impl Fn(&T) -> String) {
        match result {
            Ok(value) => {
                self.steps.push(StepOutcome {
                    step,
                    result: Ok(summarize(&value)),
                });
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_LIFECYCLE,
                    step = step.name(),
                    error = %error,
                    "lifecycle step failed"
                );
                self.steps.push(StepOutcome {
                    step,
                    result: Err(error.label()),
                });
            }
        }
    }
}

/// Runs the fixed sequence against the store.
///
/// Never fails: each step's error is mapped to its label and recorded, and
/// the remaining steps still run with the plan's own inputs.
pub async fn run_lifecycle<S>(store: &S, plan: &LifecyclePlan) -> LifecycleReport
where
    S: SecretStore + ?Sized,
{
    let name = plan.name.as_str();
    let description = plan.description.as_deref();
    let mut report = LifecycleReport::default();

    tracing::info!(
        target: TRACING_TARGET_LIFECYCLE,
        secret = %name,
        window_days = plan.recovery_window.as_days(),
        "running secret lifecycle"
    );

    report.record(
        Step::Create,
        store.create(name, description, &plan.create_payload).await,
        |record| format!("created '{}'", record.name),
    );

    report.record(Step::Describe, store.describe(name).await, |record| {
        if record.is_pending_deletion() {
            format!("'{}' (pending deletion)", record.name)
        } else {
            format!(
                "'{}' ({})",
                record.name,
                record.description.as_deref().unwrap_or("no description")
            )
        }
    });

    report.record(Step::GetPolicy, store.get_policy(name).await, |policy| {
        match &policy.document {
            Some(document) => format!("policy: {document}"),
            None => "no resource policy".to_owned(),
        }
    });

    report.record(Step::GetValue, store.get_value(name).await, |value| {
        format!("value: {}", value.payload)
    });

    report.record(
        Step::Update,
        store.update(name, description, &plan.update_payload).await,
        |record| format!("updated '{}'", record.name),
    );

    report.record(
        Step::PutValue,
        store.put_value(name, &plan.put_payload).await,
        |value| match &value.version_id {
            Some(version) => format!("stored version {version}"),
            None => "stored new version".to_owned(),
        },
    );

    report.record(
        Step::Delete,
        store.delete(name, plan.recovery_window).await,
        |deleted| match deleted.deletion_date {
            Some(epoch) => format!("scheduled for deletion at {epoch}"),
            None => "deleted immediately".to_owned(),
        },
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretsResult;
    use crate::mock::MemorySecretStore;
    use crate::types::{DeletedSecret, SecretPolicy, SecretRecord, SecretValue};

    fn plan() -> LifecyclePlan {
        LifecyclePlan::new("proj/secret/v1")
            .with_description("probe secret")
            .with_create_payload(SecretPayload::from_pairs([("a", "1")]))
            .with_update_payload(SecretPayload::from_pairs([("a", "2")]))
            .with_put_payload(SecretPayload::from_pairs([("a", "3")]))
            .with_recovery_window(RecoveryWindow::days(30))
    }

    #[tokio::test]
    async fn test_full_sequence_succeeds() {
        let store = MemorySecretStore::new();
        let report = run_lifecycle(&store, &plan()).await;

        assert!(report.succeeded(), "failures: {:?}", report.failures());
        assert_eq!(report.steps().len(), 7);
        assert_eq!(report.steps()[0].step, Step::Create);
        assert_eq!(report.steps()[6].step, Step::Delete);

        // Windowed delete leaves the secret describable but pending.
        let record = store.describe("proj/secret/v1").await.unwrap();
        assert!(record.is_pending_deletion());
    }

    #[tokio::test]
    async fn test_existing_secret_fails_only_create() {
        let store = MemorySecretStore::new();
        store
            .create("proj/secret/v1", None, &SecretPayload::new())
            .await
            .unwrap();

        let report = run_lifecycle(&store, &plan()).await;

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].step, Step::Create);
        assert_eq!(failures[0].error(), Some("resource exists"));
    }

    /// Store whose describe always reports a missing secret.
    struct MissingDescribe(MemorySecretStore);

    #[async_trait::async_trait]
    impl SecretStore for MissingDescribe {
        async fn create(
            &self,
            name: &str,
            description: Option<&str>,
            payload: &SecretPayload,
        ) -> SecretsResult<SecretRecord> {
            self.0.create(name, description, payload).await
        }

        async fn describe(&self, name: &str) -> SecretsResult<SecretRecord> {
            let _ = name;
            Err(crate::SecretsError::service(
                "describe_secret",
                crate::ErrorKind::ResourceNotFound,
                "gone",
            ))
        }

        async fn get_policy(&self, name: &str) -> SecretsResult<SecretPolicy> {
            self.0.get_policy(name).await
        }

        async fn get_value(&self, name: &str) -> SecretsResult<SecretValue> {
            self.0.get_value(name).await
        }

        async fn update(
            &self,
            name: &str,
            description: Option<&str>,
            payload: &SecretPayload,
        ) -> SecretsResult<SecretRecord> {
            self.0.update(name, description, payload).await
        }

        async fn put_value(
            &self,
            name: &str,
            payload: &SecretPayload,
        ) -> SecretsResult<SecretValue> {
            self.0.put_value(name, payload).await
        }

        async fn delete(
            &self,
            name: &str,
            window: RecoveryWindow,
        ) -> SecretsResult<DeletedSecret> {
            self.0.delete(name, window).await
        }
    }

    #[tokio::test]
    async fn test_describe_failure_does_not_stop_sequence() {
        let store = MissingDescribe(MemorySecretStore::new());
        let report = run_lifecycle(&store, &plan()).await;

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].step, Step::Describe);
        assert_eq!(failures[0].error(), Some("resource not found"));

        // Downstream steps still ran with their own inputs.
        assert_eq!(report.steps().len(), 7);
        assert!(report.steps()[3].is_success());
        assert!(report.steps()[6].is_success());
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let store = MemorySecretStore::new();
        let name = "proj/secret/v1";

        store
            .create(name, Some("probe"), &SecretPayload::from_pairs([("a", "1")]))
            .await
            .unwrap();

        let record = store.describe(name).await.unwrap();
        assert_eq!(record.name, name);

        let value = store.get_value(name).await.unwrap();
        assert_eq!(value.payload, r#"{"a":"1"}"#);

        store
            .update(name, None, &SecretPayload::from_pairs([("a", "2")]))
            .await
            .unwrap();
        let value = store.get_value(name).await.unwrap();
        assert_eq!(value.payload, r#"{"a":"2"}"#);

        store.delete(name, RecoveryWindow::days(30)).await.unwrap();
        let record = store.describe(name).await.unwrap();
        assert!(record.is_pending_deletion());
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = StepOutcome {
            step: Step::Create,
            result: Ok("created 'proj/secret/v1'".to_owned()),
        };
        assert!(ok.is_success());
        assert_eq!(ok.error(), None);

        let failed = StepOutcome {
            step: Step::Describe,
            result: Err("resource not found".to_owned()),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("resource not found"));
    }

    #[tokio::test]
    async fn test_outcome_display() {
        let store = MemorySecretStore::new();
        let report = run_lifecycle(&store, &plan()).await;
        let rendered = report.steps()[0].to_string();
        assert_eq!(rendered, "create: created 'proj/secret/v1'");
    }
}

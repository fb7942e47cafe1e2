//! The secret store seam.

use crate::error::SecretsResult;
use crate::payload::SecretPayload;
use crate::types::{DeletedSecret, RecoveryWindow, SecretPolicy, SecretRecord, SecretValue};

/// Operations the secret-lifecycle flow needs from a secret store.
///
/// Implemented by [`AwsSecretsClient`](crate::AwsSecretsClient) for the real
/// service and by the in-memory store in [`mock`](crate::mock) for tests.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Creates a new secret with an optional description and a payload.
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord>;

    /// Describes a secret without reading its value.
    async fn describe(&self, name: &str) -> SecretsResult<SecretRecord>;

    /// Reads the resource policy attached to a secret.
    async fn get_policy(&self, name: &str) -> SecretsResult<SecretPolicy>;

    /// Reads the current value of a secret.
    async fn get_value(&self, name: &str) -> SecretsResult<SecretValue>;

    /// Updates a secret's description and value in one call.
    async fn update(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord>;

    /// Writes a new value version without touching metadata.
    async fn put_value(&self, name: &str, payload: &SecretPayload) -> SecretsResult<SecretValue>;

    /// Schedules a secret for deletion.
    async fn delete(&self, name: &str, window: RecoveryWindow) -> SecretsResult<DeletedSecret>;
}

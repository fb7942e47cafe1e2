//! In-memory [`SecretStore`] for tests.
//!
//! Mirrors the service behaviors the lifecycle flow observes: duplicate
//! creates fail with "resource exists", reads of missing names fail with
//! "resource not found", windowed deletes leave the record describable but
//! pending deletion, and value access on a pending secret is rejected the
//! way the real service rejects it.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorKind, SecretsError, SecretsResult};
use crate::payload::SecretPayload;
use crate::store::SecretStore;
use crate::types::{DeletedSecret, RecoveryWindow, SecretPolicy, SecretRecord, SecretValue};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone)]
struct StoredSecret {
    description: Option<String>,
    payload: String,
    policy: Option<String>,
    versions: u32,
    deletion_epoch: Option<i64>,
}

/// In-memory secret store with service-like error behavior.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<BTreeMap<String, StoredSecret>>,
}

impl MemorySecretStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of secrets currently held, pending deletions included.
    pub fn len(&self) -> usize {
        self.secrets.lock().expect("lock poisoned").len()
    }

    /// Whether the store holds no secrets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attaches a resource policy document to an existing secret.
    pub fn set_policy(&self, name: &str, document: impl Into<String>) -> bool {
        let mut secrets = self.secrets.lock().expect("lock poisoned");
        match secrets.get_mut(name) {
            Some(secret) => {
                secret.policy = Some(document.into());
                true
            }
            None => false,
        }
    }

    fn not_found(operation: &'static str, name: &str) -> SecretsError {
        SecretsError::service(
            operation,
            ErrorKind::ResourceNotFound,
            format!("Secrets Manager can't find the specified secret: {name}"),
        )
    }

    fn pending_deletion(operation: &'static str, name: &str) -> SecretsError {
        SecretsError::service(
            operation,
            ErrorKind::InvalidRequest,
            format!("secret {name} is marked for deletion"),
        )
    }

    fn version_id(versions: u32) -> Option<String> {
        Some(format!("v{versions:08}"))
    }
}

fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl SecretStore for MemorySecretStore {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord> {
        let mut secrets = self.secrets.lock().expect("lock poisoned");
        if secrets.contains_key(name) {
            return Err(SecretsError::service(
                "create_secret",
                ErrorKind::ResourceExists,
                format!("the secret {name} already exists"),
            ));
        }
        secrets.insert(
            name.to_owned(),
            StoredSecret {
                description: description.map(str::to_owned),
                payload: payload.to_json()?,
                policy: None,
                versions: 1,
                deletion_epoch: None,
            },
        );
        Ok(SecretRecord {
            name: name.to_owned(),
            arn: Some(format!("arn:aws:secretsmanager:::secret:{name}")),
            description: description.map(str::to_owned),
            deleted_date: None,
        })
    }

    async fn describe(&self, name: &str) -> SecretsResult<SecretRecord> {
        let secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get(name)
            .ok_or_else(|| Self::not_found("describe_secret", name))?;
        Ok(SecretRecord {
            name: name.to_owned(),
            arn: Some(format!("arn:aws:secretsmanager:::secret:{name}")),
            description: secret.description.clone(),
            deleted_date: secret.deletion_epoch,
        })
    }

    async fn get_policy(&self, name: &str) -> SecretsResult<SecretPolicy> {
        let secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get(name)
            .ok_or_else(|| Self::not_found("get_resource_policy", name))?;
        Ok(SecretPolicy {
            name: name.to_owned(),
            document: secret.policy.clone(),
        })
    }

    async fn get_value(&self, name: &str) -> SecretsResult<SecretValue> {
        let secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get(name)
            .ok_or_else(|| Self::not_found("get_secret_value", name))?;
        if secret.deletion_epoch.is_some() {
            return Err(Self::pending_deletion("get_secret_value", name));
        }
        Ok(SecretValue {
            name: name.to_owned(),
            payload: secret.payload.clone(),
            version_id: Self::version_id(secret.versions),
        })
    }

    async fn update(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord> {
        let mut secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get_mut(name)
            .ok_or_else(|| Self::not_found("update_secret", name))?;
        if secret.deletion_epoch.is_some() {
            return Err(Self::pending_deletion("update_secret", name));
        }
        if description.is_some() {
            secret.description = description.map(str::to_owned);
        }
        secret.payload = payload.to_json()?;
        secret.versions += 1;
        Ok(SecretRecord {
            name: name.to_owned(),
            arn: Some(format!("arn:aws:secretsmanager:::secret:{name}")),
            description: secret.description.clone(),
            deleted_date: None,
        })
    }

    async fn put_value(&self, name: &str, payload: &SecretPayload) -> SecretsResult<SecretValue> {
        let mut secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get_mut(name)
            .ok_or_else(|| Self::not_found("put_secret_value", name))?;
        if secret.deletion_epoch.is_some() {
            return Err(Self::pending_deletion("put_secret_value", name));
        }
        secret.payload = payload.to_json()?;
        secret.versions += 1;
        Ok(SecretValue {
            name: name.to_owned(),
            payload: secret.payload.clone(),
            version_id: Self::version_id(secret.versions),
        })
    }

    async fn delete(&self, name: &str, window: RecoveryWindow) -> SecretsResult<DeletedSecret> {
        let mut secrets = self.secrets.lock().expect("lock poisoned");
        let secret = secrets
            .get_mut(name)
            .ok_or_else(|| Self::not_found("delete_secret", name))?;
        if secret.deletion_epoch.is_some() {
            return Err(Self::pending_deletion("delete_secret", name));
        }
        match window.as_days() {
            Some(days) => {
                let deletion_epoch = now_epoch() + i64::from(days) * SECONDS_PER_DAY;
                secret.deletion_epoch = Some(deletion_epoch);
                Ok(DeletedSecret {
                    name: name.to_owned(),
                    deletion_date: Some(deletion_epoch),
                })
            }
            None => {
                secrets.remove(name);
                Ok(DeletedSecret {
                    name: name.to_owned(),
                    deletion_date: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> SecretPayload {
        SecretPayload::from_pairs([("a", "1")])
    }

    #[tokio::test]
    async fn test_describe_missing_is_not_found() {
        let store = MemorySecretStore::new();
        let err = store.describe("proj/secret/v1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.label(), "resource not found");
    }

    #[tokio::test]
    async fn test_duplicate_create_is_resource_exists() {
        let store = MemorySecretStore::new();
        store
            .create("proj/secret/v1", None, &sample_payload())
            .await
            .unwrap();
        let err = store
            .create("proj/secret/v1", None, &sample_payload())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ResourceExists));
    }

    #[tokio::test]
    async fn test_immediate_delete_removes_record() {
        let store = MemorySecretStore::new();
        store
            .create("proj/secret/v1", None, &sample_payload())
            .await
            .unwrap();

        let deleted = store
            .delete("proj/secret/v1", RecoveryWindow::Immediate)
            .await
            .unwrap();
        assert_eq!(deleted.deletion_date, None);

        let err = store.describe("proj/secret/v1").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_windowed_delete_leaves_pending_record() {
        let store = MemorySecretStore::new();
        store
            .create("proj/secret/v1", None, &sample_payload())
            .await
            .unwrap();

        let deleted = store
            .delete("proj/secret/v1", RecoveryWindow::days(30))
            .await
            .unwrap();
        assert!(deleted.deletion_date.is_some());

        let record = store.describe("proj/secret/v1").await.unwrap();
        assert!(record.is_pending_deletion());

        let err = store.get_value("proj/secret/v1").await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidRequest));
    }

    #[tokio::test]
    async fn test_policy_round_trip() {
        let store = MemorySecretStore::new();
        store
            .create("proj/secret/v1", None, &sample_payload())
            .await
            .unwrap();

        let policy = store.get_policy("proj/secret/v1").await.unwrap();
        assert_eq!(policy.document, None);

        assert!(store.set_policy("proj/secret/v1", r#"{"Version":"2012-10-17"}"#));
        let policy = store.get_policy("proj/secret/v1").await.unwrap();
        assert_eq!(policy.document.as_deref(), Some(r#"{"Version":"2012-10-17"}"#));
    }
}

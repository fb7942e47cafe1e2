//! Secrets Manager client wrapper.

use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::Client;

use crate::TRACING_TARGET;
use crate::config::SecretsConfig;
use crate::error::{SecretsError, SecretsResult};
use crate::payload::SecretPayload;
use crate::store::SecretStore;
use crate::types::{DeletedSecret, RecoveryWindow, SecretPolicy, SecretRecord, SecretValue};

/// AWS Secrets Manager implementation of [`SecretStore`].
#[derive(Clone)]
pub struct AwsSecretsClient {
    client: Client,
    config: SecretsConfig,
}

impl AwsSecretsClient {
    /// Loads shared AWS configuration from the named profile and builds the client.
    pub async fn connect(config: SecretsConfig) -> SecretsResult<Self> {
        if config.profile.trim().is_empty() {
            return Err(SecretsError::credentials("profile name is empty"));
        }

        let credentials = ProfileFileCredentialsProvider::builder()
            .profile_name(&config.profile)
            .build();

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).credentials_provider(credentials);
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&shared_config);
        if let Some(endpoint) = config.endpoint.as_deref() {
            builder = builder.endpoint_url(endpoint);
        }
        let client = Client::from_conf(builder.build());

        tracing::info!(
            target: TRACING_TARGET,
            profile = %config.profile,
            region = config.region.as_deref(),
            "secrets client initialized"
        );

        Ok(Self { client, config })
    }

    /// Returns the configuration for this client.
    pub fn config(&self) -> &SecretsConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretsClient {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "creating secret");

        let mut request = self
            .client
            .create_secret()
            .name(name)
            .secret_string(payload.to_json()?);
        if let Some(description) = description {
            request = request.description(description);
        }

        let output = request
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("create_secret", err))?;

        Ok(SecretRecord {
            name: output.name().unwrap_or(name).to_owned(),
            arn: output.arn().map(str::to_owned),
            description: description.map(str::to_owned),
            deleted_date: None,
        })
    }

    async fn describe(&self, name: &str) -> SecretsResult<SecretRecord> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "describing secret");

        let output = self
            .client
            .describe_secret()
            .secret_id(name)
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("describe_secret", err))?;

        Ok(SecretRecord {
            name: output.name().unwrap_or(name).to_owned(),
            arn: output.arn().map(str::to_owned),
            description: output.description().map(str::to_owned),
            deleted_date: output.deleted_date().map(|date| date.secs()),
        })
    }

    async fn get_policy(&self, name: &str) -> SecretsResult<SecretPolicy> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "reading resource policy");

        let output = self
            .client
            .get_resource_policy()
            .secret_id(name)
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("get_resource_policy", err))?;

        Ok(SecretPolicy {
            name: output.name().unwrap_or(name).to_owned(),
            document: output.resource_policy().map(str::to_owned),
        })
    }

    async fn get_value(&self, name: &str) -> SecretsResult<SecretValue> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "reading secret value");

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("get_secret_value", err))?;

        Ok(SecretValue {
            name: output.name().unwrap_or(name).to_owned(),
            payload: output.secret_string().unwrap_or_default().to_owned(),
            version_id: output.version_id().map(str::to_owned),
        })
    }

    async fn update(
        &self,
        name: &str,
        description: Option<&str>,
        payload: &SecretPayload,
    ) -> SecretsResult<SecretRecord> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "updating secret");

        let mut request = self
            .client
            .update_secret()
            .secret_id(name)
            .secret_string(payload.to_json()?);
        if let Some(description) = description {
            request = request.description(description);
        }

        let output = request
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("update_secret", err))?;

        Ok(SecretRecord {
            name: output.name().unwrap_or(name).to_owned(),
            arn: output.arn().map(str::to_owned),
            description: description.map(str::to_owned),
            deleted_date: None,
        })
    }

    async fn put_value(&self, name: &str, payload: &SecretPayload) -> SecretsResult<SecretValue> {
        tracing::debug!(target: TRACING_TARGET, secret = %name, "putting secret value");

        let json = payload.to_json()?;
        let output = self
            .client
            .put_secret_value()
            .secret_id(name)
            .secret_string(json.clone())
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("put_secret_value", err))?;

        Ok(SecretValue {
            name: output.name().unwrap_or(name).to_owned(),
            payload: json,
            version_id: output.version_id().map(str::to_owned),
        })
    }

    async fn delete(&self, name: &str, window: RecoveryWindow) -> SecretsResult<DeletedSecret> {
        tracing::debug!(
            target: TRACING_TARGET,
            secret = %name,
            window_days = window.as_days(),
            "deleting secret"
        );

        let mut request = self.client.delete_secret().secret_id(name);
        request = match window.as_days() {
            Some(days) => request.recovery_window_in_days(i64::from(days)),
            None => request.force_delete_without_recovery(true),
        };

        let output = request
            .send()
            .await
            .map_err(|err| SecretsError::from_sdk("delete_secret", err))?;

        Ok(DeletedSecret {
            name: output.name().unwrap_or(name).to_owned(),
            deletion_date: output.deletion_date().map(|date| date.secs()),
        })
    }
}

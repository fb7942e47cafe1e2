//! S3 client wrapper for the object-listing flow.

use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::types::Object;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::config::ObjectConfig;
use crate::error::{ObjectError, ObjectResult};

/// One row of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("key={key} size={size}")]
pub struct ObjectEntry {
    /// Object key within the bucket.
    pub key: String,
    /// Object size in bytes; 0 when the service omits it.
    pub size: i64,
}

/// S3 client scoped to one bucket.
///
/// Lists at most one page of results. Errors are returned to the caller;
/// the probe binary treats them as fatal.
#[derive(Clone)]
pub struct ObjectClient {
    client: Client,
    config: ObjectConfig,
}

impl ObjectClient {
    /// Loads shared AWS configuration from the named profile and builds the client.
    pub async fn connect(config: ObjectConfig) -> ObjectResult<Self> {
        config.validate()?;

        let credentials = ProfileFileCredentialsProvider::builder()
            .profile_name(&config.profile)
            .build();

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).credentials_provider(credentials);
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = config.endpoint.as_deref() {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        tracing::info!(
            target: TRACING_TARGET,
            profile = %config.profile,
            bucket = %config.bucket,
            region = config.region.as_deref(),
            "object client initialized"
        );

        Ok(Self { client, config })
    }

    /// Returns the configuration for this client.
    pub fn config(&self) -> &ObjectConfig {
        &self.config
    }

    /// Lists the first page of objects in the configured bucket.
    ///
    /// An empty bucket yields an empty vector, never an error. The
    /// continuation token is deliberately ignored.
    pub async fn list_first_page(&self) -> ObjectResult<Vec<ObjectEntry>> {
        let bucket = self.config.bucket.as_str();

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %bucket,
            "listing first page of objects"
        );

        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| ObjectError::list(bucket, format!("{err}")))?;

        let entries = entries_from(output.contents());

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %bucket,
            count = entries.len(),
            truncated = output.is_truncated().unwrap_or_default(),
            "listing complete"
        );

        Ok(entries)
    }
}

/// Converts listing rows, skipping entries the service returned without a key.
fn entries_from(objects: &[Object]) -> Vec<ObjectEntry> {
    objects
        .iter()
        .filter_map(|object| {
            let key = object.key()?.to_owned();
            Some(ObjectEntry {
                key,
                size: object.size().unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_from_empty_listing() {
        assert!(entries_from(&[]).is_empty());
    }

    #[test]
    fn test_entries_from_listing() {
        let objects = vec![
            Object::builder().key("reports/a.csv").size(42).build(),
            Object::builder().key("reports/b.csv").build(),
        ];

        let entries = entries_from(&objects);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "reports/a.csv");
        assert_eq!(entries[0].size, 42);
        assert_eq!(entries[1].size, 0);
    }

    #[test]
    fn test_entries_skip_missing_keys() {
        let objects = vec![Object::builder().size(7).build()];
        assert!(entries_from(&objects).is_empty());
    }

    #[test]
    fn test_entry_display() {
        let entry = ObjectEntry {
            key: "a.txt".to_owned(),
            size: 12,
        };
        assert_eq!(entry.to_string(), "key=a.txt size=12");
    }
}

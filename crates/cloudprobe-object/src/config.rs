//! Object-listing configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the object-listing probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ObjectConfig {
    /// Bucket whose first page of objects is listed.
    #[cfg_attr(
        feature = "config",
        arg(long = "bucket", env = "CLOUDPROBE_BUCKET")
    )]
    pub bucket: String,

    /// Named AWS credential profile used to authorize the call.
    #[cfg_attr(
        feature = "config",
        arg(long = "profile", env = "AWS_PROFILE", default_value = "default")
    )]
    pub profile: String,

    /// AWS region override; the profile's region applies when unset.
    #[cfg_attr(feature = "config", arg(long = "region", env = "AWS_REGION"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom endpoint URL (for S3-compatible storage like MinIO, R2).
    #[cfg_attr(feature = "config", arg(long = "endpoint", env = "CLOUDPROBE_S3_ENDPOINT"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ObjectConfig {
    /// Creates a new configuration for the given bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            profile: "default".to_owned(),
            region: None,
            endpoint: None,
        }
    }

    /// Sets the credential profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the region override.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the custom endpoint (for S3-compatible storage).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> crate::ObjectResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(crate::ObjectError::invalid_config("bucket name is empty"));
        }
        if self.profile.trim().is_empty() {
            return Err(crate::ObjectError::invalid_config("profile name is empty"));
        }
        Ok(())
    }
}

//! Secret store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the secret-lifecycle probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::Args))]
#[must_use = "config does nothing unless you use it"]
pub struct SecretsConfig {
    /// Named AWS credential profile used to authorize calls.
    #[cfg_attr(
        feature = "config",
        arg(long = "profile", env = "AWS_PROFILE", default_value = "default")
    )]
    pub profile: String,

    /// AWS region override; the profile's region applies when unset.
    #[cfg_attr(feature = "config", arg(long = "region", env = "AWS_REGION"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom Secrets Manager endpoint URL (for LocalStack and friends).
    #[cfg_attr(
        feature = "config",
        arg(long = "endpoint", env = "CLOUDPROBE_SM_ENDPOINT")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl SecretsConfig {
    /// Creates a configuration for the given profile.
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: None,
            endpoint: None,
        }
    }

    /// Sets the region override.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = SecretsConfig::new("sdk-user")
            .with_region("ap-northeast-2")
            .with_endpoint("http://localhost:4566");
        assert_eq!(config.profile, "sdk-user");
        assert_eq!(config.region.as_deref(), Some("ap-northeast-2"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_default_profile() {
        assert_eq!(SecretsConfig::default().profile, "default");
    }
}

//! Secret payload encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SecretsResult;

/// Ordered field map serialized as the JSON object payload of a secret.
///
/// The demo flow stores secrets as JSON-encoded string-to-string mappings
/// (database name, password, port). Field order is stable so payloads
/// compare and serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretPayload(BTreeMap<String, String>);

impl SecretPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Adds a field, replacing any existing value.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value for a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of fields in the payload.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the payload to its JSON object string.
    pub fn to_json(&self) -> SecretsResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Parses a payload from a JSON object string.
    pub fn from_json(raw: &str) -> SecretsResult<Self> {
        Ok(Self(serde_json::from_str(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let payload = SecretPayload::from_pairs([("a", "1"), ("b", "2")]);
        let json = payload.to_json().unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        assert_eq!(SecretPayload::from_json(&json).unwrap(), payload);
    }

    #[test]
    fn test_with_field_replaces() {
        let payload = SecretPayload::new()
            .with_field("dbPort", "3306")
            .with_field("dbPort", "5432");
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("dbPort"), Some("5432"));
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(SecretPayload::from_json("[1,2]").is_err());
        assert!(SecretPayload::from_json("not json").is_err());
    }
}

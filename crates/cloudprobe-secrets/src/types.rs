//! Secret store response types.

use serde::{Deserialize, Serialize};

/// A described secret record.
///
/// Versions are managed entirely by the service and are not modeled here
/// beyond the version id echoed on writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Secret name.
    pub name: String,
    /// Service-assigned ARN, when the service returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// Description attached to the secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scheduled deletion time (epoch seconds); set while the secret is
    /// pending deletion within its recovery window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_date: Option<i64>,
}

impl SecretRecord {
    /// Whether the secret is scheduled for deletion but still readable.
    pub fn is_pending_deletion(&self) -> bool {
        self.deleted_date.is_some()
    }
}

/// A secret value fetched from or written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretValue {
    /// Secret name.
    pub name: String,
    /// The string payload (here, a JSON-encoded field map).
    pub payload: String,
    /// Version id the service assigned to this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// The resource policy attached to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPolicy {
    /// Secret name.
    pub name: String,
    /// Policy document, when one is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// Acknowledgement of a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedSecret {
    /// Secret name.
    pub name: String,
    /// When the secret becomes permanently unrecoverable (epoch seconds);
    /// unset for immediate deletion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<i64>,
}

/// How quickly a deleted secret becomes unrecoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryWindow {
    /// Delete immediately, without a recovery window.
    Immediate,
    /// Keep the secret readable (pending deletion) for this many days.
    Days(u32),
}

impl RecoveryWindow {
    /// Shortest window the service accepts.
    pub const MIN_DAYS: u32 = 7;
    /// Longest window the service accepts.
    pub const MAX_DAYS: u32 = 30;

    /// Builds a window from a day count; 0 means immediate deletion and
    /// non-zero counts are clamped into the service's accepted range.
    pub fn days(days: u32) -> Self {
        if days == 0 {
            Self::Immediate
        } else {
            Self::Days(days.clamp(Self::MIN_DAYS, Self::MAX_DAYS))
        }
    }

    /// The window length in days, or `None` for immediate deletion.
    pub fn as_days(&self) -> Option<u32> {
        match self {
            Self::Immediate => None,
            Self::Days(days) => Some(*days),
        }
    }

    /// Whether this window deletes immediately.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate)
    }
}

impl Default for RecoveryWindow {
    fn default() -> Self {
        Self::Days(Self::MAX_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_days_is_immediate() {
        assert_eq!(RecoveryWindow::days(0), RecoveryWindow::Immediate);
        assert!(RecoveryWindow::days(0).is_immediate());
        assert_eq!(RecoveryWindow::days(0).as_days(), None);
    }

    #[test]
    fn test_days_clamped_to_service_range() {
        assert_eq!(RecoveryWindow::days(1), RecoveryWindow::Days(7));
        assert_eq!(RecoveryWindow::days(14), RecoveryWindow::Days(14));
        assert_eq!(RecoveryWindow::days(90), RecoveryWindow::Days(30));
    }

    #[test]
    fn test_pending_deletion_flag() {
        let mut record = SecretRecord {
            name: "proj/secret/v1".to_owned(),
            arn: None,
            description: None,
            deleted_date: None,
        };
        assert!(!record.is_pending_deletion());
        record.deleted_date = Some(1_700_000_000);
        assert!(record.is_pending_deletion());
    }
}

//! Secret store error types and the service error-code table.

use std::fmt;

use aws_sdk_secretsmanager::error::{ProvideErrorMetadata, SdkError};

/// Result type for secret store operations.
pub type SecretsResult<T> = Result<T, SecretsError>;

/// The closed set of service error codes the probe understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter value was rejected by the service.
    InvalidParameter,
    /// The request is not valid in the secret's current state.
    InvalidRequest,
    /// An account or request quota was exceeded.
    LimitExceeded,
    /// The service could not encrypt the secret value.
    EncryptionFailure,
    /// The service could not decrypt the stored value.
    DecryptionFailure,
    /// A secret with the requested name already exists.
    ResourceExists,
    /// The named secret does not exist.
    ResourceNotFound,
    /// The resource policy document is not valid JSON policy.
    MalformedPolicy,
    /// The service failed internally.
    InternalService,
    /// A precondition for the request was not met.
    PreconditionNotMet,
}

/// Lookup table mapping service error-code strings to kinds and labels.
///
/// Replaces the per-operation branch-on-code blocks the flow would
/// otherwise repeat for every call.
const ERROR_TABLE: &[(&str, ErrorKind, &str)] = &[
    (
        "InvalidParameterException",
        ErrorKind::InvalidParameter,
        "invalid parameter",
    ),
    (
        "InvalidRequestException",
        ErrorKind::InvalidRequest,
        "invalid request",
    ),
    (
        "LimitExceededException",
        ErrorKind::LimitExceeded,
        "limit exceeded",
    ),
    (
        "EncryptionFailure",
        ErrorKind::EncryptionFailure,
        "encryption failure",
    ),
    (
        "DecryptionFailure",
        ErrorKind::DecryptionFailure,
        "decryption failure",
    ),
    (
        "ResourceExistsException",
        ErrorKind::ResourceExists,
        "resource exists",
    ),
    (
        "ResourceNotFoundException",
        ErrorKind::ResourceNotFound,
        "resource not found",
    ),
    (
        "MalformedPolicyDocumentException",
        ErrorKind::MalformedPolicy,
        "malformed policy document",
    ),
    (
        "InternalServiceError",
        ErrorKind::InternalService,
        "internal service error",
    ),
    (
        "PreconditionNotMetException",
        ErrorKind::PreconditionNotMet,
        "precondition not met",
    ),
];

impl ErrorKind {
    /// Resolves a service error-code string to a kind.
    pub fn from_code(code: &str) -> Option<Self> {
        ERROR_TABLE
            .iter()
            .find(|(name, _, _)| *name == code)
            .map(|(_, kind, _)| *kind)
    }

    /// The service error-code string for this kind.
    pub fn code(&self) -> &'static str {
        ERROR_TABLE
            .iter()
            .find(|(_, kind, _)| kind == self)
            .map(|(name, _, _)| *name)
            .unwrap_or_default()
    }

    /// Human-readable label printed for this kind.
    pub fn label(&self) -> &'static str {
        ERROR_TABLE
            .iter()
            .find(|(_, kind, _)| kind == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur during secret store operations.
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    /// The service rejected the call with a known error code.
    #[error("{operation} failed: {kind}: {message}")]
    Service {
        operation: &'static str,
        kind: ErrorKind,
        message: String,
    },

    /// Transport, dispatch, or unrecognized service failure.
    #[error("{operation} failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// Shared AWS configuration could not be assembled.
    #[error("credential loading failed: {0}")]
    Credentials(String),

    /// Secret payload could not be encoded or decoded.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl SecretsError {
    /// Creates a new service error with a known kind.
    pub fn service(operation: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            kind,
            message: message.into(),
        }
    }

    /// Creates a new transport error.
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// Creates a new credential-loading error.
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// The mapped service error kind, if the service reported a known code.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Service { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether this error means the named secret does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::ResourceNotFound)
    }

    /// The label printed for this error: the mapped code label for known
    /// service errors, the full message otherwise.
    pub fn label(&self) -> String {
        match self {
            Self::Service { kind, .. } => kind.label().to_owned(),
            other => other.to_string(),
        }
    }

    /// Maps an SDK operation failure through the error-code table.
    pub(crate) fn from_sdk<E>(operation: &'static str, err: SdkError<E>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        if let SdkError::ServiceError(context) = &err {
            let service_err = context.err();
            if let Some(kind) = service_err.code().and_then(ErrorKind::from_code) {
                let message = service_err
                    .message()
                    .map(str::to_owned)
                    .unwrap_or_else(|| kind.code().to_owned());
                return Self::Service {
                    operation,
                    kind,
                    message,
                };
            }
        }
        Self::Transport {
            operation,
            message: format!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_round_trips() {
        for (code, kind, label) in ERROR_TABLE {
            assert_eq!(ErrorKind::from_code(code), Some(*kind));
            assert_eq!(kind.code(), *code);
            assert_eq!(kind.label(), *label);
        }
    }

    #[test]
    fn test_unknown_code_is_none() {
        assert_eq!(ErrorKind::from_code("NoSuchException"), None);
    }

    #[test]
    fn test_service_error_label() {
        let err = SecretsError::service(
            "describe_secret",
            ErrorKind::ResourceNotFound,
            "Secrets Manager can't find the specified secret.",
        );
        assert!(err.is_not_found());
        assert_eq!(err.label(), "resource not found");
    }

    #[test]
    fn test_transport_error_label_keeps_message() {
        let err = SecretsError::transport("create_secret", "connection reset");
        assert_eq!(err.kind(), None);
        assert_eq!(err.label(), "create_secret failed: connection reset");
    }
}

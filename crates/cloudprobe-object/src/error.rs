//! Object-listing error types.

/// Result type for object-listing operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors that can occur while listing objects.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// Shared AWS configuration could not be assembled.
    #[error("credential loading failed: {0}")]
    Credentials(String),

    /// The listing call against the bucket failed.
    #[error("list objects failed for bucket '{bucket}': {message}")]
    List { bucket: String, message: String },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ObjectError {
    /// Creates a new credential-loading error.
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// Creates a new listing error.
    pub fn list(bucket: impl Into<String>, message: impl Into<String>) -> Self {
        Self::List {
            bucket: bucket.into(),
            message: message.into(),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

//! Cache error types.

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Connecting to the cache endpoint failed.
    #[error("cache connection failed to '{endpoint}': {message}")]
    Connect { endpoint: String, message: String },

    /// Storing a value failed.
    #[error("store failed for key '{key}': {message}")]
    Store { key: String, message: String },

    /// Fetching a value failed.
    #[error("fetch failed for key '{key}': {message}")]
    Fetch { key: String, message: String },

    /// Deleting a key failed.
    #[error("delete failed for key '{key}': {message}")]
    Delete { key: String, message: String },

    /// A key was missing right after a successful store.
    #[error("key '{key}' missing after store")]
    Miss { key: String },

    /// The value exceeds the item size the service accepts.
    #[error("value of {size} bytes exceeds the {limit}-byte item limit")]
    TooLarge { size: usize, limit: usize },

    /// The blocking client task was cancelled or panicked.
    #[error("blocking cache task failed: {0}")]
    Join(String),
}

impl CacheError {
    /// Creates a new connection error.
    pub fn connect(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a new store error.
    pub fn store(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new fetch error.
    pub fn fetch(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new delete error.
    pub fn delete(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delete {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a new miss error.
    pub fn miss(key: impl Into<String>) -> Self {
        Self::Miss { key: key.into() }
    }

    /// Creates a new oversize error against [`MAX_ITEM_SIZE`](crate::MAX_ITEM_SIZE).
    pub fn too_large(size: usize) -> Self {
        Self::TooLarge {
            size,
            limit: crate::MAX_ITEM_SIZE,
        }
    }

    /// Creates a new join error.
    pub fn join(message: impl Into<String>) -> Self {
        Self::Join(message.into())
    }
}

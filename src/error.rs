use crate::origin::OriginRequest;

/// Error type for cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// No cache entry exists for the request and the caller asked not to
    /// fall back to an origin fetch.
    #[error("no cache entry for '{}'", .request.url)]
    NotMatched { request: OriginRequest },

    /// A stored value was present but not recognizable as any record shape.
    #[error("stored record is not decodable: {0}")]
    Decode(String),

    /// Serializing a response for storage failed.
    #[error("record serialization failed: {0}")]
    Encode(String),

    /// A key-value backend operation failed.
    #[error("[{backend}] backend error for key '{key}': {message}")]
    Backend {
        backend: String,
        key: String,
        message: String,
    },

    /// The origin could not be fetched.
    #[error("origin fetch for '{url}' failed: {message}")]
    Transport { url: String, message: String },
}

impl CacheError {
    /// Create a new backend error.
    pub fn backend(
        backend: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CacheError::Backend {
            backend: backend.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        CacheError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }
}

use async_trait::async_trait;

use crate::error::CacheError;

/// Contract for the external durable key-value service holding cached
/// responses.
///
/// The backend only sees opaque bytes; record encoding and freshness math
/// happen in the layer above. Backends may reap entries on their own after
/// the expiration hint passed to [`put`](KeyValueBackend::put), which the
/// caller keeps far above the application-level TTL.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// A name for logging.
    ///
    /// # Example
    /// - "memory"
    /// - "redis"
    fn name(&self) -> &'static str;

    /// Return the raw stored value.
    ///
    /// The response must be `None` for missing keys.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store the value, replacing any previous one.
    ///
    /// `expiration_secs` is a coarse outer bound after which the backend is
    /// free to drop the entry.
    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        expiration_secs: u64,
    ) -> Result<(), CacheError>;

    /// Remove the key. Must succeed when the key is already absent.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

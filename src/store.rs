use std::sync::Arc;

use crate::backend::KeyValueBackend;
use crate::error::CacheError;
use crate::origin::OriginResponse;
use crate::record;

/// Backend-level expiration hint, in seconds (one year).
///
/// This must always exceed the application-level TTL: the backend clock is
/// only a safety net, and reads of stale-but-present entries have to keep
/// working long after the freshness window has lapsed.
pub const BACKEND_EXPIRATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Serialized-record view over the key-value backend.
///
/// Owns the record codec calls and the freshness window: entries are
/// written with `now + ttl_seconds` and read back with their remaining
/// freshness in whole seconds.
#[derive(Clone)]
pub struct ResponseStore {
    backend: Arc<dyn KeyValueBackend>,
    ttl_seconds: u64,
}

impl ResponseStore {
    /// Create a store over the given backend.
    ///
    /// `ttl_seconds` fixes the freshness window of every entry written
    /// through [`put`](ResponseStore::put).
    pub fn new(backend: Arc<dyn KeyValueBackend>, ttl_seconds: u64) -> Self {
        ResponseStore {
            backend,
            ttl_seconds,
        }
    }

    /// Serialize and store the response under `key`, overwriting any
    /// previous entry.
    pub async fn put(&self, key: &str, response: &OriginResponse) -> Result<(), CacheError> {
        let value = record::encode(&response.headers, &response.body, self.ttl_seconds)?;
        self.backend.put(key, value, BACKEND_EXPIRATION_SECS).await
    }

    /// Read the entry for `key`.
    ///
    /// Returns the reconstructed response together with its remaining
    /// freshness in seconds; `(None, 0)` for missing keys. A stored value
    /// that fails to decode is treated as a miss rather than an error.
    pub async fn lookup(&self, key: &str) -> Result<(Option<OriginResponse>, u64), CacheError> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok((None, 0));
        };

        let decoded = match record::decode(&raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "treating undecodable record as a miss");
                return Ok((None, 0));
            }
        };

        // Only success responses are ever stored, so the reconstructed
        // response carries a 200 status
        let response = OriginResponse {
            status: 200,
            headers: decoded.headers,
            body: decoded.body,
        };

        Ok((Some(response), decoded.remaining_secs))
    }

    /// Remove the entry for `key`. Idempotent.
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryBackend;

    fn store() -> (Arc<MemoryBackend>, ResponseStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = ResponseStore::new(backend.clone(), 60);
        (backend, store)
    }

    #[tokio::test]
    async fn test_put_then_lookup_reconstructs_response() {
        let (_, store) = store();

        let response = OriginResponse::new(200, "payload").with_header("content-type", "text/plain");
        store.put("http://example.com/a", &response).await.unwrap();

        let (found, remaining) = store.lookup("http://example.com/a").await.unwrap();
        let found = found.unwrap();
        assert_eq!(found.status, 200);
        assert_eq!(found.body, "payload");
        assert_eq!(
            found.headers.get("content-type").map(String::as_str),
            Some("text/plain")
        );
        assert!((59..=60).contains(&remaining));
    }

    #[tokio::test]
    async fn test_lookup_missing_key_is_a_miss() {
        let (_, store) = store();

        let (found, remaining) = store.lookup("http://example.com/missing").await.unwrap();
        assert!(found.is_none());
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_lookup_undecodable_value_is_a_miss() {
        let (backend, store) = store();

        backend
            .put("http://example.com/bad", b"not a record".to_vec(), 60)
            .await
            .unwrap();

        let (found, remaining) = store.lookup("http://example.com/bad").await.unwrap();
        assert!(found.is_none());
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_, store) = store();

        let response = OriginResponse::new(200, "x");
        store.put("http://example.com/a", &response).await.unwrap();

        store.delete("http://example.com/a").await.unwrap();
        store.delete("http://example.com/a").await.unwrap();

        let (found, _) = store.lookup("http://example.com/a").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_entries_are_stored_but_stale() {
        let backend = Arc::new(MemoryBackend::new());
        let store = ResponseStore::new(backend, 0);

        let response = OriginResponse::new(200, "stale");
        store.put("http://example.com/a", &response).await.unwrap();

        // Present in the backend, but with no freshness left
        let (found, remaining) = store.lookup("http://example.com/a").await.unwrap();
        assert_eq!(found.unwrap().body, "stale");
        assert_eq!(remaining, 0);
    }
}

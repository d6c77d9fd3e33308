use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backend::KeyValueBackend;
use crate::error::CacheError;
use crate::utils::now_ms;

/// Internal stored value with its backend-level expiration time.
#[derive(Clone)]
struct StoredValue {
    expires: i64,
    value: Vec<u8>,
}

/// Thread-safe in-memory backend using HashMap with RwLock.
///
/// Suitable for tests and single-process deployments. Expired values are
/// dropped lazily on read; there is no background sweeper.
#[derive(Default)]
pub struct MemoryBackend {
    state: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryBackend {
    /// Create an empty MemoryBackend.
    pub fn new() -> Self {
        MemoryBackend {
            state: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let state = self.state.read().await;

        let Some(stored) = state.get(key) else {
            return Ok(None);
        };

        if stored.expires <= now_ms() {
            // Entry outlived the expiration hint, remove it
            drop(state);
            let mut state = self.state.write().await;
            state.remove(key);
            return Ok(None);
        }

        Ok(Some(stored.value.clone()))
    }

    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        expiration_secs: u64,
    ) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.insert(
            key.to_string(),
            StoredValue {
                expires: now_ms() + expiration_secs as i64 * 1000,
                value,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.remove(key);

        Ok(())
    }
}

use std::sync::Arc;

use crate::backend::KeyValueBackend;
use crate::error::CacheError;
use crate::executor::BackgroundExecutor;
use crate::origin::{OriginRequest, OriginResponse, RequestTransform};
use crate::revalidate::Revalidator;
use crate::store::ResponseStore;
use crate::transport::Transport;

/// How [`SwrCache::match_request`] behaves when no cache entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnNotMatched {
    /// Fetch the transformed request directly and return the origin
    /// response to the caller.
    #[default]
    Fetch,
    /// Fail with [`CacheError::NotMatched`] without blocking on a fetch.
    Error,
}

/// Per-call options for [`SwrCache::match_request`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Schedule a revalidation even when the entry is still fresh.
    pub force_revalidate: bool,

    /// Miss behavior.
    pub on_not_matched: OnNotMatched,
}

/// Configuration for the caching layer.
#[derive(Clone)]
pub struct SwrConfig {
    /// Seconds before a cached entry stops being fresh. Stale entries are
    /// still served; they just trigger revalidation.
    pub ttl_seconds: u64,

    /// Rewrite applied to produce the fetch target. Cache keys are always
    /// derived from the untransformed request.
    pub proxy: Option<RequestTransform>,

    /// Log every cache decision at debug level.
    pub debug: bool,
}

impl Default for SwrConfig {
    fn default() -> Self {
        SwrConfig {
            ttl_seconds: 60,
            proxy: None,
            debug: false,
        }
    }
}

/// Stale-while-revalidate caching layer between a client and an origin.
///
/// `match_request` serves from cache whenever an entry exists, fresh or
/// not, and refreshes stale content by scheduling a revalidation on the
/// configured executor. The caller is never blocked on a revalidation; the
/// only blocking origin fetch is the miss path with
/// [`OnNotMatched::Fetch`].
pub struct SwrCache {
    store: ResponseStore,
    revalidator: Revalidator,
    transport: Arc<dyn Transport>,
    executor: Arc<dyn BackgroundExecutor>,
    debug: bool,
}

impl SwrCache {
    /// Create a new caching layer.
    ///
    /// # Arguments
    /// * `backend` - The durable key-value service holding cached responses
    /// * `transport` - Transport used for origin fetches
    /// * `executor` - Fire-and-forget executor for background revalidation
    /// * `config` - TTL, optional request transform, debug logging
    pub fn new(
        backend: Arc<dyn KeyValueBackend>,
        transport: Arc<dyn Transport>,
        executor: Arc<dyn BackgroundExecutor>,
        config: SwrConfig,
    ) -> Self {
        let store = ResponseStore::new(backend, config.ttl_seconds);
        let revalidator = Revalidator::new(store.clone(), transport.clone(), config.proxy);

        SwrCache {
            store,
            revalidator,
            transport,
            executor,
            debug: config.debug,
        }
    }

    /// Serve `request` from cache when possible.
    ///
    /// - Fresh hit: return the cached response; nothing is scheduled unless
    ///   `force_revalidate` is set.
    /// - Stale hit (less than one second of freshness left): return the
    ///   cached response and schedule a revalidation.
    /// - Miss: schedule a revalidation, then either fetch the transformed
    ///   request directly ([`OnNotMatched::Fetch`]) or fail with
    ///   [`CacheError::NotMatched`] ([`OnNotMatched::Error`]).
    ///
    /// On a miss with `Fetch`, the direct fetch and the scheduled
    /// revalidation are independent origin requests; the response handed to
    /// the caller is never reused to populate the cache.
    pub async fn match_request(
        &self,
        request: &OriginRequest,
        options: MatchOptions,
    ) -> Result<OriginResponse, CacheError> {
        let key = request.cache_key();
        let (cached, remaining_secs) = self.store.lookup(&key).await?;

        match cached {
            Some(response) => {
                let fresh = remaining_secs >= 1;
                if self.debug {
                    tracing::debug!(
                        key = %key,
                        remaining_secs,
                        fresh,
                        force = options.force_revalidate,
                        "cache hit"
                    );
                }

                if !fresh || options.force_revalidate {
                    self.schedule_revalidation(request);
                }

                Ok(response)
            }
            None => {
                if self.debug {
                    tracing::debug!(
                        key = %key,
                        on_not_matched = ?options.on_not_matched,
                        "cache miss"
                    );
                }

                self.schedule_revalidation(request);

                match options.on_not_matched {
                    OnNotMatched::Fetch => {
                        let target = self.revalidator.fetch_target(request);
                        self.transport.fetch(&target).await
                    }
                    OnNotMatched::Error => Err(CacheError::NotMatched {
                        request: request.clone(),
                    }),
                }
            }
        }
    }

    /// Store `response` under `request`'s key without consulting the
    /// origin.
    pub async fn put(
        &self,
        request: &OriginRequest,
        response: &OriginResponse,
    ) -> Result<(), CacheError> {
        self.store.put(&request.cache_key(), response).await
    }

    /// Re-fetch the origin and reconcile the cache entry, regardless of
    /// freshness.
    pub async fn revalidate(&self, request: &OriginRequest) -> Result<(), CacheError> {
        self.revalidator.revalidate(request).await
    }

    /// Evict the cache entry for `request`.
    pub async fn clear(&self, request: &OriginRequest) -> Result<(), CacheError> {
        self.store.delete(&request.cache_key()).await
    }

    /// Hand a revalidation for `request` to the executor.
    ///
    /// The task's outcome is never observed by the caller; failures are
    /// only logged.
    fn schedule_revalidation(&self, request: &OriginRequest) {
        let revalidator = self.revalidator.clone();
        let request = request.clone();

        self.executor.schedule(Box::pin(async move {
            if let Err(e) = revalidator.revalidate(&request).await {
                tracing::warn!(url = %request.url, error = %e, "background revalidation failed");
            }
        }));
    }
}

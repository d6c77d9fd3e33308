use std::sync::Arc;

use crate::error::CacheError;
use crate::origin::{OriginRequest, RequestTransform};
use crate::store::ResponseStore;
use crate::transport::Transport;

/// Origin re-fetch and cache reconciliation.
///
/// One revalidation is one fetch followed by at most one cache mutation.
/// There are no retries: a failed fetch propagates out of
/// [`revalidate`](Revalidator::revalidate) and the caller decides whether
/// that matters (the engine runs revalidations fire-and-forget, where it
/// does not).
#[derive(Clone)]
pub struct Revalidator {
    store: ResponseStore,
    transport: Arc<dyn Transport>,
    proxy: Option<RequestTransform>,
}

impl Revalidator {
    pub fn new(
        store: ResponseStore,
        transport: Arc<dyn Transport>,
        proxy: Option<RequestTransform>,
    ) -> Self {
        Revalidator {
            store,
            transport,
            proxy,
        }
    }

    /// Apply the caller-supplied transform to produce the fetch target.
    ///
    /// Runs on every fetch; the result is never cached. The identity
    /// transform is used when none was configured.
    pub(crate) fn fetch_target(&self, request: &OriginRequest) -> OriginRequest {
        match &self.proxy {
            Some(transform) => transform(request.clone()),
            None => request.clone(),
        }
    }

    /// Fetch the origin and reconcile the cache entry for `request`.
    ///
    /// The entry is keyed by the original request; the fetch goes to the
    /// transformed one. Classification by status class:
    /// - 2xx: overwrite the entry with the new response
    /// - 4xx: evict the entry, the resource must not be served stale
    /// - anything else: leave the store untouched, a transient failure must
    ///   not corrupt a still-possibly-valid cached value
    pub async fn revalidate(&self, request: &OriginRequest) -> Result<(), CacheError> {
        let key = request.cache_key();
        let target = self.fetch_target(request);

        let response = self.transport.fetch(&target).await?;

        if response.is_success() {
            self.store.put(&key, &response).await
        } else if response.is_client_error() {
            self.store.delete(&key).await
        } else {
            tracing::debug!(
                key = %key,
                status = response.status,
                "revalidation left cache entry untouched"
            );
            Ok(())
        }
    }
}

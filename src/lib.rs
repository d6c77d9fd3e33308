//! swr-http-cache - a stale-while-revalidate caching layer between HTTP
//! clients and an origin.
//!
//! Given a request, `SwrCache` answers from the cache whenever it can,
//! fresh or stale, and keeps content up to date by scheduling background
//! revalidation instead of making callers wait for it:
//! - Fresh entries are served as-is
//! - Stale entries are served immediately while a revalidation runs in the
//!   background
//! - Misses either fall through to a blocking origin fetch or fail, per
//!   call
//!
//! Revalidation classifies the origin response by status class: success
//! overwrites the entry, a client error evicts it, everything else leaves
//! the cache untouched.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use swr_http_cache::{
//!     HttpTransport, MatchOptions, MemoryBackend, OriginRequest, SwrCache, SwrConfig,
//!     TokioExecutor,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = SwrCache::new(
//!         Arc::new(MemoryBackend::new()),
//!         Arc::new(HttpTransport::new()),
//!         Arc::new(TokioExecutor),
//!         SwrConfig { ttl_seconds: 60, ..Default::default() },
//!     );
//!
//!     let request = OriginRequest::parse("https://example.com/article").unwrap();
//!     let response = cache.match_request(&request, MatchOptions::default()).await.unwrap();
//!     println!("{}", response.body);
//! }
//! ```

mod backend;
pub mod backends;
mod error;
mod executor;
mod origin;
pub mod record;
mod revalidate;
mod store;
mod swr;
mod transport;
mod utils;

// Re-export public API
pub use backend::KeyValueBackend;
pub use backends::memory::MemoryBackend;
pub use backends::redis::{RedisBackend, RedisBackendConfig};
pub use error::CacheError;
pub use executor::{BackgroundExecutor, TokioExecutor};
pub use origin::{OriginRequest, OriginResponse, RequestTransform};
pub use record::DecodedRecord;
pub use revalidate::Revalidator;
pub use store::{BACKEND_EXPIRATION_SECS, ResponseStore};
pub use swr::{MatchOptions, OnNotMatched, SwrCache, SwrConfig};
pub use transport::{HttpTransport, Transport};

//! Serialized shape of a cached response.
//!
//! Two shapes exist in storage: the current one carries an absolute
//! `expireAt` timestamp, the legacy one an absolute timestamp serialized as
//! a string under `cacheTtl`. Both are still read; only the current shape is
//! ever written.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CacheError;
use crate::utils::now_ms;

/// Current on-disk record shape.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheRecord {
    headers: HashMap<String, String>,
    body: String,
    /// Absolute expiry, unix epoch milliseconds.
    expire_at: i64,
}

/// Older record shape, read for compatibility with existing stored data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCacheRecord {
    headers: HashMap<String, String>,
    body: String,
    /// Absolute expiry, unix epoch milliseconds as a string.
    cache_ttl: String,
}

/// The two recognizable record shapes, disambiguated by field presence.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Current(CacheRecord),
    Legacy(LegacyCacheRecord),
}

/// A stored record normalized into one internal representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub headers: HashMap<String, String>,
    pub body: String,
    /// Whole seconds of freshness left, floored and clamped to zero.
    pub remaining_secs: u64,
}

/// Serialize a response for storage with a freshness window of
/// `ttl_seconds` starting now.
pub fn encode(
    headers: &HashMap<String, String>,
    body: &str,
    ttl_seconds: u64,
) -> Result<Vec<u8>, CacheError> {
    let record = CacheRecord {
        headers: headers.clone(),
        body: body.to_string(),
        expire_at: now_ms() + ttl_seconds as i64 * 1000,
    };

    serde_json::to_vec(&record).map_err(|e| CacheError::Encode(e.to_string()))
}

/// Parse a stored value in either shape and normalize it.
pub fn decode(raw: &[u8]) -> Result<DecodedRecord, CacheError> {
    let record: StoredRecord = serde_json::from_slice(raw)
        .map_err(|e| CacheError::Decode(format!("unrecognized record shape: {}", e)))?;

    let (headers, body, expire_at) = match record {
        StoredRecord::Current(r) => (r.headers, r.body, r.expire_at),
        StoredRecord::Legacy(r) => {
            let expire_at = r.cache_ttl.parse::<i64>().map_err(|e| {
                CacheError::Decode(format!("cacheTtl '{}' is not a timestamp: {}", r.cache_ttl, e))
            })?;
            (r.headers, r.body, expire_at)
        }
    };

    let remaining_secs = ((expire_at - now_ms()) / 1000).max(0) as u64;

    Ok(DecodedRecord {
        headers,
        body,
        remaining_secs,
    })
}

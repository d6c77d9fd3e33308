//! Key-value backend implementations.

pub mod memory;
pub mod redis;

pub use memory::MemoryBackend;
pub use redis::{RedisBackend, RedisBackendConfig};

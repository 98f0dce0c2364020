use std::time::Duration;

use async_trait::async_trait;

use super::{Result, TypeTag, Value};

/// Byte-level operations against a key-value store.
///
/// Implementations own their connection strategy; the adapter only sees
/// payload bytes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Checks that the store is reachable and accepts the configured credentials.
    async fn ping(&self) -> Result<()>;

    /// Gets the payload stored under a key, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a payload with an optional TTL. `None` means no expiry.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Type-tagged cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Health probe: connects, pings and disconnects.
    async fn open(&self) -> Result<()>;

    /// Encodes `value` according to `tag` and stores it for `ttl_seconds`.
    ///
    /// A TTL of zero or less stores the value without expiry.
    async fn set(&self, key: &str, tag: TypeTag, value: &Value, ttl_seconds: i64) -> Result<()>;

    /// Reads the value stored under `key`, decoding it according to `tag`.
    async fn get(&self, key: &str, tag: TypeTag) -> Result<Value>;

    /// Removes `key` from the cache.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Converts a TTL in seconds to the store's optional expiry.
pub fn ttl_from_seconds(ttl_seconds: i64) -> Option<Duration> {
    u64::try_from(ttl_seconds)
        .ok()
        .filter(|seconds| *seconds > 0)
        .map(Duration::from_secs)
}

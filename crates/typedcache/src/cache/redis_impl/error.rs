//! Redis error mapping to CacheError.

use typedcache_core::cache::CacheError;

/// Maps Redis errors to CacheError.
///
/// Anything that prevents talking to the server (refused, timed out, dropped,
/// I/O failures, rejected credentials) is a connection failure; everything the
/// server reports after that is an operation failure.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || matches!(
            err.kind(),
            redis::ErrorKind::IoError | redis::ErrorKind::AuthenticationFailed
        )
    {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

//! typedcache_core - type-tagged encoding and the cache traits shared by
//! every store backend.

pub mod cache;
pub mod config;

pub use cache::{Cache, CacheError, ReadMode, Result, Store, TypeTag, TypedCache, Value};
pub use config::ConnectionConfig;

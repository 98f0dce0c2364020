//! typedcache - type-tagged get/set/delete adapter for a Redis cache.
//!
//! The encoding and the `Cache` trait live in `typedcache_core`; this crate
//! provides the store backends and the command-line front end.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod output;

pub use cache::{MemoryStore, RedisStore};

//! Redis store backend implementation.
//!
//! Talks to a remote Redis server through the `redis` crate, opening a fresh
//! connection for every operation.

mod cache;
mod error;

pub use cache::RedisStore;

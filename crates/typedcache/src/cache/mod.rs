//! Store backend implementations.
//!
//! Concrete implementations of the `Store` trait defined in
//! `typedcache_core::cache`:
//!
//! - `redis_impl`: remote Redis, one connection per operation
//! - `memory`: in-process store used as a test double

pub mod memory;
pub mod redis_impl;

pub use memory::MemoryStore;
pub use redis_impl::RedisStore;

//! In-memory store backend.
//!
//! Keeps payloads in process with TTL support. Behaves like
//! the Redis store from the adapter's point of view, which makes it the
//! substitute used in tests.

mod cache;

pub use cache::MemoryStore;

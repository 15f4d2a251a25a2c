//! Cache-backed storage for message content
//!
//! This crate provides:
//! - The [`KeyValueCache`] contract for namespaced stores
//! - [`CacheStream`], a write sink that appends each chunk to a cache entry
//!   as soon as it is written
//! - [`MemoryKeyCache`], an in-memory backend

pub mod backends;
mod cache;
pub mod config;
pub mod error;
pub mod stream;

pub use backends::MemoryKeyCache;
pub use cache::{CacheKey, KeyValueCache, WriteMode};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use stream::CacheStream;

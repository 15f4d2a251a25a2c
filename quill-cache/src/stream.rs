//! Streaming writes into a cache entry
//!
//! A [`CacheStream`] lets message content be assembled chunk by chunk
//! without holding it in process memory: every [`CacheStream::write`] goes
//! straight to the cache in [`WriteMode::Append`] mode, so the process only
//! ever holds the chunk being written and the cache backend absorbs the
//! accumulated content.
//!
//! Cloning a stream shares the cache handle but copies the key binding, so
//! the clone can be rebound elsewhere without disturbing the original.

use std::sync::Arc;

use quill_common::internal;

use crate::{CacheKey, KeyValueCache, Result, WriteMode};

#[derive(Debug, Clone)]
pub struct CacheStream {
    cache: Arc<dyn KeyValueCache>,
    key: CacheKey,
}

impl CacheStream {
    /// Create a stream writing to `(namespace, item)` in `cache`
    pub fn new(
        cache: Arc<dyn KeyValueCache>,
        namespace: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            key: CacheKey::new(namespace, item),
        }
    }

    /// Point this stream at `(namespace, item)` in `cache`
    ///
    /// Only this instance is affected, clones keep their own binding.
    pub fn bind(
        &mut self,
        cache: Arc<dyn KeyValueCache>,
        namespace: impl Into<String>,
        item: impl Into<String>,
    ) {
        self.cache = cache;
        self.key = CacheKey::new(namespace, item);
    }

    #[must_use]
    pub const fn key(&self) -> &CacheKey {
        &self.key
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<dyn KeyValueCache> {
        &self.cache
    }

    /// Append `chunk` to the bound cache entry
    ///
    /// # Errors
    /// If the cache rejects the write
    pub async fn write(&self, chunk: &[u8]) -> Result<()> {
        internal!(key = %self.key, bytes = chunk.len(), "Appending to cache entry");

        self.cache
            .set_value(&self.key.namespace, &self.key.item, chunk, WriteMode::Append)
            .await
    }

    /// Finish the stream, releasing the bound cache entry
    ///
    /// Writes are never held back, so there is nothing to push out first.
    ///
    /// # Errors
    /// If the cache fails to clear the entry
    pub async fn flush_buffers(&self) -> Result<()> {
        internal!(key = %self.key, "Clearing cache entry");

        self.cache
            .clear_key(&self.key.namespace, &self.key.item)
            .await
    }
}

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use crate::{CacheError, KeyValueCache, WriteMode};

#[derive(Debug, Default)]
struct Entries {
    namespaces: HashMap<String, HashMap<String, Vec<u8>>>,
    /// Total bytes stored across every namespace
    used: usize,
}

impl Entries {
    fn stored_len(&self, namespace: &str, item: &str) -> usize {
        self.namespaces
            .get(namespace)
            .and_then(|items| items.get(item))
            .map_or(0, Vec::len)
    }
}

/// In-memory cache backend
///
/// Values are kept in nested `HashMap`s (namespace, then item) behind an
/// `RwLock`. Clones share the same storage.
///
/// # Capacity Management
/// The cache can be given a capacity in bytes. A write that would take the
/// total stored size over the capacity fails with
/// [`CacheError::CapacityExceeded`] and leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyCache {
    entries: Arc<RwLock<Entries>>,
    /// Maximum number of bytes to store (None = unlimited)
    capacity: Option<usize>,
}

impl MemoryKeyCache {
    /// Create an empty cache with unlimited capacity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding at most `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::default(),
            capacity: Some(capacity),
        }
    }

    /// Get the configured capacity (None = unlimited)
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Total number of bytes currently stored
    ///
    /// Recovers gracefully if the lock is poisoned by accessing the underlying data.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .used
    }

    /// Number of namespaces holding at least one item
    #[must_use]
    pub fn namespace_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .namespaces
            .len()
    }
}

#[async_trait]
impl KeyValueCache for MemoryKeyCache {
    async fn set_value(
        &self,
        namespace: &str,
        item: &str,
        value: &[u8],
        mode: WriteMode,
    ) -> crate::Result<()> {
        let mut entries = self.entries.write()?;

        let existing = entries.stored_len(namespace, item);
        let requested = match mode {
            WriteMode::Overwrite => entries.used - existing + value.len(),
            WriteMode::Append => entries.used + value.len(),
        };

        if let Some(capacity) = self.capacity
            && requested > capacity
        {
            return Err(CacheError::CapacityExceeded {
                requested,
                capacity,
            });
        }

        let stored = entries
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .entry(item.to_string())
            .or_default();

        match mode {
            WriteMode::Overwrite => {
                stored.clear();
                stored.extend_from_slice(value);
            }
            WriteMode::Append => stored.extend_from_slice(value),
        }

        entries.used = requested;
        Ok(())
    }

    async fn get_value(&self, namespace: &str, item: &str) -> crate::Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .read()?
            .namespaces
            .get(namespace)
            .and_then(|items| items.get(item))
            .cloned())
    }

    async fn clear_key(&self, namespace: &str, item: &str) -> crate::Result<()> {
        let mut entries = self.entries.write()?;

        let Some(items) = entries.namespaces.get_mut(namespace) else {
            return Ok(());
        };
        let removed = items.remove(item).map_or(0, |value| value.len());
        if items.is_empty() {
            entries.namespaces.remove(namespace);
        }

        entries.used -= removed;
        Ok(())
    }

    async fn clear_all(&self, namespace: &str) -> crate::Result<()> {
        let mut entries = self.entries.write()?;

        let removed: usize = entries
            .namespaces
            .remove(namespace)
            .map_or(0, |items| items.values().map(Vec::len).sum());

        entries.used -= removed;
        Ok(())
    }
}

use std::fmt::{self, Debug};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// How a write combines with the value already stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    /// Replace the stored value
    Overwrite,
    /// Concatenate onto the stored value, creating it if missing
    Append,
}

/// Compound key of a cache entry
///
/// The namespace groups related items (for example everything belonging to
/// one message) and the item identifies one of them (for example one body
/// part).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub namespace: String,
    pub item: String,
}

impl CacheKey {
    pub fn new(namespace: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            item: item.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.item)
    }
}

/// A namespaced key-value store
///
/// Entries are created on first write and live until they are cleared.
#[async_trait]
pub trait KeyValueCache: Send + Sync + Debug {
    /// Store `value` under `(namespace, item)`
    ///
    /// # Errors
    /// If the underlying store rejects the write
    async fn set_value(
        &self,
        namespace: &str,
        item: &str,
        value: &[u8],
        mode: WriteMode,
    ) -> Result<()>;

    /// Read the value stored under `(namespace, item)`
    ///
    /// # Errors
    /// If the underlying store cannot be read
    async fn get_value(&self, namespace: &str, item: &str) -> Result<Option<Vec<u8>>>;

    /// Check whether anything is stored under `(namespace, item)`
    ///
    /// # Errors
    /// If the underlying store cannot be read
    async fn has_key(&self, namespace: &str, item: &str) -> Result<bool> {
        Ok(self.get_value(namespace, item).await?.is_some())
    }

    /// Remove the entry stored under `(namespace, item)`, if any
    ///
    /// # Errors
    /// If the underlying store rejects the removal
    async fn clear_key(&self, namespace: &str, item: &str) -> Result<()>;

    /// Remove every entry in `namespace`
    ///
    /// # Errors
    /// If the underlying store rejects the removal
    async fn clear_all(&self, namespace: &str) -> Result<()>;
}

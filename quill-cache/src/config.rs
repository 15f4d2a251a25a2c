use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{KeyValueCache, MemoryKeyCache};

/// Configuration for the cache backing streamed message content
///
/// Memory-backed cache with no limit:
/// ```ron
/// cache: Memory(capacity: None),
/// ```
///
/// Memory-backed cache holding at most 64 MiB:
/// ```ron
/// cache: Memory(capacity: Some(67108864)),
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheConfig {
    /// Process-local cache
    Memory {
        /// Maximum number of bytes to store (omit for unlimited)
        #[serde(default)]
        capacity: Option<usize>,
    },
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::Memory { capacity: None }
    }
}

impl CacheConfig {
    /// Build the configured cache as a shareable trait object
    #[must_use]
    pub fn into_cache(self) -> Arc<dyn KeyValueCache> {
        match self {
            Self::Memory {
                capacity: Some(capacity),
            } => Arc::new(MemoryKeyCache::with_capacity(capacity)),
            Self::Memory { capacity: None } => Arc::new(MemoryKeyCache::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WriteMode;

    #[test]
    fn test_parse_memory_config() {
        let config: CacheConfig =
            ron::from_str("Memory(capacity: Some(1024))").expect("valid config");
        assert_eq!(
            config,
            CacheConfig::Memory {
                capacity: Some(1024)
            }
        );

        let config: CacheConfig = ron::from_str("Memory(capacity: None)").expect("valid config");
        assert_eq!(config, CacheConfig::default());
    }

    #[tokio::test]
    async fn test_into_cache_honours_capacity() {
        let cache = CacheConfig::Memory { capacity: Some(2) }.into_cache();

        assert!(
            cache
                .set_value("ns", "item", b"abc", WriteMode::Append)
                .await
                .is_err()
        );
    }
}

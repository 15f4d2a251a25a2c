use std::sync::Arc;

use quill_cache::CacheConfig;
use quill_transport::{Channel, ChannelPool, NullChannel, PoolConfig};
use serde::Deserialize;

/// A channel the pool should deliver through
///
/// ```ron
/// channels: [
///     Null(name: "primary"),
///     Null(name: "secondary"),
/// ],
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ChannelConfig {
    /// Accepts every recipient without delivering anything
    Null { name: String },
}

impl ChannelConfig {
    #[must_use]
    pub fn into_channel(self) -> Arc<dyn Channel> {
        match self {
            Self::Null { name } => Arc::new(NullChannel::new(name)),
        }
    }
}

/// Top level configuration, read from a RON file
///
/// ```ron
/// Quill (
///     pool: (strategy: RoundRobin),
///     cache: Memory(capacity: Some(67108864)),
///     channels: [Null(name: "primary")],
///     sender: Some("postmaster@example.org"),
///     chunk_size: 8192,
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Quill {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
    /// Envelope sender used for relayed messages
    #[serde(default)]
    pub sender: Option<String>,
    /// Size of the chunks streamed into the cache
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

const fn default_chunk_size() -> usize {
    8192
}

impl Default for Quill {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            cache: CacheConfig::default(),
            channels: Vec::new(),
            sender: None,
            chunk_size: default_chunk_size(),
        }
    }
}

impl Quill {
    /// Build a pool over the configured channels
    #[must_use]
    pub fn build_pool(&self) -> ChannelPool {
        ChannelPool::with_channels(
            &self.pool,
            self.channels
                .iter()
                .cloned()
                .map(ChannelConfig::into_channel),
        )
    }
}

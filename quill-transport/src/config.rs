use serde::{Deserialize, Serialize};

/// How the pool picks the channel for the next attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Rotate through the active channels on every attempt
    #[default]
    RoundRobin,
    /// Keep using the current channel until it fails, then move to the next
    Failover,
}

/// Configuration for a channel pool
///
/// ```ron
/// pool: (
///     strategy: Failover,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(default)]
    pub strategy: SelectionStrategy,
}

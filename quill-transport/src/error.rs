//! Typed errors for channels and the channel pool.
//!
//! A channel reports one of three kinds of failure:
//! - Delivery failures, which the pool absorbs by quarantining the channel
//! - Stop failures, raised while shutting a channel down
//! - Anything else, which the pool never absorbs

use thiserror::Error;

/// Error raised by a single delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel could not deliver the message. Recoverable at pool level.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The channel failed to shut down cleanly.
    #[error("Stop failed: {0}")]
    Stop(String),

    /// Any other fault (misconfiguration, internal bug, ...).
    #[error("Channel error: {0}")]
    Other(String),
}

impl ChannelError {
    /// Returns `true` if the pool should quarantine the channel and move on.
    #[must_use]
    pub const fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

/// Error raised by the channel pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Every channel was quarantined, or the pool was empty to begin with.
    #[error("All channels in the pool failed, or no channels are available")]
    AllChannelsExhausted,

    /// A channel error the pool does not handle itself.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

impl TransportError {
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::AllChannelsExhausted)
    }
}

/// Specialized `Result` type for pool operations.
pub type Result<T> = std::result::Result<T, TransportError>;

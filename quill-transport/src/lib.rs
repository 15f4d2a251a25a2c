//! Delivery channels and the pool that spreads messages across them
//!
//! This crate provides:
//! - The [`Channel`] contract implemented by concrete delivery mechanisms
//! - [`ChannelPool`], which rotates through channels and quarantines the
//!   ones that fail
//! - [`NullChannel`], a channel that accepts everything without I/O

mod channel;
pub mod channels;
mod config;
mod error;
mod pool;

pub use channel::Channel;
pub use channels::NullChannel;
pub use config::{PoolConfig, SelectionStrategy};
pub use error::{ChannelError, Result, TransportError};
pub use pool::ChannelPool;

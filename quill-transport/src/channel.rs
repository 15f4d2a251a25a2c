use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use quill_common::{EventListener, Message};

use crate::ChannelError;

/// One concrete delivery mechanism (SMTP relay, local sendmail, HTTP API, ...)
///
/// Handles are shared between the pool and whoever built them, so every
/// method takes `&self` and implementations keep their own state behind
/// interior mutability.
#[async_trait]
pub trait Channel: Send + Sync + Debug {
    /// Human readable name, used for logging
    fn name(&self) -> &str;

    /// Whether the channel has been started and is ready to send
    fn is_started(&self) -> bool;

    /// Start the channel
    ///
    /// # Errors
    /// If the underlying mechanism cannot be brought up
    async fn start(&self) -> Result<(), ChannelError>;

    /// Stop the channel
    ///
    /// # Errors
    /// If the underlying mechanism does not shut down cleanly
    async fn stop(&self) -> Result<(), ChannelError>;

    /// Check whether the channel is still functional
    async fn ping(&self) -> bool;

    /// Send a message, returning the number of recipients accepted for delivery
    ///
    /// # Errors
    /// [`ChannelError::Delivery`] when the message could not be delivered
    /// through this channel, any other variant for faults unrelated to the
    /// delivery itself
    async fn send(&self, message: &Message) -> Result<usize, ChannelError>;

    /// Register a plugin for this channel's events
    fn register_plugin(&self, plugin: Arc<dyn EventListener>);
}

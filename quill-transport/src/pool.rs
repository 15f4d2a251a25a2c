//! Load-balancing pool of interchangeable delivery channels
//!
//! The pool keeps its channels in two groups:
//! - **Active**: channels used in rotation, front of the queue goes next
//! - **Quarantined**: channels that failed and are kept aside until the pool
//!   is restarted
//!
//! Every channel handed to the pool lives in exactly one of the two groups.
//!
//! # Rotation and quarantine
//!
//! Both operations are plain deque operations:
//!
//! ```text
//! rotate:      [A, B, C] -> [B, C, A]   (A is tried)
//! quarantine:  [B, C, A] -> [B, C]      (A failed, moved aside)
//! ```
//!
//! Rotation happens before each attempt, so the channel just tried is always
//! at the back of the queue and quarantining it is a `pop_back`. A single
//! `send` makes at most one attempt per channel that was active when it
//! started.
//!
//! With [`SelectionStrategy::Failover`] the pool only rotates once the
//! current channel has been quarantined; until then every attempt reuses the
//! channel at the back of the queue.

use std::{
    collections::VecDeque,
    sync::{Arc, Weak},
};

use quill_common::{EventListener, Message, internal, outgoing, tracing};

use crate::{Channel, ChannelError, PoolConfig, Result, SelectionStrategy, TransportError};

#[derive(Debug, Default)]
pub struct ChannelPool {
    /// Channels in rotation order
    active: VecDeque<Arc<dyn Channel>>,
    /// Channels that failed, in the order they failed
    quarantined: Vec<Arc<dyn Channel>>,
    /// Channel that completed the most recent successful send
    last_used: Option<Weak<dyn Channel>>,
    strategy: SelectionStrategy,
    /// Failover only: the back of `active` is the current channel
    sticky: bool,
}

impl ChannelPool {
    /// Create an empty pool
    #[must_use]
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            strategy: config.strategy,
            ..Default::default()
        }
    }

    /// Create a pool that rotates through `channels`
    pub fn with_channels<I>(config: &PoolConfig, channels: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Channel>>,
    {
        let mut pool = Self::new(config);
        pool.set_channels(channels);
        pool
    }

    #[must_use]
    pub const fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Replace every channel in the pool, discarding any quarantine state
    pub fn set_channels<I>(&mut self, channels: I)
    where
        I: IntoIterator<Item = Arc<dyn Channel>>,
    {
        self.active = channels.into_iter().collect();
        self.quarantined.clear();
        self.sticky = false;
    }

    /// All channels known to the pool, active ones first (in rotation order)
    /// followed by the quarantined ones
    #[must_use]
    pub fn channels(&self) -> Vec<Arc<dyn Channel>> {
        self.active
            .iter()
            .chain(self.quarantined.iter())
            .cloned()
            .collect()
    }

    /// Channels currently in rotation, next in line first
    pub fn active_channels(&self) -> impl ExactSizeIterator<Item = &Arc<dyn Channel>> {
        self.active.iter()
    }

    /// Channels currently kept out of rotation
    pub fn quarantined_channels(&self) -> impl ExactSizeIterator<Item = &Arc<dyn Channel>> {
        self.quarantined.iter()
    }

    /// The channel that completed the most recent successful send, if it
    /// is still alive
    #[must_use]
    pub fn last_used(&self) -> Option<Arc<dyn Channel>> {
        self.last_used.as_ref().and_then(Weak::upgrade)
    }

    /// The pool is usable as long as at least one channel is active
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.active.is_empty()
    }

    /// Give every quarantined channel another chance
    ///
    /// Channels are not started here; each is started on its first send
    /// attempt.
    pub fn start(&mut self) {
        if self.quarantined.is_empty() {
            return;
        }

        let restored = self.quarantined.len();
        let current = if self.sticky {
            self.active.pop_back()
        } else {
            None
        };

        self.active.extend(self.quarantined.drain(..));
        self.active.extend(current);

        internal!(
            level = INFO,
            restored,
            active = self.active.len(),
            "Restored quarantined channels"
        );
    }

    /// Stop every active channel, in rotation order
    ///
    /// # Errors
    /// The first error raised by a channel; channels after it are not stopped
    pub async fn stop(&self) -> Result<()> {
        for channel in &self.active {
            channel.stop().await?;
        }

        Ok(())
    }

    /// Ping the active channels, quarantining any that do not respond
    ///
    /// With [`SelectionStrategy::Failover`] this stops at the first channel
    /// that responds.
    ///
    /// Returns `true` if at least one channel is still active.
    pub async fn ping(&mut self) -> bool {
        let budget = self.active.len();

        for _ in 0..budget {
            let Some(channel) = self.next_channel() else {
                break;
            };

            if channel.ping().await {
                if self.strategy == SelectionStrategy::Failover {
                    return true;
                }
                continue;
            }

            tracing::warn!(channel = channel.name(), "Channel failed ping, quarantining");
            self.quarantine_current().await;
        }

        self.is_started()
    }

    /// Send a message through the pool
    ///
    /// Returns the number of recipients accepted by the first channel that
    /// accepted any. A channel that accepts nobody is skipped without being
    /// quarantined, and if every attempt ends that way the result is `0`.
    ///
    /// # Errors
    /// - [`TransportError::AllChannelsExhausted`] if no channel is left active
    /// - [`TransportError::Channel`] if a channel fails for any reason other
    ///   than a delivery failure
    pub async fn send(&mut self, message: &Message) -> Result<usize> {
        let budget = self.active.len();
        let mut accepted = 0;
        self.last_used = None;

        for _ in 0..budget {
            let Some(channel) = self.next_channel() else {
                break;
            };

            match Self::attempt(&channel, message).await {
                Ok(0) => {
                    outgoing!(
                        level = DEBUG,
                        channel = channel.name(),
                        message_id = %message.id,
                        "Channel accepted no recipients"
                    );
                }
                Ok(count) => {
                    outgoing!(
                        level = DEBUG,
                        channel = channel.name(),
                        message_id = %message.id,
                        accepted = count,
                        "Message accepted"
                    );
                    self.last_used = Some(Arc::downgrade(&channel));
                    accepted = count;
                    break;
                }
                Err(err) if err.is_delivery_failure() => {
                    tracing::warn!(
                        channel = channel.name(),
                        message_id = %message.id,
                        error = %err,
                        "Delivery failed, quarantining channel"
                    );
                    self.quarantine_current().await;
                }
                Err(err) => return Err(err.into()),
            }
        }

        if self.active.is_empty() {
            tracing::error!(
                message_id = %message.id,
                quarantined = self.quarantined.len(),
                "No channels left to deliver through"
            );
            return Err(TransportError::AllChannelsExhausted);
        }

        Ok(accepted)
    }

    /// Register a plugin with every active channel
    pub fn register_plugin(&self, plugin: &Arc<dyn EventListener>) {
        for channel in &self.active {
            channel.register_plugin(Arc::clone(plugin));
        }
    }

    async fn attempt(
        channel: &Arc<dyn Channel>,
        message: &Message,
    ) -> std::result::Result<usize, ChannelError> {
        if !channel.is_started() {
            internal!(level = DEBUG, channel = channel.name(), "Starting channel");
            channel.start().await?;
        }

        channel.send(message).await
    }

    fn next_channel(&mut self) -> Option<Arc<dyn Channel>> {
        if self.sticky {
            return self.active.back().cloned();
        }

        let next = self.rotate()?;
        self.sticky = self.strategy == SelectionStrategy::Failover;
        Some(next)
    }

    /// Move the front channel to the back and return it
    fn rotate(&mut self) -> Option<Arc<dyn Channel>> {
        let next = self.active.pop_front()?;
        self.active.push_back(Arc::clone(&next));
        Some(next)
    }

    /// Quarantine the channel at the back of the queue, i.e. the one just tried
    async fn quarantine_current(&mut self) {
        let Some(channel) = self.active.pop_back() else {
            return;
        };

        self.sticky = false;
        self.quarantined.push(Arc::clone(&channel));
        Self::stop_quietly(&channel).await;
    }

    /// Best-effort shutdown of a quarantined channel. The result is dropped:
    /// a failing stop never surfaces in place of the delivery error that
    /// caused the quarantine.
    async fn stop_quietly(channel: &Arc<dyn Channel>) {
        if let Err(err) = channel.stop().await {
            internal!(
                level = DEBUG,
                channel = channel.name(),
                error = %err,
                "Ignoring failure while stopping quarantined channel"
            );
        }
    }
}

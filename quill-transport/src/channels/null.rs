use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;
use quill_common::{EventListener, Message, outgoing};

use crate::{Channel, ChannelError};

/// A channel that pretends to deliver every message
///
/// Every recipient is reported as accepted. Useful for dry runs and as a
/// stand-in wherever a real channel is not available.
#[derive(Debug, Default)]
pub struct NullChannel {
    name: String,
    started: AtomicBool,
    plugins: Mutex<Vec<Arc<dyn EventListener>>>,
}

impl NullChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of the plugins registered with this channel
    pub fn plugins(&self) -> Vec<String> {
        self.plugins
            .lock()
            .iter()
            .map(|plugin| plugin.name().to_string())
            .collect()
    }
}

#[async_trait]
impl Channel for NullChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    async fn start(&self) -> Result<(), ChannelError> {
        self.started.store(true, Ordering::Release);
        Ok(())
    }

    async fn stop(&self) -> Result<(), ChannelError> {
        self.started.store(false, Ordering::Release);
        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }

    async fn send(&self, message: &Message) -> Result<usize, ChannelError> {
        outgoing!(
            channel = %self.name,
            message_id = %message.id,
            recipients = message.recipient_count(),
            "Discarding message"
        );
        Ok(message.recipient_count())
    }

    fn register_plugin(&self, plugin: Arc<dyn EventListener>) {
        self.plugins.lock().push(plugin);
    }
}

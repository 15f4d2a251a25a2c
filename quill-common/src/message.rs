//! The unit of work handed to a delivery channel.
//!
//! Header parsing and the MIME object model live elsewhere; a channel only
//! needs the envelope and the rendered bytes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier used for logging and tracing
    pub id: String,
    /// Envelope sender, if any
    pub sender: Option<String>,
    /// Envelope recipients
    pub recipients: Vec<String>,
    /// Fully rendered message content
    pub data: Arc<[u8]>,
}

impl Message {
    pub fn new(id: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    #[must_use]
    pub fn with_recipients<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipients = recipients.into_iter().map(Into::into).collect();
        self
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

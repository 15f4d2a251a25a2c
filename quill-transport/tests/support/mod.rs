#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use quill_common::{EventListener, Message};
use quill_transport::{Channel, ChannelError};

/// Shared, ordered record of every call made on a set of channels
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::default()
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A channel whose behaviour is scripted by the test
#[derive(Debug)]
pub struct ScriptedChannel {
    name: String,
    log: CallLog,
    started: AtomicBool,
    alive: AtomicBool,
    /// Outcomes handed out by `send`, in order. Once drained, `fallback` is used.
    outcomes: Mutex<VecDeque<Result<usize, ChannelError>>>,
    fallback: Mutex<Result<usize, ChannelError>>,
    stop_error: Mutex<Option<ChannelError>>,
    start_error: Mutex<Option<ChannelError>>,
    plugins: Mutex<Vec<String>>,
}

impl ScriptedChannel {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            log: Arc::clone(log),
            started: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            outcomes: Mutex::default(),
            fallback: Mutex::new(Ok(1)),
            stop_error: Mutex::default(),
            start_error: Mutex::default(),
            plugins: Mutex::default(),
        }
    }

    /// Every send accepts `count` recipients
    pub fn accepting(self, count: usize) -> Self {
        *self.fallback.lock().unwrap() = Ok(count);
        self
    }

    /// Every send fails with a delivery failure
    pub fn failing(self) -> Self {
        *self.fallback.lock().unwrap() =
            Err(ChannelError::Delivery(format!("{} is unreachable", self.name)));
        self
    }

    /// Sends return these outcomes first, in order
    pub fn scripted(self, outcomes: impl IntoIterator<Item = Result<usize, ChannelError>>) -> Self {
        self.outcomes.lock().unwrap().extend(outcomes);
        self
    }

    pub fn dead(self) -> Self {
        self.alive.store(false, Ordering::SeqCst);
        self
    }

    pub fn failing_stop(self) -> Self {
        *self.stop_error.lock().unwrap() = Some(ChannelError::Stop(format!("{} hung up", self.name)));
        self
    }

    pub fn failing_start(self, error: ChannelError) -> Self {
        *self.start_error.lock().unwrap() = Some(error);
        self
    }

    pub fn shared(self) -> Arc<dyn Channel> {
        Arc::new(self)
    }

    pub fn plugins(&self) -> Vec<String> {
        self.plugins.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.log.lock().unwrap().push(format!("{}:{call}", self.name));
    }
}

#[async_trait]
impl Channel for ScriptedChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    async fn start(&self) -> Result<(), ChannelError> {
        self.record("start");
        if let Some(err) = self.start_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), ChannelError> {
        self.record("stop");
        self.started.store(false, Ordering::SeqCst);
        self.stop_error.lock().unwrap().clone().map_or(Ok(()), Err)
    }

    async fn ping(&self) -> bool {
        self.record("ping");
        self.alive.load(Ordering::SeqCst)
    }

    async fn send(&self, _message: &Message) -> Result<usize, ChannelError> {
        self.record("send");
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }

    fn register_plugin(&self, plugin: Arc<dyn EventListener>) {
        self.plugins.lock().unwrap().push(plugin.name().to_string());
    }
}

pub fn names<'a>(channels: impl IntoIterator<Item = &'a Arc<dyn Channel>>) -> Vec<String> {
    channels
        .into_iter()
        .map(|channel| channel.name().to_string())
        .collect()
}

pub fn message() -> Message {
    Message::new("test-message", b"Subject: test\r\n\r\nHello".as_slice())
        .with_sender("sender@example.org")
        .with_recipients(["one@example.com", "two@example.com"])
}

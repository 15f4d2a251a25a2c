pub mod logging;
pub mod message;
pub mod plugin;

pub use message::Message;
pub use plugin::EventListener;
pub use tracing;

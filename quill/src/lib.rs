pub mod config;
mod relay;

pub use quill_cache as cache;
pub use quill_common as common;
pub use quill_transport as transport;
pub use relay::{BODY_ITEM, relay};

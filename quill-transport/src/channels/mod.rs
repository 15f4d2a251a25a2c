//! Built-in channel implementations
//!
//! - `null`: accepts every recipient without performing any I/O

pub mod null;

pub use null::NullChannel;

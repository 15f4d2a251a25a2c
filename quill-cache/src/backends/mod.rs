//! Cache backend implementations
//!
//! - `memory`: process-local storage, optionally bounded in bytes

pub mod memory;

pub use memory::MemoryKeyCache;

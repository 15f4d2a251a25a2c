use std::fmt::Debug;

/// A plugin that wants to observe channel events.
///
/// Event dispatch belongs to the channels themselves; the pool only forwards
/// registrations.
pub trait EventListener: Send + Sync + Debug {
    fn name(&self) -> &str;
}

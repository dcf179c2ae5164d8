//=========================================================================
// Platform Bridge
//=========================================================================
//
// Connects the winit platform layer with the core thread.
//
// Components:
// - `interface`: event and error types (the contract)
// - `event_collector`: core-side draining of the channel
//
//=========================================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::PlatformError;
pub(crate) use interface::PlatformEvent;

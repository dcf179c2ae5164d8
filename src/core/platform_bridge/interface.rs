//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the platform thread and the core thread: the events
// that cross the channel and the errors the platform can fail with.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bounded channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Input collected between two redraws, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop exited with an error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

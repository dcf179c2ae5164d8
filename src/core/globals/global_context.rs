//=========================================================================
// Global Context
//=========================================================================
//
// Shared per-tick data handed to the simulation.
//
// Contains:
// - input_state:   held keys/buttons and per-frame deltas
// - message_bus:   actions, axis samples and game events for this tick
// - input_context: binding set the simulation wants for the next tick
// - delta_seconds / tick: timing of the current tick
// - exit flag:     set by the simulation to stop the logic thread
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{InputContext, InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;

//=== GlobalContext =======================================================

/// Data the simulation reads and writes each tick.
///
/// Systems live in [`super::GlobalSystems`]; this struct only holds state,
/// so the simulation can borrow it mutably while systems are borrowed
/// separately by the orchestrator.
pub struct GlobalContext {
    /// Raw keyboard/mouse state for direct queries.
    pub input_state: StateTracker,

    /// Tick-scoped message queues. Cleared at the start of every tick.
    pub message_bus: MessageBus,

    /// Binding set applied by the input system at the start of the next tick.
    pub input_context: InputContext,

    /// Seconds elapsed since the previous tick (already clamped).
    pub delta_seconds: f32,

    /// Number of ticks run so far, starting at 1 for the first update.
    pub tick: u64,

    exit_requested: bool,

    /// Input batches received from the platform for this tick.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    pub(crate) fn new() -> Self {
        Self {
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            input_context: InputContext::default(),
            delta_seconds: 0.0,
            tick: 0,
            exit_requested: false,
            frame_input_events: Vec::new(),
        }
    }

    /// Asks the orchestrator to stop after the current tick.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

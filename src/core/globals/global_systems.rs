//=========================================================================
// Global Systems
//=========================================================================
//
// Engine-level systems that run before the simulation each tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use log::trace;

use super::GlobalContext;
use crate::core::input::InputSystem;

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// Exposed to callers through [`crate::Engine::init`] so bindings can be
/// changed before the logic thread starts.
pub struct GlobalSystems {
    /// Context-aware action mapping over raw input.
    pub input: InputSystem,
}

impl GlobalSystems {
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::with_default_bindings(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs the input stage of a tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Tick boundary**: drop every message of the previous tick
    /// 2. **Context**: apply the binding set the simulation asked for
    /// 3. **Input**: fold this tick's batches into state and actions
    /// 4. **Publish**: pressed actions, then one `HorizontalAxis` sample
    pub(crate) fn update(&mut self, context: &mut GlobalContext) {
        context.message_bus.clear_all();

        if self.input.context() != context.input_context {
            trace!(target: "input", "Input context -> {:?}", context.input_context);
            self.input.set_context(context.input_context);
        }

        self.input
            .process_frame(&mut context.input_state, &context.frame_input_events);
        context.frame_input_events.clear();

        context.message_bus.extend(self.input.actions().iter().copied());
        context.message_bus.push(self.input.horizontal_axis());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic) from context (data).
//
// Architecture:
//   GlobalSystems: InputSystem (owned by the orchestrator)
//   GlobalContext: StateTracker + MessageBus + timing (passed to the game)
//
//=========================================================================

mod global_context;
mod global_systems;

pub use global_context::GlobalContext;
pub use global_systems::GlobalSystems;

//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use endless_runner::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::Simulation;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{HorizontalAxis, InputContext, KeyCode, MouseButton, RunnerAction};

// Message bus
pub use crate::core::message_bus::MessageBus;

// Game
pub use crate::config::RunnerConfig;
pub use crate::game::{
    Display, GameManager, GamePhase, Persistence, PlayerEvent, Runner, ScoreReporter, Stage,
};

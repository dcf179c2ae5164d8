//=========================================================================
// Game
//
// Endless runner rules on top of the engine:
//
//   capabilities  traits for display, storage, reporting and the stage
//   state         phases, score, speed and high score (`GameManager`)
//   player        grounded state, jump gating, velocity commands
//   runner        the per-tick pipeline, as a `Simulation`
//
//=========================================================================

mod capabilities;
mod player;
mod runner;
mod score;
mod state;

#[cfg(test)]
mod mocks;

pub use capabilities::{
    AnimationFlag, AnimationTrigger, CollisionSource, ContactEvent, ContactPhase, Display, Element,
    Persistence, PlayerCommand, ScoreReporter, SoundCue, Stage, Surface,
};
pub use player::{PlayerAgent, PlayerEvent};
pub use runner::Runner;
pub use score::{final_score, format_score, SCORE_DIGITS};
pub use state::{GameManager, GamePhase, GameState, SPEED_INCREASE_RATE};

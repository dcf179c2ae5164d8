//=========================================================================
// Player Agent
//=========================================================================
//
// Turns contacts into player state and game events, and input into a
// velocity command for the stage.
//
//   ContactEvent ──handle_contact()──> grounded flag / PlayerEvent
//   jump request ──request_jump()───> accepted only while grounded
//   axis + jump  ──command()────────> PlayerCommand → Stage
//
//=========================================================================

use log::debug;

use super::capabilities::{ContactEvent, ContactPhase, PlayerCommand, Surface};
use crate::config::PlayerTuning;

//=== PlayerEvent =========================================================

/// Events the player raises during a tick, published on the message bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player touched or overlapped an obstacle.
    ObstacleHit,

    /// Ground contact started (`true`) or ended (`false`).
    GroundedChanged(bool),
}

//=== PlayerAgent =========================================================

#[derive(Debug, Clone)]
pub struct PlayerAgent {
    tuning: PlayerTuning,
    grounded: bool,
}

impl PlayerAgent {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            grounded: false,
        }
    }

    /// Updates ground state from one contact and reports what it means.
    pub fn handle_contact(&mut self, contact: &ContactEvent) -> Option<PlayerEvent> {
        match (contact.surface, contact.phase) {
            (Surface::Ground, ContactPhase::Begin | ContactPhase::Stay) => self.set_grounded(true),
            (Surface::Ground, ContactPhase::End) => self.set_grounded(false),
            (Surface::Obstacle, ContactPhase::Begin | ContactPhase::Stay) => {
                Some(PlayerEvent::ObstacleHit)
            }
            (Surface::Obstacle, ContactPhase::End) => None,
        }
    }

    fn set_grounded(&mut self, grounded: bool) -> Option<PlayerEvent> {
        if self.grounded == grounded {
            return None;
        }
        self.grounded = grounded;
        Some(PlayerEvent::GroundedChanged(grounded))
    }

    /// Returns whether a jump may happen now. Refusal is not an error.
    pub fn request_jump(&self) -> bool {
        if self.grounded {
            debug!(target: "player", "Jump triggered");
            true
        } else {
            debug!(target: "player", "Not grounded, cannot jump");
            false
        }
    }

    /// Velocity command for this tick.
    ///
    /// `axis` is clamped to `[-1, 1]`; `jump` should be the result of
    /// [`request_jump`](Self::request_jump).
    ///
    /// `horizontal_velocity` is a velocity in units/s, deliberately not
    /// multiplied by `dt`: the stage integrates it over the tick, so a
    /// per-frame `axis * move_speed * dt` here would apply `dt` twice.
    pub fn command(&self, axis: f32, jump: bool) -> PlayerCommand {
        let axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };

        PlayerCommand {
            horizontal_velocity: axis * self.tuning.move_speed,
            jump_velocity: jump.then_some(self.tuning.jump_force),
            gravity_scale: if self.grounded { 0.0 } else { self.tuning.gravity },
        }
    }

    /// Forgets ground contact; the stage reports it again after a respawn.
    pub fn reset(&mut self) {
        self.grounded = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

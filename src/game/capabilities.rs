//=========================================================================
// Capabilities
//=========================================================================
//
// Everything the game needs from the outside world, expressed as traits
// injected into the state machine and the runner:
//
//   Display          text, visibility, animation flags, sound cues
//   Persistence      float key/value store (high score)
//   ScoreReporter    one-way final score sink
//   CollisionSource  contacts between the player and the world
//   Stage            the world itself: spawning, player motion, scrolling
//
// None of these calls return errors: output sinks and the store are
// fire-and-forget, implementations log their own failures.
//
//=========================================================================

//=== Presentation ========================================================

/// UI elements whose visibility follows the game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    GameStartText,
    GameOverText,
    RetryButton,
    StartButton,
    JumpButton,
}

/// Boolean animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationFlag {
    GameStarted,
    GameOver,
    Grounded,
}

/// One-shot animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    GameOver,
}

/// Output sink for everything the player sees and hears.
pub trait Display {
    /// Current score, already formatted (`"00042"`).
    fn set_score_text(&mut self, text: &str);

    /// High score, already formatted.
    fn set_high_score_text(&mut self, text: &str);

    fn set_visible(&mut self, element: Element, visible: bool);

    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool);

    fn trigger_animation(&mut self, trigger: AnimationTrigger);

    fn play_cue(&mut self, cue: SoundCue);
}

//=== Persistence =========================================================

/// Float store that survives process restarts.
pub trait Persistence {
    /// Stored value for `key`, or `default` when absent.
    fn get_float(&self, key: &str, default: f32) -> f32;

    fn set_float(&mut self, key: &str, value: f32);
}

//=== Reporting ===========================================================

/// Receives each finished game's final score exactly once.
pub trait ScoreReporter {
    fn report_score(&mut self, score: u32, game_id: u32);
}

//=== Physical World ======================================================

/// What the player touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Ground,
    Obstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Begin,
    Stay,
    End,
}

/// One contact report between the player and a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub surface: Surface,
    pub phase: ContactPhase,
}

impl ContactEvent {
    pub fn new(surface: Surface, phase: ContactPhase) -> Self {
        Self { surface, phase }
    }
}

/// Source of player contacts, drained once per tick.
pub trait CollisionSource {
    /// Appends every contact since the last drain to `out`, oldest first.
    fn drain_contacts(&mut self, out: &mut Vec<ContactEvent>);
}

/// Velocity request for the player body for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCommand {
    /// Horizontal velocity, units/s.
    pub horizontal_velocity: f32,
    /// New vertical velocity when a jump was accepted this tick.
    pub jump_velocity: Option<f32>,
    /// Downward acceleration to apply, 0 while grounded.
    pub gravity_scale: f32,
}

/// The world the runner plays in.
pub trait Stage: CollisionSource {
    /// Removes all obstacles and puts the player back at the start.
    fn reset(&mut self);

    /// Turns obstacle spawning on or off.
    fn set_spawning(&mut self, enabled: bool);

    fn drive_player(&mut self, command: &PlayerCommand);

    /// Moves the world by `speed * dt` and integrates the player.
    fn advance(&mut self, speed: f32, dt: f32);
}

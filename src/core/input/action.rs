//=========================================================================
// Runner Actions & Input Context
//=========================================================================
//
// High-level commands produced by the input layer and consumed by the game.
//
// Actions: what the player asked for this frame (Start, Jump, Retry, ...).
// Contexts: which bindings are live for the current game phase, so the same
//           key can mean Start on the title screen and Jump while running.
//
//=========================================================================

//=== RunnerAction ========================================================

/// A discrete player command for the current frame.
///
/// `MoveLeft`/`MoveRight` are held actions: they feed the horizontal axis
/// instead of being published as one-shot presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerAction {
    /// Start button / start key on the title screen.
    Start,

    /// Jump request (honored only while grounded).
    Jump,

    /// Retry button / restart key after a game over.
    Retry,

    /// Held: push the horizontal axis negative.
    MoveLeft,

    /// Held: push the horizontal axis positive.
    MoveRight,

    /// Leave the game.
    Quit,
}

impl RunnerAction {
    /// Returns `true` for actions that are sampled while held rather than
    /// fired once per press.
    pub fn is_axis(&self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight)
    }
}

//=== HorizontalAxis ======================================================

/// Per-frame horizontal axis sample in `[-1.0, 1.0]`.
///
/// Published once per tick on the message bus next to the pressed actions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizontalAxis(pub f32);

//=== InputContext ========================================================

/// Identifies which set of bindings is active.
///
/// Follows the game phase: `Menu` before the first start, `Running` while
/// playing, `GameOver` between a collision and the next retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Title screen, waiting for Start.
    #[default]
    Menu,

    /// Gameplay.
    Running,

    /// Game over screen, waiting for Retry.
    GameOver,
}

impl InputContext {
    /// All contexts, for bindings that apply everywhere.
    pub const ALL: [InputContext; 3] = [Self::Menu, Self::Running, Self::GameOver];
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Input Event Types
//
// Engine-side representation of the keyboard and mouse input the runner
// reacts to.
//
// This module abstracts away platform-specific input (Winit) into a small,
// portable vocabulary: the handful of physical keys and buttons the game
// binds, plus an `Unidentified` fallback.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys + per-frame deltas)
//         ↓
//    RunnerAction (Start, Jump, Retry, ...)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// A left click stands in for the on-screen Start/Jump/Retry buttons, so
/// only the primary button carries bindings by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyA`/`KeyD` stay usable as left/right on non-QWERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Letters ----------------------------------------------------------

    KeyA,
    KeyD,
    KeyR,
    KeyS,
    KeyW,

    //--- Arrows -----------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special ----------------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Any key the runner has no use for.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Events are plain values: two `KeyDown(Space)` events compare equal,
/// which lets the platform buffer drop consecutive OS key repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Mouse button pressed.
    ButtonDown(MouseButton),

    /// Mouse button released.
    ButtonUp(MouseButton),
}

impl InputEvent {
    /// Returns `true` for press events (the ones that can trigger actions).
    pub fn is_press(&self) -> bool {
        matches!(self, Self::KeyDown(_) | Self::ButtonDown(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard and mouse events into engine `InputEvent`s.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// Keys the runner never binds map to `KeyCode::Unidentified` and are
// filtered out here, so they never cross the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a winit key event; `None` for keys the runner ignores.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        match key_event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, key_event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub(crate) fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::ButtonDown(button),
            ElementState::Released => InputEvent::ButtonUp(button),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Physical winit keys to engine keys; everything unbound is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            KeyA => KeyCode::KeyA,
            KeyD => KeyCode::KeyD,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyW => KeyCode::KeyW,

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle map directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed/released).
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    buttons_pressed_this_frame: HashSet<MouseButton>,
}

impl StateTracker {
    /// Creates a new state tracker with nothing held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            buttons_pressed_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.buttons_pressed_this_frame.clear();
    }

    /// Processes input events, updating internal state.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                // Auto-repeat from the OS must not re-trigger a press
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                }
            }

            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
            }

            InputEvent::ButtonDown(button) => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed_this_frame.insert(button);
                }
            }

            InputEvent::ButtonUp(button) => {
                self.buttons_down.remove(&button);
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

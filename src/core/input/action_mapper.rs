//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw input to runner actions based on bindings and the active context.
//
// Architecture:
//   (key/button, context) → HashMap → RunnerAction
//
// Only bindings in the active context resolve to actions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{InputContext, RunnerAction},
    event::{InputEvent, KeyCode, MouseButton},
};

//=== ActionMapper ========================================================

/// Maps input events to actions via (key/button, context) lookups.
pub(crate) struct ActionMapper {
    key_bindings: HashMap<(KeyCode, InputContext), RunnerAction>,
    button_bindings: HashMap<(MouseButton, InputContext), RunnerAction>,
    current_context: InputContext,
}

impl ActionMapper {
    /// Creates a mapper with the Menu context active and no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            button_bindings: HashMap::new(),
            current_context: InputContext::Menu,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action in one context (replaces any previous binding).
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: RunnerAction, context: InputContext) {
        self.key_bindings.insert((key, context), action);
    }

    /// Binds a mouse button to an action in one context.
    pub(crate) fn bind_button(
        &mut self,
        button: MouseButton,
        action: RunnerAction,
        context: InputContext,
    ) {
        self.button_bindings.insert((button, context), action);
    }

    /// Removes a key binding.
    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings.remove(&(key, context));
    }

    /// Removes a mouse button binding.
    pub(crate) fn unbind_button(&mut self, button: MouseButton, context: InputContext) {
        self.button_bindings.remove(&(button, context));
    }

    /// Clears all bindings for a context.
    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, ctx), _| ctx != context);
        self.button_bindings.retain(|&(_, ctx), _| ctx != context);
    }

    //--- Mapping ----------------------------------------------------------

    /// Maps a press event to an action in the active context.
    ///
    /// Release events never map.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<RunnerAction> {
        match *event {
            InputEvent::KeyDown(key) => self.map_key(key),
            InputEvent::ButtonDown(button) => self.map_button(button),
            _ => None,
        }
    }

    pub(crate) fn map_key(&self, key: KeyCode) -> Option<RunnerAction> {
        self.key_bindings.get(&(key, self.current_context)).copied()
    }

    pub(crate) fn map_button(&self, button: MouseButton) -> Option<RunnerAction> {
        self.button_bindings.get(&(button, self.current_context)).copied()
    }

    /// Sets the active context.
    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    /// Returns the active context.
    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

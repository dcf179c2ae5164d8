//=========================================================================
// Input System
//
// Turns per-frame batches of platform input into runner actions.
//
// Responsibilities:
// - Feed raw events into the `StateTracker` (held keys, frame deltas)
// - Resolve presses into `RunnerAction`s for the active `InputContext`
// - Sample the horizontal axis from held MoveLeft/MoveRight keys
//
// Notes:
// The system is owned by `GlobalSystems` and updated on the logic thread.
// Bindings can be changed before the engine runs via `Engine::init`.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{HorizontalAxis, InputContext, RunnerAction};
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;
use log::trace;

//=== InputSystem =========================================================

/// High-level input system with context-aware action mapping.
pub struct InputSystem {
    mapper: ActionMapper,
    actions: Vec<RunnerAction>,
    axis: f32,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system without any bindings.
    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            actions: Vec::with_capacity(4),
            axis: 0.0,
        }
    }

    /// Creates an input system with the runner's default key layout.
    ///
    /// | Context  | Keys / buttons                 | Action    |
    /// |----------|--------------------------------|-----------|
    /// | Menu     | Enter, Space, left click       | Start     |
    /// | Running  | Space, ArrowUp, W, left click  | Jump      |
    /// | Running  | ArrowLeft, A                   | MoveLeft  |
    /// | Running  | ArrowRight, D                  | MoveRight |
    /// | GameOver | R, Enter, left click           | Retry     |
    /// | all      | Escape                         | Quit      |
    pub fn with_default_bindings() -> Self {
        use InputContext::*;
        use RunnerAction::*;

        let mut input = Self::new();

        for key in [KeyCode::Enter, KeyCode::Space] {
            input.bind_key(key, Start, Menu);
        }
        input.bind_button(MouseButton::Left, Start, Menu);

        for key in [KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW] {
            input.bind_key(key, Jump, Running);
        }
        input.bind_button(MouseButton::Left, Jump, Running);
        input.bind_key(KeyCode::ArrowLeft, MoveLeft, Running);
        input.bind_key(KeyCode::KeyA, MoveLeft, Running);
        input.bind_key(KeyCode::ArrowRight, MoveRight, Running);
        input.bind_key(KeyCode::KeyD, MoveRight, Running);

        for key in [KeyCode::KeyR, KeyCode::Enter] {
            input.bind_key(key, Retry, GameOver);
        }
        input.bind_button(MouseButton::Left, Retry, GameOver);

        for context in InputContext::ALL {
            input.bind_key(KeyCode::Escape, Quit, context);
        }

        input
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action in a context.
    pub fn bind_key(&mut self, key: KeyCode, action: RunnerAction, context: InputContext) {
        self.mapper.bind_key(key, action, context);
    }

    /// Binds a mouse button to an action in a context.
    pub fn bind_button(&mut self, button: MouseButton, action: RunnerAction, context: InputContext) {
        self.mapper.bind_button(button, action, context);
    }

    /// Removes a key binding.
    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    /// Removes a mouse button binding.
    pub fn unbind_button(&mut self, button: MouseButton, context: InputContext) {
        self.mapper.unbind_button(button, context);
    }

    /// Removes every binding of a context.
    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    /// Switches the active binding set.
    pub fn set_context(&mut self, context: InputContext) {
        self.mapper.set_context(context);
    }

    /// Returns the active binding set.
    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Frame Processing -------------------------------------------------

    /// Processes one frame of input batches.
    ///
    /// Updates `state`, collects the one-shot actions pressed this frame (in
    /// arrival order, without duplicates) and samples the horizontal axis.
    pub(crate) fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        state.clear();
        self.actions.clear();

        for batch in batches {
            state.process_events(batch);
        }

        // OS key repeats never reach the pressed set
        let fresh = batches.iter().flatten().filter(|event| match **event {
            InputEvent::KeyDown(key) => state.is_key_pressed(key),
            InputEvent::ButtonDown(button) => state.is_button_pressed(button),
            _ => false,
        });

        for event in fresh {
            if let Some(action) = self.mapper.map_event(event) {
                if !action.is_axis() && !self.actions.contains(&action) {
                    self.actions.push(action);
                }
            }
        }

        self.axis = self.sample_axis(state);

        if !self.actions.is_empty() {
            trace!(target: "input", "Actions this frame: {:?}", self.actions);
        }
    }

    fn sample_axis(&self, state: &StateTracker) -> f32 {
        let mut left = false;
        let mut right = false;

        for key in state.keys_down() {
            match self.mapper.map_key(*key) {
                Some(RunnerAction::MoveLeft) => left = true,
                Some(RunnerAction::MoveRight) => right = true,
                _ => {}
            }
        }

        (right as i8 - left as i8) as f32
    }

    //--- Query API --------------------------------------------------------

    /// One-shot actions pressed during the last processed frame.
    pub fn actions(&self) -> &[RunnerAction] {
        &self.actions
    }

    /// Horizontal axis sampled during the last processed frame.
    pub fn horizontal_axis(&self) -> HorizontalAxis {
        HorizontalAxis(self.axis)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(system: &mut InputSystem, state: &mut StateTracker, events: Vec<InputEvent>) {
        system.process_frame(state, &[events]);
    }

    #[test]
    fn menu_start_on_enter() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Enter)]);

        assert_eq!(system.actions(), &[RunnerAction::Start]);
    }

    #[test]
    fn space_means_jump_while_running() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.set_context(InputContext::Running);

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Space)]);

        assert_eq!(system.actions(), &[RunnerAction::Jump]);
    }

    #[test]
    fn retry_on_r_after_game_over() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.set_context(InputContext::GameOver);

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyR)]);
        assert_eq!(system.actions(), &[RunnerAction::Retry]);

        system.set_context(InputContext::Running);
        run(&mut system, &mut state, vec![InputEvent::KeyUp(KeyCode::KeyR)]);
        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyR)]);
        assert!(system.actions().is_empty(), "R is unbound while running");
    }

    #[test]
    fn actions_are_cleared_each_frame() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Enter)]);
        run(&mut system, &mut state, vec![]);

        assert!(system.actions().is_empty());
    }

    #[test]
    fn duplicate_actions_collapse() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.set_context(InputContext::Running);

        run(
            &mut system,
            &mut state,
            vec![
                InputEvent::KeyDown(KeyCode::Space),
                InputEvent::ButtonDown(MouseButton::Left),
            ],
        );

        assert_eq!(system.actions(), &[RunnerAction::Jump]);
    }

    #[test]
    fn axis_follows_held_keys() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.set_context(InputContext::Running);

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::ArrowRight)]);
        assert_eq!(system.horizontal_axis(), HorizontalAxis(1.0));
        assert!(system.actions().is_empty(), "axis actions are not one-shot");

        // Still held next frame
        run(&mut system, &mut state, vec![]);
        assert_eq!(system.horizontal_axis(), HorizontalAxis(1.0));

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyA)]);
        assert_eq!(system.horizontal_axis(), HorizontalAxis(0.0));

        run(&mut system, &mut state, vec![InputEvent::KeyUp(KeyCode::ArrowRight)]);
        assert_eq!(system.horizontal_axis(), HorizontalAxis(-1.0));
    }

    #[test]
    fn axis_is_zero_outside_running_context() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::ArrowLeft)]);

        assert_eq!(system.horizontal_axis(), HorizontalAxis(0.0));
    }

    #[test]
    fn escape_quits_everywhere() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();

        for context in InputContext::ALL {
            system.set_context(context);
            run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Escape)]);
            assert_eq!(system.actions(), &[RunnerAction::Quit]);
            run(&mut system, &mut state, vec![InputEvent::KeyUp(KeyCode::Escape)]);
        }
    }

    #[test]
    fn held_key_repeat_does_not_fire_again() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.set_context(InputContext::Running);

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Space)]);
        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Space)]);

        assert!(system.actions().is_empty());
    }

    #[test]
    fn custom_binding_overrides_default() {
        let mut system = InputSystem::with_default_bindings();
        let mut state = StateTracker::new();
        system.unbind_key(KeyCode::Enter, InputContext::Menu);
        system.bind_key(KeyCode::KeyS, RunnerAction::Start, InputContext::Menu);

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::Enter)]);
        assert!(system.actions().is_empty());

        run(&mut system, &mut state, vec![InputEvent::KeyDown(KeyCode::KeyS)]);
        assert_eq!(system.actions(), &[RunnerAction::Start]);
    }
}

//=========================================================================
// Runner
//
// The game as a `Simulation`: glues input actions, the state machine, the
// player agent and the stage together, once per tick.
//
// Per-tick pipeline:
//  1. Menu actions: Start / Retry begin a run, Quit stops the engine
//  2. While playing: jump, player command, stage advance at game speed
//  3. Contacts → PlayerEvents on the bus; an obstacle ends the game
//  4. Score and speed tick
//  5. Input context follows the phase for the next tick
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::capabilities::{
    AnimationFlag, AnimationTrigger, ContactEvent, Display, Persistence, ScoreReporter, SoundCue,
    Stage,
};
use super::player::{PlayerAgent, PlayerEvent};
use super::score::format_score;
use super::state::{GameManager, GamePhase};
use crate::config::RunnerConfig;
use crate::core::input::{HorizontalAxis, InputContext, RunnerAction};
use crate::core::{GlobalContext, Simulation};

//=== Runner ==============================================================

pub struct Runner<D, P, R, W>
where
    D: Display,
    P: Persistence,
    R: ScoreReporter,
    W: Stage,
{
    manager: GameManager<D, P, R>,
    player: PlayerAgent,
    stage: W,
    contacts: Vec<ContactEvent>,
}

impl<D, P, R, W> Runner<D, P, R, W>
where
    D: Display,
    P: Persistence,
    R: ScoreReporter,
    W: Stage,
{
    /// Builds the title screen. Nothing moves until Start.
    pub fn new(config: &RunnerConfig, display: D, persistence: P, reporter: R, mut stage: W) -> Self {
        stage.set_spawning(false);

        Self {
            manager: GameManager::new(config, display, persistence, reporter),
            player: PlayerAgent::new(config.player),
            stage,
            contacts: Vec::with_capacity(8),
        }
    }

    //--- Pipeline Stages --------------------------------------------------

    fn apply_menu_actions(&mut self, ctx: &mut GlobalContext, actions: &[RunnerAction]) {
        for action in actions {
            match action {
                RunnerAction::Start => {
                    if self.manager.start_game() {
                        self.begin_run();
                    }
                }
                RunnerAction::Retry => {
                    if self.manager.retry_game() {
                        self.begin_run();
                    }
                }
                RunnerAction::Quit => {
                    info!(target: "game", "Quit requested");
                    ctx.request_exit();
                }
                _ => {}
            }
        }
    }

    fn begin_run(&mut self) {
        self.stage.reset();
        self.player.reset();
        self.stage.set_spawning(true);
    }

    fn drive_player(&mut self, actions: &[RunnerAction], axis: f32, dt: f32) {
        let jump = actions.contains(&RunnerAction::Jump) && self.player.request_jump();
        if jump {
            let display = self.manager.display_mut();
            display.trigger_animation(AnimationTrigger::Jump);
            display.play_cue(SoundCue::Jump);
        }

        let command = self.player.command(axis, jump);
        self.stage.drive_player(&command);

        let grounded = self.player.is_grounded();
        self.manager
            .display_mut()
            .set_animation_flag(AnimationFlag::Grounded, grounded);

        self.stage.advance(self.manager.state().speed(), dt);
    }

    fn resolve_contacts(&mut self, ctx: &mut GlobalContext) {
        self.contacts.clear();
        self.stage.drain_contacts(&mut self.contacts);

        for contact in &self.contacts {
            let Some(event) = self.player.handle_contact(contact) else {
                continue;
            };
            ctx.message_bus.push(event);

            if event == PlayerEvent::ObstacleHit && self.manager.game_over() {
                self.manager.display_mut().play_cue(SoundCue::GameOver);
                self.stage.set_spawning(false);
            }
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn manager(&self) -> &GameManager<D, P, R> {
        &self.manager
    }

    pub fn player(&self) -> &PlayerAgent {
        &self.player
    }

    pub fn stage(&self) -> &W {
        &self.stage
    }
}

fn context_for(phase: GamePhase) -> InputContext {
    match phase {
        GamePhase::NotStarted => InputContext::Menu,
        GamePhase::Playing => InputContext::Running,
        GamePhase::GameOver => InputContext::GameOver,
    }
}

//=== Simulation ==========================================================

impl<D, P, R, W> Simulation for Runner<D, P, R, W>
where
    D: Display + Send + 'static,
    P: Persistence + Send + 'static,
    R: ScoreReporter + Send + 'static,
    W: Stage + Send + 'static,
{
    fn start(&mut self, ctx: &mut GlobalContext) {
        ctx.input_context = context_for(self.manager.phase());
        info!(
            target: "game",
            "Runner ready (high score {})",
            format_score(self.manager.state().high_score())
        );
    }

    fn update(&mut self, ctx: &mut GlobalContext) {
        let dt = ctx.delta_seconds;
        let actions = ctx.message_bus.read::<RunnerAction>().to_vec();
        let axis = ctx
            .message_bus
            .latest::<HorizontalAxis>()
            .map_or(0.0, |axis| axis.0);

        self.apply_menu_actions(ctx, &actions);

        if self.manager.is_playing() {
            self.drive_player(&actions, axis, dt);
        }

        self.resolve_contacts(ctx);
        self.manager.tick(dt);

        let context = context_for(self.manager.phase());
        if ctx.input_context != context {
            debug!(target: "game", "Phase {:?} -> {:?}", self.manager.phase(), context);
            ctx.input_context = context;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::capabilities::{ContactPhase, Surface};
    use crate::game::mocks::{MapStore, RecordingDisplay, RecordingReporter, ScriptedStage};

    type TestRunner = Runner<RecordingDisplay, MapStore, RecordingReporter, ScriptedStage>;

    const DT: f32 = 0.1;

    fn runner() -> TestRunner {
        Runner::new(
            &RunnerConfig::default(),
            RecordingDisplay::default(),
            MapStore::default(),
            RecordingReporter::default(),
            ScriptedStage::default(),
        )
    }

    /// Runs one update the way the orchestrator would after input.
    fn frame(runner: &mut TestRunner, ctx: &mut GlobalContext, actions: &[RunnerAction], axis: f32) {
        ctx.message_bus.clear_all();
        ctx.message_bus.extend(actions.iter().copied());
        ctx.message_bus.push(HorizontalAxis(axis));
        ctx.delta_seconds = DT;
        runner.update(ctx);
    }

    fn ground(phase: ContactPhase) -> ContactEvent {
        ContactEvent::new(Surface::Ground, phase)
    }

    fn obstacle(phase: ContactPhase) -> ContactEvent {
        ContactEvent::new(Surface::Obstacle, phase)
    }

    /// Started and standing on the ground.
    fn running() -> (TestRunner, GlobalContext) {
        let mut runner = runner();
        let mut ctx = GlobalContext::new();
        runner.start(&mut ctx);
        runner.stage.queue(vec![ground(ContactPhase::Begin)]);
        frame(&mut runner, &mut ctx, &[RunnerAction::Start], 0.0);
        (runner, ctx)
    }

    //=====================================================================
    // Title Screen
    //=====================================================================

    #[test]
    fn nothing_moves_before_start() {
        let mut runner = runner();
        let mut ctx = GlobalContext::new();
        runner.start(&mut ctx);

        frame(&mut runner, &mut ctx, &[], 1.0);

        assert!(runner.stage.advances.is_empty());
        assert!(!runner.stage.spawning);
        assert_eq!(runner.manager().phase(), GamePhase::NotStarted);
        assert_eq!(ctx.input_context, InputContext::Menu);
    }

    #[test]
    fn start_begins_a_run() {
        let (runner, ctx) = running();

        assert_eq!(runner.manager().phase(), GamePhase::Playing);
        assert_eq!(runner.stage.resets, 1);
        assert!(runner.stage.spawning);
        assert_eq!(runner.stage.advances, vec![(5.0, DT)]);
        assert_eq!(ctx.input_context, InputContext::Running);
        assert!(runner.player().is_grounded());
        assert_eq!(
            ctx.message_bus.read::<PlayerEvent>(),
            &[PlayerEvent::GroundedChanged(true)]
        );
    }

    #[test]
    fn quit_requests_exit() {
        let mut runner = runner();
        let mut ctx = GlobalContext::new();

        frame(&mut runner, &mut ctx, &[RunnerAction::Quit], 0.0);

        assert!(ctx.exit_requested());
    }

    //=====================================================================
    // Playing
    //=====================================================================

    #[test]
    fn grounded_jump_is_accepted() {
        let (mut runner, mut ctx) = running();

        frame(&mut runner, &mut ctx, &[RunnerAction::Jump], 0.0);

        let display = runner.manager().display();
        assert_eq!(display.triggers, vec![AnimationTrigger::Jump]);
        assert_eq!(display.cues, vec![SoundCue::Jump]);
        assert_eq!(runner.stage.commands.last().and_then(|c| c.jump_velocity), Some(8.0));
    }

    #[test]
    fn airborne_jump_is_refused() {
        let mut runner = runner();
        let mut ctx = GlobalContext::new();
        frame(&mut runner, &mut ctx, &[RunnerAction::Start], 0.0);

        frame(&mut runner, &mut ctx, &[RunnerAction::Jump], 0.0);

        assert!(runner.manager().display().triggers.is_empty());
        assert_eq!(runner.stage.commands.last().and_then(|c| c.jump_velocity), None);
    }

    #[test]
    fn axis_sets_horizontal_velocity() {
        let (mut runner, mut ctx) = running();

        frame(&mut runner, &mut ctx, &[], -1.0);

        let command = runner.stage.commands.last().copied().unwrap();
        assert_eq!(command.horizontal_velocity, -5.0);
        assert_eq!(command.gravity_scale, 0.0);
    }

    #[test]
    fn grounded_flag_is_mirrored() {
        let (mut runner, mut ctx) = running();

        frame(&mut runner, &mut ctx, &[], 0.0);
        assert!(runner.manager().display().flag(AnimationFlag::Grounded));

        runner.stage.queue(vec![ground(ContactPhase::End)]);
        frame(&mut runner, &mut ctx, &[], 0.0);
        frame(&mut runner, &mut ctx, &[], 0.0);
        assert!(!runner.manager().display().flag(AnimationFlag::Grounded));
    }

    #[test]
    fn score_ticks_while_playing() {
        let (mut runner, mut ctx) = running();

        frame(&mut runner, &mut ctx, &[], 0.0);

        assert!(runner.manager().state().score() > 0.0);
        assert!(runner.manager().state().speed() > 5.0);
    }

    //=====================================================================
    // Game Over
    //=====================================================================

    #[test]
    fn obstacle_hit_ends_the_game() {
        let (mut runner, mut ctx) = running();
        runner.stage.queue(vec![obstacle(ContactPhase::Begin)]);

        frame(&mut runner, &mut ctx, &[], 0.0);

        assert_eq!(runner.manager().phase(), GamePhase::GameOver);
        assert!(!runner.stage.spawning);
        assert_eq!(runner.manager().display().cues, vec![SoundCue::GameOver]);
        assert_eq!(runner.manager().reporter().reports.len(), 1);
        assert_eq!(ctx.message_bus.read::<PlayerEvent>(), &[PlayerEvent::ObstacleHit]);
        assert_eq!(ctx.input_context, InputContext::GameOver);
    }

    #[test]
    fn lingering_contact_does_not_end_twice() {
        let (mut runner, mut ctx) = running();
        runner.stage.queue(vec![obstacle(ContactPhase::Begin)]);
        runner.stage.queue(vec![obstacle(ContactPhase::Stay)]);

        frame(&mut runner, &mut ctx, &[], 0.0);
        let advances = runner.stage.advances.len();
        frame(&mut runner, &mut ctx, &[], 0.0);

        assert_eq!(runner.manager().display().cues, vec![SoundCue::GameOver]);
        assert_eq!(runner.manager().reporter().reports.len(), 1);
        assert_eq!(runner.stage.advances.len(), advances, "stage frozen after game over");
    }

    #[test]
    fn retry_starts_a_new_run() {
        let (mut runner, mut ctx) = running();
        runner.stage.queue(vec![obstacle(ContactPhase::Begin)]);
        frame(&mut runner, &mut ctx, &[], 0.0);

        frame(&mut runner, &mut ctx, &[RunnerAction::Retry], 0.0);

        assert_eq!(runner.manager().phase(), GamePhase::Playing);
        assert_eq!(runner.stage.resets, 2);
        assert!(runner.stage.spawning);
        assert!(!runner.player().is_grounded());
        assert_eq!(ctx.input_context, InputContext::Running);
    }

    //=====================================================================
    // End to End (orchestrator + headless track)
    //=====================================================================

    mod end_to_end {
        use super::*;
        use crate::core::input::{InputEvent, KeyCode};
        use crate::core::CoreSystemsOrchestrator;
        use crate::services::HeadlessTrack;

        type Game = Runner<RecordingDisplay, MapStore, RecordingReporter, HeadlessTrack>;

        const STEP: f32 = 1.0 / 60.0;

        fn game() -> CoreSystemsOrchestrator<Game> {
            CoreSystemsOrchestrator::new(Runner::new(
                &RunnerConfig::default(),
                RecordingDisplay::default(),
                MapStore::default(),
                RecordingReporter::default(),
                HeadlessTrack::default(),
            ))
        }

        fn press(game: &mut CoreSystemsOrchestrator<Game>, key: KeyCode) {
            game.push_input(vec![InputEvent::KeyDown(key)]);
            game.step(STEP);
        }

        #[test]
        fn idle_player_crashes_and_records_high_score() {
            let mut game = game();
            press(&mut game, KeyCode::Enter);
            assert!(game.simulation().manager().is_playing());

            let mut ticks = 0;
            while game.simulation().manager().is_playing() && ticks < 1000 {
                game.step(STEP);
                ticks += 1;
            }
            for _ in 0..30 {
                game.step(STEP);
            }

            let manager = game.simulation().manager();
            assert_eq!(manager.phase(), GamePhase::GameOver);
            assert_eq!(game.context().input_context, InputContext::GameOver);

            let reports = &manager.reporter().reports;
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0], (manager.state().score().floor() as u32, 2));
            assert!(reports[0].0 > 0);

            let stored = manager.persistence().values.get("hiscore").copied();
            assert_eq!(stored, Some(manager.state().high_score()));

            press(&mut game, KeyCode::KeyR);
            let runner = game.simulation();
            assert!(runner.manager().is_playing());
            assert_eq!(runner.stage().obstacle_count(), 0);
        }

        #[test]
        fn autopilot_clears_obstacles() {
            let mut game = game();
            press(&mut game, KeyCode::Enter);

            let mut space_held = false;
            for _ in 0..1200 {
                let runner = game.simulation();
                let speed = runner.manager().state().speed();
                let close = runner
                    .stage()
                    .next_obstacle_distance()
                    .is_some_and(|d| d <= speed * 0.2);
                let can_jump = close && runner.player().is_grounded();

                if space_held {
                    game.push_input(vec![InputEvent::KeyUp(KeyCode::Space)]);
                    space_held = false;
                } else if can_jump {
                    game.push_input(vec![InputEvent::KeyDown(KeyCode::Space)]);
                    space_held = true;
                }
                game.step(STEP);
            }

            let runner = game.simulation();
            assert!(runner.manager().is_playing(), "autopilot crashed");
            assert!(runner.stage().obstacles_passed() >= 5);
            assert!(runner.manager().display().triggers.len() >= 5);
            assert!(runner.manager().reporter().reports.is_empty());
        }
    }
}

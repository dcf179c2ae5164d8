//=========================================================================
// Game State Machine
//
// Phases and transitions of a run, plus the score and high-score
// lifecycle.
//
// ```text
//   NotStarted ──start_game()──> Playing ──game_over()──> GameOver
//                                  ↑  │                      │
//                                  │  └──tick(dt)──┘         │
//                                  └─────retry_game()────────┘
// ```
//
// Invalid transitions are ignored (return `false`), never errors.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::capabilities::{AnimationFlag, Display, Element, Persistence, ScoreReporter};
use super::score::{final_score, format_score};
use crate::config::RunnerConfig;

//=== Constants ===========================================================

/// Speed gained per second of play.
pub const SPEED_INCREASE_RATE: f32 = 0.1;

//=== GamePhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    NotStarted,
    Playing,
    GameOver,
}

//=== GameState ===========================================================

/// Plain data of a session. Mutated only through [`GameManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    started: bool,
    over: bool,
    score: f32,
    speed: f32,
    high_score: f32,
    final_score_reported: bool,
}

impl GameState {
    fn new(high_score: f32) -> Self {
        Self {
            started: false,
            over: false,
            score: 0.0,
            speed: 0.0,
            high_score,
            final_score_reported: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match (self.started, self.over) {
            (false, _) => GamePhase::NotStarted,
            (true, false) => GamePhase::Playing,
            (true, true) => GamePhase::GameOver,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn high_score(&self) -> f32 {
        self.high_score
    }

    pub fn final_score_reported(&self) -> bool {
        self.final_score_reported
    }
}

//=== GameManager =========================================================

/// Owns the session state and its output collaborators.
///
/// Exactly one manager exists per run of the application; it is created
/// with every collaborator it needs, so a missing display or store is a
/// construction-time error rather than a runtime one.
pub struct GameManager<D: Display, P: Persistence, R: ScoreReporter> {
    state: GameState,
    initial_speed: f32,
    game_id: u32,
    high_score_key: String,
    display: D,
    persistence: P,
    reporter: R,
}

impl<D: Display, P: Persistence, R: ScoreReporter> GameManager<D, P, R> {
    //--- Construction -----------------------------------------------------

    /// Applies the title-screen presentation and shows the stored high score.
    pub fn new(config: &RunnerConfig, mut display: D, persistence: P, reporter: R) -> Self {
        let high_score = stored_high_score(&persistence, &config.high_score_key);

        display.set_animation_flag(AnimationFlag::GameStarted, false);
        display.set_visible(Element::GameStartText, true);
        display.set_visible(Element::StartButton, true);
        display.set_visible(Element::GameOverText, false);
        display.set_visible(Element::RetryButton, false);
        display.set_visible(Element::JumpButton, false);
        display.set_high_score_text(&format_score(high_score));

        debug!(target: "game", "Loaded high score {}", format_score(high_score));

        Self {
            state: GameState::new(high_score),
            initial_speed: config.initial_speed,
            game_id: config.game_id,
            high_score_key: config.high_score_key.clone(),
            display,
            persistence,
            reporter,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// `NotStarted → Playing`. Ignored once the game has started.
    pub fn start_game(&mut self) -> bool {
        if self.state.started {
            debug!(target: "game", "Start ignored: game already started");
            return false;
        }

        self.state.started = true;
        self.display.set_visible(Element::GameStartText, false);
        self.new_game();

        info!(target: "game", "Game started (speed {})", self.state.speed);
        true
    }

    /// `GameOver → Playing`. Ignored unless the game is over.
    pub fn retry_game(&mut self) -> bool {
        if !self.state.over {
            debug!(target: "game", "Retry ignored: game is not over");
            return false;
        }

        self.new_game();

        info!(target: "game", "Game restarted");
        true
    }

    /// Advances speed and score by `dt` seconds while playing.
    ///
    /// Returns `false` (and changes nothing) when not playing or when `dt`
    /// is not a positive finite number.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            trace!(target: "game", "Tick skipped: dt = {}", dt);
            return false;
        }
        if self.state.phase() != GamePhase::Playing {
            return false;
        }

        self.state.speed += SPEED_INCREASE_RATE * dt;
        self.state.score += self.state.speed * dt;
        self.display.set_score_text(&format_score(self.state.score));
        true
    }

    /// `Playing → GameOver`: freezes speed, updates the high score and
    /// reports the final score once.
    ///
    /// Ignored before the first start and while already over.
    pub fn game_over(&mut self) -> bool {
        match self.state.phase() {
            GamePhase::NotStarted => {
                debug!(target: "game", "Game over ignored: game not started");
                return false;
            }
            GamePhase::GameOver => {
                debug!(target: "game", "Game over ignored: already over");
                return false;
            }
            GamePhase::Playing => {}
        }

        self.state.speed = 0.0;
        self.state.over = true;

        self.display.set_animation_flag(AnimationFlag::GameOver, true);
        self.display.set_visible(Element::GameOverText, true);
        self.display.set_visible(Element::RetryButton, true);
        self.display.set_visible(Element::JumpButton, false);

        self.update_high_score();
        self.report_final_score();

        info!(
            target: "game",
            "Game over: score {} (best {})",
            format_score(self.state.score),
            format_score(self.state.high_score)
        );
        true
    }

    //--- Internal Helpers -------------------------------------------------

    fn new_game(&mut self) {
        self.state.speed = self.initial_speed;
        self.state.score = 0.0;
        self.state.over = false;
        self.state.final_score_reported = false;

        self.display.set_visible(Element::GameOverText, false);
        self.display.set_visible(Element::RetryButton, false);
        self.display.set_visible(Element::JumpButton, true);
        self.display.set_visible(Element::StartButton, false);
        self.display.set_animation_flag(AnimationFlag::GameOver, false);
        self.display.set_animation_flag(AnimationFlag::GameStarted, true);
        self.display.set_score_text(&format_score(0.0));
    }

    fn update_high_score(&mut self) {
        let mut high_score = stored_high_score(&self.persistence, &self.high_score_key);

        if self.state.score > high_score {
            high_score = self.state.score;
            self.persistence.set_float(&self.high_score_key, high_score);
            info!(target: "game", "New high score {}", format_score(high_score));
        }

        self.state.high_score = high_score;
        self.display.set_high_score_text(&format_score(high_score));
    }

    fn report_final_score(&mut self) {
        if self.state.final_score_reported {
            return;
        }
        self.state.final_score_reported = true;
        self.reporter
            .report_score(final_score(self.state.score), self.game_id);
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase() == GamePhase::Playing
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Lets the runner route player effects (grounded flag, jump cues) to
    /// the same display.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

/// Stored high score; corrupt values (NaN, infinite, negative) read as 0.
fn stored_high_score<P: Persistence>(persistence: &P, key: &str) -> f32 {
    let value = persistence.get_float(key, 0.0);
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(target: "game", "Ignoring stored high score {}", value);
        0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

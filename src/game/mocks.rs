//=========================================================================
// Recording Test Doubles
//=========================================================================

use std::collections::{HashMap, VecDeque};

use super::capabilities::*;

//=== Display =============================================================

#[derive(Debug, Default)]
pub(crate) struct RecordingDisplay {
    pub score_text: String,
    pub high_score_text: String,
    pub score_updates: usize,
    pub visible: HashMap<Element, bool>,
    pub flags: HashMap<AnimationFlag, bool>,
    pub triggers: Vec<AnimationTrigger>,
    pub cues: Vec<SoundCue>,
}

impl RecordingDisplay {
    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.get(&element).copied().unwrap_or(false)
    }

    pub fn flag(&self, flag: AnimationFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }
}

impl Display for RecordingDisplay {
    fn set_score_text(&mut self, text: &str) {
        self.score_text = text.to_string();
        self.score_updates += 1;
    }

    fn set_high_score_text(&mut self, text: &str) {
        self.high_score_text = text.to_string();
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        self.visible.insert(element, visible);
    }

    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool) {
        self.flags.insert(flag, value);
    }

    fn trigger_animation(&mut self, trigger: AnimationTrigger) {
        self.triggers.push(trigger);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

//=== Persistence =========================================================

#[derive(Debug, Default)]
pub(crate) struct MapStore {
    pub values: HashMap<String, f32>,
    pub writes: usize,
}

impl MapStore {
    pub fn with(key: &str, value: f32) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl Persistence for MapStore {
    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }
}

//=== Reporter ============================================================

#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub reports: Vec<(u32, u32)>,
}

impl ScoreReporter for RecordingReporter {
    fn report_score(&mut self, score: u32, game_id: u32) {
        self.reports.push((score, game_id));
    }
}

//=== Stage ===============================================================

/// Stage that replays queued contacts and records what it was told.
#[derive(Debug, Default)]
pub(crate) struct ScriptedStage {
    pub pending: VecDeque<Vec<ContactEvent>>,
    pub commands: Vec<PlayerCommand>,
    pub advances: Vec<(f32, f32)>,
    pub resets: usize,
    pub spawning: bool,
}

impl ScriptedStage {
    /// Queues the contacts reported on the next drain.
    pub fn queue(&mut self, contacts: Vec<ContactEvent>) {
        self.pending.push_back(contacts);
    }
}

impl CollisionSource for ScriptedStage {
    fn drain_contacts(&mut self, out: &mut Vec<ContactEvent>) {
        if let Some(batch) = self.pending.pop_front() {
            out.extend(batch);
        }
    }
}

impl Stage for ScriptedStage {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn set_spawning(&mut self, enabled: bool) {
        self.spawning = enabled;
    }

    fn drive_player(&mut self, command: &PlayerCommand) {
        self.commands.push(*command);
    }

    fn advance(&mut self, speed: f32, dt: f32) {
        self.advances.push((speed, dt));
    }
}

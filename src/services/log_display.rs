//=========================================================================
// Log Display
//=========================================================================
//
// `Display` that renders to the log. Text and toggles are remembered so
// only changes are written: the score text is set every tick, but logged
// only when the shown digits change.
//
//=========================================================================

use std::collections::HashMap;

use log::{debug, info, trace};

use crate::game::{AnimationFlag, AnimationTrigger, Display, Element, SoundCue};

#[derive(Debug, Default)]
pub struct LogDisplay {
    score_text: String,
    high_score_text: String,
    visible: HashMap<Element, bool>,
    flags: HashMap<AnimationFlag, bool>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn high_score_text(&self) -> &str {
        &self.high_score_text
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.get(&element).copied().unwrap_or(false)
    }

    pub fn flag(&self, flag: AnimationFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }
}

/// Stores `value` in `slot`, returning whether it changed.
fn replace_text(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    slot.clear();
    slot.push_str(value);
    true
}

impl Display for LogDisplay {
    fn set_score_text(&mut self, text: &str) {
        if replace_text(&mut self.score_text, text) {
            trace!(target: "game", "Score {}", text);
        }
    }

    fn set_high_score_text(&mut self, text: &str) {
        if replace_text(&mut self.high_score_text, text) {
            info!(target: "game", "High score {}", text);
        }
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if self.visible.insert(element, visible) != Some(visible) {
            debug!(target: "game", "{:?} {}", element, if visible { "shown" } else { "hidden" });
        }
    }

    fn set_animation_flag(&mut self, flag: AnimationFlag, value: bool) {
        if self.flags.insert(flag, value) != Some(value) {
            debug!(target: "game", "Animation {:?} = {}", flag, value);
        }
    }

    fn trigger_animation(&mut self, trigger: AnimationTrigger) {
        debug!(target: "game", "Animation trigger {:?}", trigger);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        debug!(target: "game", "Sound cue {:?}", cue);
    }
}

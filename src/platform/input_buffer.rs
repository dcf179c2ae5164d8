//=========================================================================
// Input Buffer
//
// Collects input events between two redraws on the platform thread.
//
// Responsibilities:
// - Keep events in arrival order
// - Drop consecutive duplicates (OS key repeat floods)
// - Hand the whole frame over in one `drain()`
//
//=========================================================================

use crate::core::input::event::InputEvent;

/// Transient per-frame event store.
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    /// Appends an event unless it repeats the previous one.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Takes this frame's events; `None` when nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.events))
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

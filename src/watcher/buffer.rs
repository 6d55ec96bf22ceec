//! Bounded input buffering shared by every watcher variant.

use crate::input::{ButtonCombo, Direction, InputFrame};
use crate::moves::MoveTemplate;
use std::collections::VecDeque;
use std::time::Instant;

/// Recent direction tokens and the current button combo of one watcher.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    dpad: VecDeque<Direction>,
    capacity: usize,
    button: Option<ButtonCombo>,
    /// Time of the latest direction append.
    dpad_stamp: Option<Instant>,
    /// Start of the current button-hold window.
    button_stamp: Option<Instant>,
}

impl InputBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            dpad: VecDeque::with_capacity(capacity),
            capacity,
            button: None,
            dpad_stamp: None,
            button_stamp: None,
        }
    }

    /// Buffer one frame: directions are appended (oldest evicted past capacity), buttons
    /// are joined into a combo that replaces the previous one.
    pub fn ingest(&mut self, frame: &InputFrame, now: Instant) {
        for direction in frame.directions() {
            if self.dpad.len() == self.capacity {
                self.dpad.pop_front();
            }
            self.dpad.push_back(direction);
            self.dpad_stamp = Some(now);
        }

        if let Some(combo) = frame.button_combo() {
            self.button = Some(combo);
            self.button_stamp.get_or_insert(now);
        }
    }

    pub fn clear(&mut self) {
        self.dpad.clear();
        self.button = None;
        self.dpad_stamp = None;
        self.button_stamp = None;
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.dpad.iter().copied()
    }

    pub fn dpad_len(&self) -> usize {
        self.dpad.len()
    }

    pub fn has_directions(&self) -> bool {
        !self.dpad.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn button(&self) -> Option<&ButtonCombo> {
        self.button.as_ref()
    }

    /// The buffered combo is allowed by the template and was pressed no earlier than the
    /// last buffered direction.
    pub fn action_pressed(&self, template: &MoveTemplate) -> bool {
        let Some(combo) = &self.button else {
            return false;
        };
        if template.buttons().is_none() {
            return false;
        }

        // An unset stamp behaves as the zero time.
        let pressed_after_dpad = match (self.button_stamp, self.dpad_stamp) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(button), Some(dpad)) => button >= dpad,
        };

        pressed_after_dpad && template.allows_combo(combo)
    }

    /// Every direction of the pattern occurs somewhere in the buffer, in any order.
    pub fn all_directions_present(&self, pattern: &[Direction]) -> bool {
        pattern.iter().all(|required| self.dpad.contains(required))
    }

    /// Replays the buffer oldest first, advancing through `pattern` greedily; the
    /// pattern is executed when every step was matched in order. Unrelated tokens may sit
    /// between steps, and a repeated step needs a repeated buffer entry.
    pub fn executed(&self, pattern: &[Direction]) -> bool {
        let mut expected = 0;
        for direction in &self.dpad {
            if pattern.get(expected) == Some(direction) {
                expected += 1;
            }
        }
        expected == pattern.len()
    }
}

//! Event types delivered to recognition listeners.

use crate::input::ButtonCombo;
use crate::moves::MoveId;
use std::borrow::Borrow;
use std::fmt;

/// Logical player (input slot) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle back to the watcher that produced an event, usable with the recognizer's
/// per-watcher operations (reset, enable, invert).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatcherRef {
    pub player: PlayerId,
    pub move_id: MoveId,
}

/// One recognized move, alive only inside a single tick's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedMove {
    pub player: PlayerId,
    pub move_id: MoveId,
    pub button_combo: ButtonCombo,
    pub watcher: WatcherRef,
}

impl RecognizedMove {
    pub fn new(player: PlayerId, move_id: MoveId, button_combo: ButtonCombo) -> Self {
        let watcher = WatcherRef {
            player: player.clone(),
            move_id: move_id.clone(),
        };
        Self {
            player,
            move_id,
            button_combo,
            watcher,
        }
    }
}

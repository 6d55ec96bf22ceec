//! Per-player move watchers.
//!
//! A [`Watcher`] tracks progress toward one configured move for one player. It is a
//! shared core (effective template copy, enable/running flags, [`InputBuffer`], expiry
//! slot) plus a recognition [`Strategy`] picked from the template's kind:
//!
//! - [`Strategy::Sequence`]: ordered directional pattern gated by a button combo.
//! - [`Strategy::Charge`]: hold a direction for the charge time, then the release pattern.
//!
//! Watchers are driven by frames and a caller-supplied monotonic clock. Every call first
//! fires the timers that are due at `now` (in deadline order), then handles the frame.

pub mod buffer;
pub mod charge;
pub mod sequence;
pub mod timer;

pub use buffer::InputBuffer;
pub use charge::ChargeStrategy;
pub use sequence::SequenceStrategy;
pub use timer::TimerSlot;

use crate::config::DEFAULT_DPAD_CAPACITY;
use crate::input::{ButtonCombo, Direction, InputFrame};
use crate::moves::{invert, InvertMode, MoveId, MoveKind, MoveTemplate};
use std::time::Instant;

/// State shared by every recognition strategy.
#[derive(Debug, Clone)]
pub struct WatcherCore {
    pub(crate) template: MoveTemplate,
    pub(crate) running: bool,
    pub(crate) buffer: InputBuffer,
    pub(crate) expiry: TimerSlot,
}

impl WatcherCore {
    /// Restart the expiry window, cancelling the pending one. No-op on an empty buffer.
    pub(crate) fn restart_expiry(&mut self, now: Instant) {
        if self.buffer.has_directions() {
            self.expiry.schedule(now, self.template.timeout());
        }
    }

    /// Arm the expiry window unless one is already pending. No-op on an empty buffer.
    pub(crate) fn arm_expiry(&mut self, now: Instant) {
        if self.buffer.has_directions() {
            self.expiry.schedule_if_idle(now, self.template.timeout());
        }
    }
}

/// Recognition algorithm of a watcher.
#[derive(Debug, Clone)]
pub enum Strategy {
    Sequence(SequenceStrategy),
    Charge(ChargeStrategy),
}

impl Strategy {
    fn for_kind(kind: MoveKind) -> Self {
        match kind {
            MoveKind::Sequence => Strategy::Sequence(SequenceStrategy),
            MoveKind::Charge {
                charge_time,
                charge_index,
            } => Strategy::Charge(ChargeStrategy::new(charge_time, charge_index)),
        }
    }
}

/// Stateful tracker of one player's progress toward one move.
#[derive(Debug, Clone)]
pub struct Watcher {
    core: WatcherCore,
    strategy: Strategy,
    enabled: bool,
}

impl Watcher {
    /// Fresh watcher copied from `template` with the default buffer capacity.
    pub fn from_template(template: &MoveTemplate) -> Self {
        Self::with_capacity(template, DEFAULT_DPAD_CAPACITY)
    }

    /// Fresh watcher copied from `template`. Buffers and timers always start empty.
    pub fn with_capacity(template: &MoveTemplate, dpad_capacity: usize) -> Self {
        Self {
            core: WatcherCore {
                template: template.clone(),
                running: false,
                buffer: InputBuffer::new(dpad_capacity),
                expiry: TimerSlot::new(),
            },
            strategy: Strategy::for_kind(template.kind()),
            enabled: true,
        }
    }

    pub fn move_id(&self) -> &MoveId {
        self.core.template.id()
    }

    /// The watcher's own template copy, including any inversion applied to it.
    pub fn template(&self) -> &MoveTemplate {
        &self.core.template
    }

    pub fn dpad(&self) -> &[Direction] {
        self.core.template.dpad()
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled watchers ignore frames and timers entirely; buffered state is kept.
    ///
    /// Deadlines are not paused. An expiry that came due while the watcher was disabled
    /// fires on the first call after re-enabling, which clears the partial input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_running(&self) -> bool {
        self.core.running
    }

    /// Charge completed and not yet consumed or forfeited. Always false for sequences.
    pub fn is_charged(&self) -> bool {
        match &self.strategy {
            Strategy::Charge(charge) => charge.is_charged(),
            Strategy::Sequence(_) => false,
        }
    }

    pub fn buffered_directions(&self) -> Vec<Direction> {
        self.core.buffer.directions().collect()
    }

    pub fn buffered_combo(&self) -> Option<&ButtonCombo> {
        self.core.buffer.button()
    }

    pub fn has_pending_expiry(&self) -> bool {
        self.core.expiry.is_pending()
    }

    pub fn has_pending_charge(&self) -> bool {
        match &self.strategy {
            Strategy::Charge(charge) => charge.timer().is_pending(),
            Strategy::Sequence(_) => false,
        }
    }

    /// Fire every timer due at `now`, earliest first.
    pub fn advance(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }

        loop {
            let expiry_due = self.core.expiry.due(now);
            let charge_due = match &self.strategy {
                Strategy::Charge(charge) => charge.timer().due(now),
                Strategy::Sequence(_) => None,
            };

            let fire_charge = match (expiry_due, charge_due) {
                (None, None) => break,
                (Some(expiry), Some(charge)) => charge < expiry,
                (Some(_), None) => false,
                (None, Some(_)) => true,
            };

            if fire_charge {
                if let Strategy::Charge(charge) = &mut self.strategy {
                    charge.on_charge_timer(&mut self.core, now);
                }
            } else if self.core.expiry.take_if_due(now).is_some() {
                match &mut self.strategy {
                    Strategy::Sequence(sequence) => sequence.on_expiry(&mut self.core),
                    Strategy::Charge(charge) => charge.on_expiry(&mut self.core),
                }
            }
        }
    }

    /// Feed one tick's frame. Returns the button combo that completed the move, if the
    /// move was recognized on this tick.
    pub fn observe(&mut self, frame: &InputFrame, now: Instant) -> Option<ButtonCombo> {
        if !self.enabled {
            return None;
        }

        self.advance(now);
        if self.core.running {
            return None;
        }

        match &mut self.strategy {
            Strategy::Sequence(sequence) => sequence.on_frame(&mut self.core, frame, now),
            Strategy::Charge(charge) => charge.on_frame(&mut self.core, frame, now),
        }
    }

    /// Cancel both timers and clear buffers, `running` and any charge.
    pub fn reset(&mut self) {
        self.core.expiry.cancel();
        self.core.buffer.clear();
        self.core.running = false;
        if let Strategy::Charge(charge) = &mut self.strategy {
            charge.reset();
        }
    }

    /// Rewrite this watcher's effective pattern; the shared template is untouched.
    pub fn invert(&mut self, mode: InvertMode) {
        let inverted = invert(self.core.template.dpad(), mode);
        self.core.template = self.core.template.with_dpad(inverted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveConfig;
    use std::time::Duration;
    use Direction::*;

    fn hadouken() -> Watcher {
        let config = MoveConfig::sequence([Down, DownRight, Right]).with_buttons(["ButtonB"]);
        Watcher::from_template(&MoveTemplate::from_config("hadouken", &config).unwrap())
    }

    fn frame(text: &str) -> InputFrame {
        text.parse().unwrap()
    }

    #[test]
    fn copies_are_independent() {
        let mut first = hadouken();
        let second = first.clone();
        first.observe(&frame("Down"), Instant::now());

        assert_eq!(first.buffered_directions(), vec![Down]);
        assert!(second.buffered_directions().is_empty());
    }

    #[test]
    fn disabled_watcher_ignores_frames_and_keeps_state() {
        let start = Instant::now();
        let mut watcher = hadouken();
        watcher.observe(&frame("Down"), start);
        watcher.set_enabled(false);

        assert_eq!(watcher.observe(&frame("DownRight"), start + Duration::from_millis(16)), None);
        watcher.observe(&frame(""), start + Duration::from_millis(32));
        assert_eq!(watcher.buffered_directions(), vec![Down]);
        assert!(!watcher.has_pending_expiry());

        watcher.set_enabled(true);
        watcher.observe(&frame("DownRight"), start + Duration::from_millis(48));
        assert_eq!(watcher.buffered_directions(), vec![Down, DownRight]);
    }

    #[test]
    fn overdue_expiry_fires_after_re_enabling() {
        let start = Instant::now();
        let mut watcher = hadouken();
        watcher.observe(&frame("Down"), start);
        watcher.observe(&frame(""), start + Duration::from_millis(16));
        watcher.set_enabled(false);

        let late = start + Duration::from_millis(600);
        watcher.advance(late);
        assert_eq!(watcher.buffered_directions(), vec![Down]);
        assert!(watcher.has_pending_expiry());

        watcher.set_enabled(true);
        watcher.advance(late);
        assert!(watcher.buffered_directions().is_empty());
        assert!(!watcher.has_pending_expiry());
    }

    #[test]
    fn each_deadline_fires_once() {
        let start = Instant::now();
        let mut watcher = hadouken();
        watcher.observe(&frame("Down"), start);
        watcher.observe(&frame(""), start + Duration::from_millis(16));

        let due = start + Duration::from_millis(16 + 250);
        watcher.advance(due);
        assert!(!watcher.has_pending_expiry());

        watcher.observe(&frame("Down"), due);
        watcher.advance(due);
        assert_eq!(watcher.buffered_directions(), vec![Down]);
    }

    #[test]
    fn invert_rewrites_only_the_copy() {
        let config = MoveConfig::sequence([Down, DownRight, Right]).with_buttons(["ButtonB"]);
        let template = MoveTemplate::from_config("hadouken", &config).unwrap();
        let mut watcher = Watcher::from_template(&template);

        watcher.invert(InvertMode::X);

        assert_eq!(watcher.dpad(), &[Down, DownLeft, Left]);
        assert_eq!(template.dpad(), &[Down, DownRight, Right]);
    }

    #[test]
    fn reset_clears_running_and_timers() {
        let start = Instant::now();
        let mut watcher = hadouken();
        for (tick, text) in ["Down", "DownRight", "Right", "ButtonB"].iter().enumerate() {
            watcher.observe(&frame(text), start + Duration::from_millis(tick as u64 * 16));
        }
        assert!(watcher.is_running());
        assert!(watcher.has_pending_expiry());

        watcher.reset();

        assert!(!watcher.is_running());
        assert!(!watcher.has_pending_expiry());
        assert!(watcher.buffered_directions().is_empty());
        assert!(watcher.buffered_combo().is_none());
    }
}

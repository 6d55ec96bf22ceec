//! Charge recognition: hold a direction for the charge time, then perform the release
//! pattern with an allowed combo.
//!
//! While uncharged, any frame whose primary token does not hold the charge direction
//! (including a neutral frame) breaks the hold: both timers are cancelled and the
//! buffer is dropped, so charging restarts from zero. Once charged, frames that move
//! away from the hold direction are evaluated like a sequence. A release that stalls
//! for the whole expiry window forfeits the charge, whether the stall is neutral frames
//! or frames that keep holding the charge direction.
//!
//! Every hold frame restarts the charge timer, so callers must deliver a frame only when
//! the player's input changes; a held direction is one frame followed by
//! [`Watcher::advance`](crate::watcher::Watcher::advance) calls. Once charged, a player who
//! keeps holding without producing new frames stays charged: completing the charge
//! cancels the expiry window, and only the next delivered frame arms it again.

use crate::input::{ButtonCombo, Direction, InputFrame};
use crate::watcher::{TimerSlot, WatcherCore};
use std::time::{Duration, Instant};

/// Hold-then-release recognition.
///
/// Expects change-only delivery: feeding the hold direction on every tick keeps
/// restarting the charge timer and never charges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeStrategy {
    charge_time: Duration,
    charge_index: usize,
    charged: bool,
    timer: TimerSlot,
}

impl ChargeStrategy {
    pub fn new(charge_time: Duration, charge_index: usize) -> Self {
        Self {
            charge_time,
            charge_index,
            charged: false,
            timer: TimerSlot::new(),
        }
    }

    pub fn charge_time(&self) -> Duration {
        self.charge_time
    }

    pub fn is_charged(&self) -> bool {
        self.charged
    }

    pub fn timer(&self) -> &TimerSlot {
        &self.timer
    }

    /// Hold direction, read from the watcher's (possibly inverted) pattern.
    fn hold_direction(&self, core: &WatcherCore) -> Option<Direction> {
        core.template.dpad().get(self.charge_index).copied()
    }

    fn holds(&self, core: &WatcherCore, frame: &InputFrame) -> bool {
        let primary = frame.primary().and_then(|token| token.as_direction());
        match (primary, self.hold_direction(core)) {
            (Some(direction), Some(hold)) => direction.covers(hold),
            _ => false,
        }
    }

    pub(crate) fn on_frame(
        &mut self,
        core: &mut WatcherCore,
        frame: &InputFrame,
        now: Instant,
    ) -> Option<ButtonCombo> {
        core.buffer.ingest(frame, now);
        let holding = self.holds(core, frame);

        if !self.charged {
            if holding {
                self.timer.schedule(now, self.charge_time);
            } else {
                self.timer.cancel();
                core.expiry.cancel();
                core.buffer.clear();
            }
            return None;
        }

        if frame.is_empty() || holding {
            core.arm_expiry(now);
            return None;
        }

        let pattern = core.template.dpad();
        if !core.buffer.all_directions_present(pattern) {
            return None;
        }
        let recognized =
            core.buffer.action_pressed(&core.template) && core.buffer.executed(pattern);

        core.arm_expiry(now);
        if !recognized {
            return None;
        }

        core.running = true;
        let combo = core.buffer.button().cloned();
        core.buffer.clear();
        combo
    }

    pub(crate) fn on_charge_timer(&mut self, core: &mut WatcherCore, now: Instant) {
        if self.timer.take_if_due(now).is_none() {
            return;
        }
        self.charged = true;
        core.expiry.cancel();
        log::trace!("{} charged", core.template.id());
    }

    pub(crate) fn on_expiry(&mut self, core: &mut WatcherCore) {
        core.buffer.clear();
        core.running = false;
        self.charged = false;
    }

    pub(crate) fn reset(&mut self) {
        self.timer.cancel();
        self.charged = false;
    }
}

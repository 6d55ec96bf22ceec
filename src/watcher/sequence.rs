//! Sequence recognition: an ordered directional pattern finished by an allowed combo.

use crate::input::{ButtonCombo, InputFrame};
use crate::watcher::WatcherCore;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceStrategy;

impl SequenceStrategy {
    pub(crate) fn on_frame(
        &mut self,
        core: &mut WatcherCore,
        frame: &InputFrame,
        now: Instant,
    ) -> Option<ButtonCombo> {
        core.buffer.ingest(frame, now);

        if frame.is_empty() {
            core.arm_expiry(now);
            return None;
        }

        let pattern = core.template.dpad();
        if !core.buffer.action_pressed(&core.template) || !core.buffer.all_directions_present(pattern)
        {
            return None;
        }
        let executed = core.buffer.executed(pattern);

        core.restart_expiry(now);
        if !executed {
            return None;
        }

        core.running = true;
        core.buffer.button().cloned()
    }

    /// Expiry drops partial progress, and a finished match, once the window closes.
    pub(crate) fn on_expiry(&mut self, core: &mut WatcherCore) {
        if core.buffer.has_directions() {
            core.buffer.clear();
            core.running = false;
        }
    }
}

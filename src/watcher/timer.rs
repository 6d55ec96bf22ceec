use std::time::{Duration, Instant};

/// A single cancellable deadline.
///
/// A slot holds at most one pending deadline, so scheduling always replaces (cancels)
/// whatever was pending before. Deadlines fire when the owner polls with a time at or
/// past them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and arm a new one `after` from `now`.
    pub fn schedule(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Arm only when nothing is pending. Returns whether a deadline was armed.
    pub fn schedule_if_idle(&mut self, now: Instant, after: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.schedule(now, after);
        true
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Pending deadline if it has been reached by `now`.
    pub fn due(&self, now: Instant) -> Option<Instant> {
        self.deadline.filter(|deadline| *deadline <= now)
    }

    /// Disarm and report the deadline when it is due; a slot fires at most once per arm.
    pub fn take_if_due(&mut self, now: Instant) -> Option<Instant> {
        let due = self.due(now)?;
        self.deadline = None;
        Some(due)
    }
}

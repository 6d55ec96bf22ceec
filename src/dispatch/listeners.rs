//! Listener subscriptions for recognized-move batches.

use crate::dispatch::protocol::{PlayerId, RecognizedMove};
use crate::moves::MoveId;

/// Callback receiving `(player, ordered move ids, event batch)` once per tick at most.
pub type MoveListener = Box<dyn FnMut(&PlayerId, &[MoveId], &[RecognizedMove])>;

/// Handle returned by [`ListenerRegistry::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<(Subscription, MoveListener)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerId, &[MoveId], &[RecognizedMove]) + 'static,
    {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Returns false when the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener in subscription order.
    pub fn notify(&mut self, player: &PlayerId, move_ids: &[MoveId], batch: &[RecognizedMove]) {
        for (_, listener) in &mut self.listeners {
            listener(player, move_ids, batch);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

//! Recognition dispatcher.
//!
//! The [`Recognizer`] owns the move template registry, one [`PlayerMoveSet`] per player
//! and the listener subscriptions. Per player and per tick it feeds the frame to every
//! enabled watcher, collects at most one [`RecognizedMove`] per watcher into a batch,
//! and notifies every listener once with the whole batch. The batch never outlives
//! the tick, so a move is delivered at most once.
//!
//! All processing is single-threaded and synchronous: one frame is fully evaluated and
//! flushed before the next is accepted, and timers fire inside the same calls.

pub mod listeners;
pub mod player_set;
pub mod protocol;

pub use listeners::{ListenerRegistry, MoveListener, Subscription};
pub use player_set::PlayerMoveSet;
pub use protocol::{PlayerId, RecognizedMove, WatcherRef};

use crate::config::RecognizerSettings;
use crate::error::{MovewatchError, Result};
use crate::input::InputFrame;
use crate::moves::{InvertMode, MoveConfig, MoveId, MoveRegistry, MoveTemplate};
use crate::watcher::Watcher;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct Recognizer {
    settings: RecognizerSettings,
    registry: MoveRegistry,
    players: HashMap<PlayerId, PlayerMoveSet>,
    listeners: ListenerRegistry,
}

impl Recognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RecognizerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &RecognizerSettings {
        &self.settings
    }

    pub fn registry(&self) -> &MoveRegistry {
        &self.registry
    }

    /// Validate and register a move template.
    ///
    /// An invalid config (unknown kind, missing charge time, ...) registers nothing; the
    /// registry is left exactly as it was and the error is logged and returned.
    pub fn create_move(&mut self, move_id: impl Into<MoveId>, config: &MoveConfig) -> Result<()> {
        let move_id = move_id.into();
        match MoveTemplate::from_config_with(move_id.clone(), config, &self.settings) {
            Ok(template) => {
                log::debug!("Registered {} move {}", config.kind, move_id);
                self.registry.register(template);
                Ok(())
            }
            Err(err) => {
                log::warn!("Ignoring move {}: {}", move_id, err);
                Err(err)
            }
        }
    }

    /// Register an already validated template.
    pub fn register_template(&mut self, template: MoveTemplate) {
        self.registry.register(template);
    }

    pub fn has_move(&self, move_id: &str) -> bool {
        self.registry.contains(move_id)
    }

    pub fn template(&self, move_id: &str) -> Option<&MoveTemplate> {
        self.registry.get(move_id)
    }

    /// Give `player` a fresh watcher copied from the registered template.
    ///
    /// Returns false (and changes nothing) when the move was never registered.
    /// Associating the same move again replaces the player's watcher with a fresh one.
    pub fn add_player_move(&mut self, player: impl Into<PlayerId>, move_id: &str) -> bool {
        let Some(template) = self.registry.get(move_id) else {
            log::debug!("Cannot associate unregistered move {}", move_id);
            return false;
        };

        let watcher = Watcher::with_capacity(template, self.settings.dpad_capacity);
        self.players
            .entry(player.into())
            .or_default()
            .insert(watcher);
        true
    }

    /// Associate every registered move with `player`, in sorted id order.
    pub fn add_all_moves(&mut self, player: impl Into<PlayerId>) -> usize {
        let player = player.into();
        let ids: Vec<String> = self
            .registry
            .ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect();

        let mut added = 0;
        for id in &ids {
            if self.add_player_move(player.clone(), id) {
                added += 1;
            }
        }
        added
    }

    pub fn remove_player_move(&mut self, player: &str, move_id: &str) -> bool {
        self.players
            .get_mut(player)
            .and_then(|moves| moves.remove(move_id))
            .is_some()
    }

    pub fn player_moves(&self, player: &str) -> Option<&PlayerMoveSet> {
        self.players.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.keys()
    }

    pub fn watcher(&self, player: &str, move_id: &str) -> Option<&Watcher> {
        self.players.get(player)?.get(move_id)
    }

    pub fn watcher_mut(&mut self, player: &str, move_id: &str) -> Option<&mut Watcher> {
        self.players.get_mut(player)?.get_mut(move_id)
    }

    pub fn enable_move(&mut self, player: &str, move_id: &str, enabled: bool) -> bool {
        match self.watcher_mut(player, move_id) {
            Some(watcher) => {
                watcher.set_enabled(enabled);
                true
            }
            None => false,
        }
    }

    pub fn enable_all_moves(&mut self, player: &str, enabled: bool) {
        if let Some(moves) = self.players.get_mut(player) {
            moves.set_all_enabled(enabled);
        }
    }

    /// False for unknown players or moves.
    pub fn is_move_enabled(&self, player: &str, move_id: &str) -> bool {
        self.watcher(player, move_id)
            .is_some_and(|watcher| watcher.is_enabled())
    }

    pub fn invert_move(&mut self, player: &str, move_id: &str, mode: InvertMode) -> bool {
        match self.watcher_mut(player, move_id) {
            Some(watcher) => {
                watcher.invert(mode);
                true
            }
            None => false,
        }
    }

    pub fn invert_all_moves(&mut self, player: &str, mode: InvertMode) {
        if let Some(moves) = self.players.get_mut(player) {
            moves.invert_all(mode);
        }
    }

    pub fn reset_move(&mut self, player: &str, move_id: &str) -> bool {
        match self.watcher_mut(player, move_id) {
            Some(watcher) => {
                watcher.reset();
                true
            }
            None => false,
        }
    }

    pub fn reset_all_moves(&mut self, player: &str) {
        if let Some(moves) = self.players.get_mut(player) {
            moves.reset_all();
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&PlayerId, &[MoveId], &[RecognizedMove]) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// Process one tick's frame for `player`.
    ///
    /// Returns the recognized move ids in processing order. Listeners are notified once
    /// when the list is non-empty.
    ///
    /// Frames are state changes: deliver one only when the player's input differs from
    /// the previous frame, and call [`Recognizer::advance`] on the other ticks. Charge
    /// moves restart their hold timer on every delivered hold frame, so repeating the
    /// same frame each tick never charges.
    pub fn process_frame(&mut self, player: &str, frame: &InputFrame, now: Instant) -> Vec<MoveId> {
        let Some(moves) = self.players.get_mut(player) else {
            log::trace!("No moves for player {}", player);
            return Vec::new();
        };
        let player_id = PlayerId::from(player);
        log::trace!("{} frame [{}]", player_id, frame);

        let mut batch = Vec::new();
        for watcher in moves.iter_mut() {
            if let Some(combo) = watcher.observe(frame, now) {
                log::debug!("{} performed {} ({})", player_id, watcher.move_id(), combo);
                batch.push(RecognizedMove::new(
                    player_id.clone(),
                    watcher.move_id().clone(),
                    combo,
                ));
            }
        }

        let move_ids: Vec<MoveId> = batch.iter().map(|event| event.move_id.clone()).collect();
        if !batch.is_empty() && !self.listeners.is_empty() {
            self.listeners.notify(&player_id, &move_ids, &batch);
        }
        move_ids
    }

    /// Fire every watcher timer due at `now` without delivering a frame.
    pub fn advance(&mut self, now: Instant) {
        for moves in self.players.values_mut() {
            for watcher in moves.iter_mut() {
                watcher.advance(now);
            }
        }
    }

    /// Look up a move or fail with [`MovewatchError::UnknownMove`].
    pub fn require_move(&self, move_id: &str) -> Result<&MoveTemplate> {
        self.registry
            .get(move_id)
            .ok_or_else(|| MovewatchError::UnknownMove {
                move_id: move_id.to_string(),
            })
    }
}

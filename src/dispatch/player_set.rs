use crate::moves::{InvertMode, MoveId};
use crate::watcher::Watcher;

/// One player's watchers, kept in association order.
///
/// Association order is also processing order, which fixes the order of move ids in a
/// tick's notification.
#[derive(Debug, Clone, Default)]
pub struct PlayerMoveSet {
    watchers: Vec<Watcher>,
}

impl PlayerMoveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a watcher, replacing (in place) any existing watcher for the same move.
    pub fn insert(&mut self, watcher: Watcher) {
        match self.position(watcher.move_id().as_str()) {
            Some(index) => self.watchers[index] = watcher,
            None => self.watchers.push(watcher),
        }
    }

    pub fn remove(&mut self, move_id: &str) -> Option<Watcher> {
        self.position(move_id)
            .map(|index| self.watchers.remove(index))
    }

    pub fn get(&self, move_id: &str) -> Option<&Watcher> {
        self.watchers
            .iter()
            .find(|watcher| watcher.move_id().as_str() == move_id)
    }

    pub fn get_mut(&mut self, move_id: &str) -> Option<&mut Watcher> {
        self.watchers
            .iter_mut()
            .find(|watcher| watcher.move_id().as_str() == move_id)
    }

    pub fn contains(&self, move_id: &str) -> bool {
        self.position(move_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Watcher> {
        self.watchers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Watcher> {
        self.watchers.iter_mut()
    }

    pub fn move_ids(&self) -> Vec<&MoveId> {
        self.watchers.iter().map(Watcher::move_id).collect()
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    pub fn set_all_enabled(&mut self, enabled: bool) {
        for watcher in &mut self.watchers {
            watcher.set_enabled(enabled);
        }
    }

    pub fn invert_all(&mut self, mode: InvertMode) {
        for watcher in &mut self.watchers {
            watcher.invert(mode);
        }
    }

    pub fn reset_all(&mut self) {
        for watcher in &mut self.watchers {
            watcher.reset();
        }
    }

    fn position(&self, move_id: &str) -> Option<usize> {
        self.watchers
            .iter()
            .position(|watcher| watcher.move_id().as_str() == move_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::moves::{MoveConfig, MoveTemplate};

    fn watcher(id: &str, dpad: &[Direction]) -> Watcher {
        let config = MoveConfig::sequence(dpad.to_vec()).with_buttons(["ButtonA"]);
        Watcher::from_template(&MoveTemplate::from_config(id, &config).unwrap())
    }

    #[test]
    fn keeps_association_order_and_replaces_in_place() {
        let mut set = PlayerMoveSet::new();
        set.insert(watcher("a", &[Direction::Down]));
        set.insert(watcher("b", &[Direction::Up]));
        set.insert(watcher("a", &[Direction::Left]));

        let ids: Vec<&str> = set.move_ids().into_iter().map(MoveId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(set.get("a").unwrap().dpad(), &[Direction::Left]);
    }

    #[test]
    fn bulk_operations_touch_every_watcher() {
        let mut set = PlayerMoveSet::new();
        set.insert(watcher("a", &[Direction::Left]));
        set.insert(watcher("b", &[Direction::DownRight]));

        set.set_all_enabled(false);
        assert!(set.iter().all(|watcher| !watcher.is_enabled()));

        set.invert_all(InvertMode::X);
        assert_eq!(set.get("a").unwrap().dpad(), &[Direction::Right]);
        assert_eq!(set.get("b").unwrap().dpad(), &[Direction::DownLeft]);
    }

    #[test]
    fn remove_returns_the_watcher() {
        let mut set = PlayerMoveSet::new();
        set.insert(watcher("a", &[Direction::Down]));

        assert!(set.remove("a").is_some());
        assert!(set.remove("a").is_none());
        assert!(set.is_empty());
    }
}

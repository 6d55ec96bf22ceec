use crate::moves::template::{MoveId, MoveTemplate};
use std::collections::HashMap;

/// Shared store of move templates keyed by move id.
///
/// Templates are never mutated after registration; per-player watchers copy what they
/// need, so replacing a template only affects players associated afterwards.
#[derive(Debug, Clone, Default)]
pub struct MoveRegistry {
    templates: HashMap<MoveId, MoveTemplate>,
}

impl MoveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, returning the one it replaced.
    pub fn register(&mut self, template: MoveTemplate) -> Option<MoveTemplate> {
        self.templates.insert(template.id().clone(), template)
    }

    pub fn get(&self, move_id: &str) -> Option<&MoveTemplate> {
        self.templates.get(move_id)
    }

    pub fn contains(&self, move_id: &str) -> bool {
        self.templates.contains_key(move_id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&MoveId> {
        let mut ids: Vec<_> = self.templates.keys().collect();
        ids.sort();
        ids
    }
}

//! Entity storage with explicit compaction
//!
//! Slots stay put for the whole tick (collision pairs are slot indices), and
//! dead entries are dropped in one pass at the end of the step. Capacity is
//! retained across ticks so steady-state play does not reallocate.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityArena {
    slots: Vec<Entity>,
}

impl EntityArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Append an entity, returning its slot index for this tick
    pub fn insert(&mut self, entity: Entity) -> usize {
        self.slots.push(entity);
        self.slots.len() - 1
    }

    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.slots.get_mut(slot)
    }

    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        self.slots.iter().find(|e| e.id == id)
    }

    /// Number of slots, including ones deactivated this tick
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|e| e.active).count()
    }

    /// Active entities with their slot index
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter(|e| e.active)
    }

    /// Every slot, dead or alive
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter()
    }

    /// Drop deactivated entities, keeping spawn order. Returns how many went.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|e| e.active);
        before - self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

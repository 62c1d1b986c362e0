//! Fixed-capacity entity arena
//!
//! Every ship, bullet and asteroid lives in a slot of the arena. A slot's
//! index is the entity's identity on both sides of the wire: it is stable
//! while the entity is active and becomes reusable once it is destroyed.
//! Destruction only clears the active flag, nothing is ever removed.
//!
//! Free slots are tracked in an ordered set so that `create` always hands
//! out the lowest inactive index. Reuse order is therefore fully determined
//! by the sequence of creates and destroys.

use crate::math::Vec2;
use crate::{ARENA_CAPACITY, BOUNDING_RECT_SIZE};
use std::collections::BTreeSet;
use thiserror::Error;

/// Type of entity occupying a slot. Discriminants match the wire `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EntityKind {
    Ship = 0,
    Bullet = 1,
    Asteroid = 2,
}

/// Per-kind shape constants.
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    /// Half of the normalized bounding rectangle; multiplied by a slot's scale.
    pub half_extent: f32,
    /// Whether the entity wraps across screen edges instead of being culled.
    pub wraps: bool,
}

const KIND_TABLE: [KindInfo; 3] = [
    // Ship
    KindInfo {
        half_extent: BOUNDING_RECT_SIZE / 2.0,
        wraps: true,
    },
    // Bullet
    KindInfo {
        half_extent: BOUNDING_RECT_SIZE / 2.0,
        wraps: false,
    },
    // Asteroid
    KindInfo {
        half_extent: BOUNDING_RECT_SIZE / 2.0,
        wraps: true,
    },
];

impl EntityKind {
    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(EntityKind::Ship),
            1 => Some(EntityKind::Bullet),
            2 => Some(EntityKind::Asteroid),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i32 {
        self as i32
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centred on `center` extending `half` in both axes.
    pub fn around(center: Vec2, half: f32) -> Self {
        Self {
            min: Vec2::new(center.x - half, center.y - half),
            max: Vec2::new(center.x + half, center.y + half),
        }
    }

    /// Closed-interval overlap test; boxes sharing an edge overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySlot {
    pub kind: EntityKind,
    pub active: bool,
    pub scale: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians.
    pub heading: f32,
    pub bounding_box: Aabb,
    /// Ship slot that fired this entity, only meaningful for bullets.
    pub owner: Option<usize>,
}

impl Default for EntitySlot {
    fn default() -> Self {
        Self {
            kind: EntityKind::Asteroid,
            active: false,
            scale: 0.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            heading: 0.0,
            bounding_box: Aabb::default(),
            owner: None,
        }
    }
}

impl EntitySlot {
    /// Recomputes the bounding box from position, kind extent and scale.
    pub fn refresh_bounding_box(&mut self) {
        let half = self.kind.info().half_extent * self.scale;
        self.bounding_box = Aabb::around(self.position, half);
    }

    fn assign(
        &mut self,
        kind: EntityKind,
        scale: f32,
        position: Option<Vec2>,
        velocity: Option<Vec2>,
        heading: f32,
    ) {
        self.kind = kind;
        self.active = true;
        self.scale = scale;
        self.position = position.unwrap_or_default();
        self.velocity = velocity.unwrap_or_default();
        self.heading = heading;
        self.owner = None;
        self.refresh_bounding_box();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena is full ({capacity} slots in use)")]
    Full { capacity: usize },
    #[error("slot index {index} is outside the arena (capacity {capacity})")]
    OutOfRange { index: usize, capacity: usize },
}

#[derive(Debug, Clone)]
pub struct Arena {
    slots: Vec<EntitySlot>,
    free: BTreeSet<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self::with_capacity(ARENA_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![EntitySlot::default(); capacity],
            free: (0..capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Activates the lowest free slot. Missing position or velocity default to zero.
    pub fn create(
        &mut self,
        kind: EntityKind,
        scale: f32,
        position: Option<Vec2>,
        velocity: Option<Vec2>,
        heading: f32,
    ) -> Result<usize, ArenaError> {
        let index = self.free.pop_first().ok_or(ArenaError::Full {
            capacity: self.slots.len(),
        })?;

        self.slots[index].assign(kind, scale, position, velocity, heading);
        Ok(index)
    }

    /// Deactivates a slot. Inactive or out-of-range slots are ignored.
    pub fn destroy(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.active {
                slot.active = false;
                slot.owner = None;
                self.free.insert(index);
            }
        }
    }

    /// Unconditionally overwrites the slot at `index`, activating it if needed.
    pub fn set(
        &mut self,
        index: usize,
        kind: EntityKind,
        scale: f32,
        position: Option<Vec2>,
        velocity: Option<Vec2>,
        heading: f32,
    ) -> Result<(), ArenaError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ArenaError::OutOfRange { index, capacity })?;

        slot.assign(kind, scale, position, velocity, heading);
        self.free.remove(&index);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&EntitySlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntitySlot> {
        self.slots.get_mut(index)
    }

    /// Returns the slot only if it is active.
    pub fn get_active(&self, index: usize) -> Option<&EntitySlot> {
        self.slots.get(index).filter(|slot| slot.active)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.get_active(index).is_some()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &EntitySlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut EntitySlot)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.active)
    }

    /// Indices of active slots of the given kind, in index order.
    pub fn active_indices(&self, kind: EntityKind) -> Vec<usize> {
        self.iter_active()
            .filter(|(_, slot)| slot.kind == kind)
            .map(|(index, _)| index)
            .collect()
    }

    /// Deactivates every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
            slot.owner = None;
        }
        self.free = (0..self.slots.len()).collect();
    }
}

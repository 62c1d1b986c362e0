//! Per-tick integration, world wrapping and bullet culling

use crate::arena::{Arena, EntityKind, EntitySlot};
use crate::math::{wrap, Vec2};
use crate::{WORLD_HEIGHT, WORLD_WIDTH};

/// Screen bounds in world units. The origin sits at the centre and y points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::centered(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl WorldBounds {
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            min_x: -width / 2.0,
            max_x: width / 2.0,
            min_y: -height / 2.0,
            max_y: height / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Both extents are finite and positive.
    pub fn is_valid(&self) -> bool {
        let (width, height) = (self.width(), self.height());
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Recomputes every active bounding box from the current position, then
/// advances position by `velocity * dt`.
///
/// Boxes describe the start of the frame, which is what the swept collision
/// test expects.
pub fn integrate(arena: &mut Arena, dt: f32) {
    for (_, slot) in arena.iter_active_mut() {
        slot.refresh_bounding_box();
        slot.position += slot.velocity * dt;
    }
}

/// Distance past each edge an entity travels before it wraps.
pub fn wrap_margin(kind: EntityKind, scale: f32) -> f32 {
    kind.info().half_extent * scale
}

/// Length of the toroidal axes an entity of this kind and scale moves on.
/// This is the screen extent plus the margin on both sides.
pub fn wrap_period(kind: EntityKind, scale: f32, bounds: &WorldBounds) -> Vec2 {
    let margin = 2.0 * wrap_margin(kind, scale);
    Vec2::new(bounds.width() + margin, bounds.height() + margin)
}

/// Wraps a ship or asteroid across the screen edges, offset by its
/// scaled half extent so it leaves the screen fully before reappearing.
pub fn wrap_slot(slot: &mut EntitySlot, bounds: &WorldBounds) {
    let margin = wrap_margin(slot.kind, slot.scale);
    slot.position.x = wrap(
        slot.position.x,
        bounds.min_x - margin,
        bounds.max_x + margin,
    );
    slot.position.y = wrap(
        slot.position.y,
        bounds.min_y - margin,
        bounds.max_y + margin,
    );
}

/// Post-collision pass: wraps wrapping kinds and destroys bullets that
/// crossed an edge. Returns the destroyed bullet slots.
pub fn wrap_and_cull(arena: &mut Arena, bounds: &WorldBounds) -> Vec<usize> {
    let mut culled = Vec::new();

    for (index, slot) in arena.iter_active_mut() {
        if slot.kind.info().wraps {
            wrap_slot(slot, bounds);
        } else if slot.kind == EntityKind::Bullet && !bounds.contains(slot.position) {
            culled.push(index);
        }
    }

    for &index in &culled {
        arena.destroy(index);
    }

    culled
}

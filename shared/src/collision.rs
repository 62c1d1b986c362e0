//! Swept rectangle-vs-rectangle intersection

use crate::arena::{Aabb, EntityKind};
use crate::math::Vec2;

/// Tests whether two moving boxes touch at any time within `[0, dt]`.
///
/// Boxes that already overlap collide immediately. Otherwise the motion of B
/// relative to A is swept along each axis, narrowing the interval
/// `[time_first, time_last]` during which both axes overlap. Exact tangency
/// (`time_first == time_last`) is not a hit.
pub fn swept_aabb(a: &Aabb, vel_a: Vec2, b: &Aabb, vel_b: Vec2, dt: f32) -> bool {
    if a.overlaps(b) {
        return true;
    }

    let relative = vel_b - vel_a;
    let mut time_first = 0.0_f32;
    let mut time_last = dt;

    let x_open = sweep_axis(
        (a.min.x, a.max.x),
        (b.min.x, b.max.x),
        relative.x,
        &mut time_first,
        &mut time_last,
    );
    if !x_open {
        return false;
    }

    let y_open = sweep_axis(
        (a.min.y, a.max.y),
        (b.min.y, b.max.y),
        relative.y,
        &mut time_first,
        &mut time_last,
    );
    if !y_open {
        return false;
    }

    time_first < time_last
}

/// Narrows the contact interval for one axis. Returns false when the boxes
/// are separated on this axis and can never meet.
fn sweep_axis(
    (a_min, a_max): (f32, f32),
    (b_min, b_max): (f32, f32),
    vb: f32,
    time_first: &mut f32,
    time_last: &mut f32,
) -> bool {
    if vb < 0.0 {
        // B sits before A and keeps moving away
        if a_min > b_max {
            return false;
        }
        if a_max < b_min {
            *time_first = time_first.max((a_max - b_min) / vb);
        }
        if a_min < b_max {
            *time_last = time_last.min((a_min - b_max) / vb);
        }
    } else if vb > 0.0 {
        // B sits after A and keeps moving away
        if a_max < b_min {
            return false;
        }
        if a_min > b_max {
            *time_first = time_first.max((a_min - b_max) / vb);
        }
        if a_max > b_min {
            *time_last = time_last.min((a_max - b_min) / vb);
        }
    } else if a_max < b_min || a_min > b_max {
        // No relative motion on a separated axis
        return false;
    }

    true
}

/// Only asteroids collide, and only with ships or bullets.
pub fn can_collide(first: EntityKind, second: EntityKind) -> bool {
    matches!(
        (first, second),
        (EntityKind::Asteroid, EntityKind::Ship)
            | (EntityKind::Asteroid, EntityKind::Bullet)
            | (EntityKind::Ship, EntityKind::Asteroid)
            | (EntityKind::Bullet, EntityKind::Asteroid)
    )
}

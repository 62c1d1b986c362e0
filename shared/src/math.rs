//! 2D vector math and toroidal wrapping helpers

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Represents a vector in 2D space.
///
/// Serialized as two consecutive little-endian `f32` values, which is the
/// `Vec2` layout used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Positive direction is to the right.
    pub x: f32,
    /// Positive direction is up.
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(&self, scalar: f32) -> Vec2 {
        Vec2 {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Wraps `value` into `[min, max]` by shifting it one range width when it
/// leaves either end.
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return value;
    }

    if value < min {
        value + range
    } else if value > max {
        value - range
    } else {
        value
    }
}

/// Wraps a heading into `[-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    wrap(angle, -PI, PI)
}

/// Resolves a raw delta on a toroidal axis of length `window` to the
/// shortest path.
///
/// Deltas no longer than half the window are returned unchanged. Longer
/// deltas are assumed to cross the wrap seam and are replaced by
/// `window - |raw|`, pointing the opposite way.
pub fn wrap_delta(raw: f32, window: f32) -> f32 {
    let magnitude = raw.abs();
    if magnitude <= window / 2.0 {
        raw
    } else {
        -raw.signum() * (window - magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);

        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_from_angle() {
        let v = Vec2::from_angle(0.0);
        assert_approx_eq!(v.x, 1.0, 1e-6);
        assert_approx_eq!(v.y, 0.0, 1e-6);

        let v = Vec2::from_angle(PI / 2.0);
        assert_approx_eq!(v.x, 0.0, 1e-6);
        assert_approx_eq!(v.y, 1.0, 1e-6);
        assert_approx_eq!(v.length(), 1.0, 1e-6);
    }

    #[test]
    fn test_wrap_inside_range_is_identity() {
        assert_eq!(wrap(10.0, -100.0, 100.0), 10.0);
        assert_eq!(wrap(-100.0, -100.0, 100.0), -100.0);
        assert_eq!(wrap(100.0, -100.0, 100.0), 100.0);
    }

    #[test]
    fn test_wrap_shifts_by_range() {
        assert_approx_eq!(wrap(101.0, -100.0, 100.0), -99.0, 1e-4);
        assert_approx_eq!(wrap(-105.0, -100.0, 100.0), 95.0, 1e-4);
    }

    #[test]
    fn test_wrap_angle() {
        assert_approx_eq!(wrap_angle(PI + 0.5), -PI + 0.5, 1e-5);
        assert_approx_eq!(wrap_angle(-PI - 0.25), PI - 0.25, 1e-5);
        assert_eq!(wrap_angle(1.0), 1.0);
    }

    #[test]
    fn test_wrap_delta_short_path() {
        assert_eq!(wrap_delta(30.0, 800.0), 30.0);
        assert_eq!(wrap_delta(-400.0, 800.0), -400.0);
    }

    #[test]
    fn test_wrap_delta_through_seam() {
        let epsilon = 5.0;
        assert_approx_eq!(wrap_delta(800.0 - epsilon, 800.0), -epsilon, 1e-4);
        assert_approx_eq!(wrap_delta(-(800.0 - epsilon), 800.0), epsilon, 1e-4);
    }

    #[test]
    fn test_wrap_delta_angular() {
        let window = 2.0 * PI;
        let raw = window - 0.1;
        assert_approx_eq!(wrap_delta(raw, window), -0.1, 1e-5);
        assert_approx_eq!(wrap_delta(0.5, window), 0.5, 1e-6);
    }
}

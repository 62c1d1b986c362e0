//! Simulation core shared by the asteroids server and client
//!
//! Holds the entity arena, swept collision, per-tick physics and the binary
//! wire protocol. Nothing here performs I/O.

pub mod arena;
pub mod collision;
pub mod math;
pub mod physics;
pub mod protocol;

pub use arena::{Aabb, Arena, ArenaError, EntityKind, EntitySlot};
pub use collision::{can_collide, swept_aabb};
pub use math::{wrap, wrap_angle, wrap_delta, Vec2};
pub use physics::WorldBounds;
pub use protocol::{
    InputMessage, JoinReply, MessageType, OtherInfo, ProtocolError, ShipInfo, Snapshot,
};

pub const ARENA_CAPACITY: usize = 2048;

/// Side length of the normalized bounding rectangle before scaling.
pub const BOUNDING_RECT_SIZE: f32 = 1.0;

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

pub const SHIP_SIZE: f32 = 16.0;
pub const SHIP_ACCELERATION_FORWARD: f32 = 60.0;
pub const SHIP_ACCELERATION_BACKWARD: f32 = 60.0;
/// Radians per second.
pub const SHIP_ROTATION_SPEED: f32 = 2.0 * std::f32::consts::PI;
/// Velocity multiplier applied after each thrust input.
pub const SHIP_DRAG: f32 = 0.99;
pub const SHIP_INITIAL_LIVES: i32 = 3;

pub const BULLET_SPEED: f32 = 150.0;
pub const BULLET_SIZE: f32 = 3.0;

pub const ASTEROID_SIZE: f32 = 70.0;
pub const ASTEROID_SPEED: f32 = 50.0;
pub const ASTEROID_SCORE: i32 = 100;
/// Distance left of the screen edge at which new asteroids appear.
pub const ASTEROID_SPAWN_OFFSET: f32 = 50.0;
pub const INITIAL_ASTEROID_COUNT: usize = 4;

/// Velocity component range and integer scale range used by the
/// single-process spawner.
pub const LOCAL_ASTEROID_MAX_SPEED: f32 = 80.0;
pub const LOCAL_ASTEROID_MIN_SCALE: i32 = 15;
pub const LOCAL_ASTEROID_MAX_SCALE: i32 = 80;

//! Authoritative asteroids simulation
//!
//! `GameState` owns the entity arena together with the per-client ship
//! records and the registry of live non-ship entities that feeds the
//! broadcast. Both the input receiver and the tick loop mutate it under a
//! single lock.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::arena::{Arena, EntityKind};
use shared::collision::{can_collide, swept_aabb};
use shared::math::{wrap_angle, Vec2};
use shared::physics::{self, WorldBounds};
use shared::protocol::{MessageType, OtherInfo, ShipInfo, Snapshot};
use shared::{
    ASTEROID_SCORE, ASTEROID_SIZE, ASTEROID_SPAWN_OFFSET, ASTEROID_SPEED, BULLET_SIZE,
    BULLET_SPEED, LOCAL_ASTEROID_MAX_SCALE, LOCAL_ASTEROID_MAX_SPEED, LOCAL_ASTEROID_MIN_SCALE,
    SHIP_ACCELERATION_BACKWARD, SHIP_ACCELERATION_FORWARD, SHIP_DRAG, SHIP_INITIAL_LIVES,
    SHIP_ROTATION_SPEED, SHIP_SIZE,
};
use std::f32::consts::PI;

/// How asteroid hits are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Hit asteroids are destroyed and replaced by two random ones; every
    /// hit scores.
    SingleProcess,
    /// Hit asteroids are reassigned in place to a fresh random asteroid.
    ClientServer,
}

/// Bookkeeping for one joined client. `slot` is the ship's arena index and
/// doubles as its wire ship id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipRecord {
    pub slot: usize,
    pub lives: i32,
    pub score: i32,
    pub is_dead: bool,
}

struct AsteroidSpec {
    scale: f32,
    position: Vec2,
    velocity: Vec2,
}

pub struct GameState {
    pub tick: u32,
    arena: Arena,
    ships: Vec<ShipRecord>,
    others: Vec<usize>,
    bounds: WorldBounds,
    mode: ResolutionMode,
    rng: StdRng,
}

impl GameState {
    /// Creates a world with `asteroid_count` asteroids entering from the
    /// left edge.
    pub fn new(bounds: WorldBounds, mode: ResolutionMode, asteroid_count: usize) -> Self {
        Self::with_rng(bounds, mode, asteroid_count, StdRng::from_entropy())
    }

    /// Same as [`GameState::new`] with a deterministic random source.
    pub fn with_seed(
        bounds: WorldBounds,
        mode: ResolutionMode,
        asteroid_count: usize,
        seed: u64,
    ) -> Self {
        Self::with_rng(bounds, mode, asteroid_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        bounds: WorldBounds,
        mode: ResolutionMode,
        asteroid_count: usize,
        rng: StdRng,
    ) -> Self {
        let mut state = Self {
            tick: 0,
            arena: Arena::new(),
            ships: Vec::new(),
            others: Vec::new(),
            bounds,
            mode,
            rng,
        };

        // The initial field always uses the networked spawn rule
        for _ in 0..asteroid_count {
            let rock = state.edge_asteroid();
            state.insert_asteroid(rock.position, rock.velocity, rock.scale);
        }

        info!(
            "World {}x{} ready with {} asteroids ({:?})",
            bounds.width(),
            bounds.height(),
            state.others.len(),
            mode
        );
        state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn ships(&self) -> &[ShipRecord] {
        &self.ships
    }

    /// Live non-ship slots in broadcast order.
    pub fn others(&self) -> &[usize] {
        &self.others
    }

    /// Record of a ship that is still in play.
    pub fn ship(&self, ship_id: usize) -> Option<&ShipRecord> {
        self.ships
            .iter()
            .find(|record| record.slot == ship_id && !record.is_dead)
    }

    fn ship_mut(&mut self, ship_id: usize) -> Option<&mut ShipRecord> {
        self.ships
            .iter_mut()
            .find(|record| record.slot == ship_id && !record.is_dead)
    }

    /// Occupies a new ship slot at the origin. Returns `None` when the arena
    /// is full.
    pub fn add_ship(&mut self) -> Option<usize> {
        let slot = match self
            .arena
            .create(EntityKind::Ship, SHIP_SIZE, None, None, 0.0)
        {
            Ok(slot) => slot,
            Err(e) => {
                warn!("Cannot add ship: {}", e);
                return None;
            }
        };

        self.ships.push(ShipRecord {
            slot,
            lives: SHIP_INITIAL_LIVES,
            score: 0,
            is_dead: false,
        });
        info!("Added ship {}", slot);
        Some(slot)
    }

    /// Spawns a bullet at the ship's position travelling along its heading.
    /// A full arena drops the bullet silently.
    pub fn fire_bullet(&mut self, ship_id: usize) -> Option<usize> {
        let (position, heading) = {
            let ship = self.arena.get_active(ship_id)?;
            (ship.position, ship.heading)
        };

        let velocity = Vec2::from_angle(heading) * BULLET_SPEED;
        let bullet = self
            .arena
            .create(
                EntityKind::Bullet,
                BULLET_SIZE,
                Some(position),
                Some(velocity),
                0.0,
            )
            .ok()?;

        if let Some(slot) = self.arena.get_mut(bullet) {
            slot.owner = Some(ship_id);
        }
        self.others.push(bullet);
        Some(bullet)
    }

    /// Applies one input event to a live ship.
    ///
    /// Thrust is followed by drag on every call, so damping scales with the
    /// rate at which inputs arrive. Returns false when `ship_id` does not
    /// name a ship in play.
    pub fn apply_input(&mut self, ship_id: usize, message: MessageType, dt: f32) -> bool {
        if self.ship(ship_id).is_none() {
            return false;
        }

        if message == MessageType::Shoot {
            if self.fire_bullet(ship_id).is_none() {
                debug!("Bullet for ship {} dropped", ship_id);
            }
            return true;
        }

        let Some(ship) = self.arena.get_mut(ship_id).filter(|slot| slot.active) else {
            return false;
        };

        match message {
            MessageType::MoveUp => {
                let thrust = Vec2::from_angle(ship.heading) * (SHIP_ACCELERATION_FORWARD * dt);
                ship.velocity = (ship.velocity + thrust) * SHIP_DRAG;
            }
            MessageType::MoveDown => {
                let thrust =
                    Vec2::from_angle(ship.heading) * (-SHIP_ACCELERATION_BACKWARD * dt);
                ship.velocity = (ship.velocity + thrust) * SHIP_DRAG;
            }
            MessageType::MoveLeft => {
                ship.heading = wrap_angle(ship.heading + SHIP_ROTATION_SPEED * dt);
            }
            MessageType::MoveRight => {
                ship.heading = wrap_angle(ship.heading - SHIP_ROTATION_SPEED * dt);
            }
            MessageType::Shoot => {}
        }

        true
    }

    /// Adds an asteroid to the arena and the broadcast registry.
    pub fn insert_asteroid(&mut self, position: Vec2, velocity: Vec2, scale: f32) -> Option<usize> {
        match self.arena.create(
            EntityKind::Asteroid,
            scale,
            Some(position),
            Some(velocity),
            0.0,
        ) {
            Ok(slot) => {
                self.others.push(slot);
                Some(slot)
            }
            Err(e) => {
                warn!("Asteroid spawn dropped: {}", e);
                None
            }
        }
    }

    fn edge_position(&mut self) -> Vec2 {
        let y = self.rng.gen_range(self.bounds.min_y..=self.bounds.max_y);
        Vec2::new(self.bounds.min_x - ASTEROID_SPAWN_OFFSET, y)
    }

    /// Random heading at the nominal asteroid speed and size.
    fn edge_asteroid(&mut self) -> AsteroidSpec {
        let direction = self.rng.gen_range(0.0..2.0 * PI);
        AsteroidSpec {
            scale: ASTEROID_SIZE,
            position: self.edge_position(),
            velocity: Vec2::from_angle(direction) * ASTEROID_SPEED,
        }
    }

    /// Random velocity components and a random whole-number size.
    fn scattered_asteroid(&mut self) -> AsteroidSpec {
        let vx = self
            .rng
            .gen_range(-LOCAL_ASTEROID_MAX_SPEED..=LOCAL_ASTEROID_MAX_SPEED);
        let vy = self
            .rng
            .gen_range(-LOCAL_ASTEROID_MAX_SPEED..=LOCAL_ASTEROID_MAX_SPEED);
        let scale = self
            .rng
            .gen_range(LOCAL_ASTEROID_MIN_SCALE..=LOCAL_ASTEROID_MAX_SCALE) as f32;
        AsteroidSpec {
            scale,
            position: self.edge_position(),
            velocity: Vec2::new(vx, vy),
        }
    }

    fn forget_other(&mut self, slot: usize) {
        self.others.retain(|&other| other != slot);
    }

    fn resolve_asteroid_hit(&mut self, asteroid: usize) {
        match self.mode {
            ResolutionMode::ClientServer => {
                let rock = self.edge_asteroid();
                if let Err(e) = self.arena.set(
                    asteroid,
                    EntityKind::Asteroid,
                    rock.scale,
                    Some(rock.position),
                    Some(rock.velocity),
                    0.0,
                ) {
                    warn!("Failed to respawn asteroid {}: {}", asteroid, e);
                }
            }
            ResolutionMode::SingleProcess => {
                self.arena.destroy(asteroid);
                self.forget_other(asteroid);
                for _ in 0..2 {
                    let rock = self.scattered_asteroid();
                    self.insert_asteroid(rock.position, rock.velocity, rock.scale);
                }
            }
        }
    }

    fn resolve_ship_hit(&mut self, ship_id: usize, asteroid: usize) {
        if let Some(slot) = self.arena.get_mut(ship_id) {
            slot.position = Vec2::ZERO;
            slot.velocity = Vec2::ZERO;
            slot.refresh_bounding_box();
        }

        let single_process = self.mode == ResolutionMode::SingleProcess;
        let mut game_over = false;
        if let Some(record) = self.ship_mut(ship_id) {
            record.lives -= 1;
            if single_process {
                record.score += ASTEROID_SCORE;
            }
            if record.lives <= 0 {
                record.is_dead = true;
                game_over = true;
            }
        }

        if game_over {
            self.arena.destroy(ship_id);
            info!("Ship {} is out of lives", ship_id);
        } else {
            debug!("Ship {} hit asteroid {}", ship_id, asteroid);
        }

        self.resolve_asteroid_hit(asteroid);
    }

    fn resolve_bullet_hit(&mut self, bullet: usize, asteroid: usize) {
        let owner = self.arena.get(bullet).and_then(|slot| slot.owner);
        self.arena.destroy(bullet);
        self.forget_other(bullet);

        if let Some(record) = owner.and_then(|ship_id| self.ship_mut(ship_id)) {
            record.score += ASTEROID_SCORE;
        }

        self.resolve_asteroid_hit(asteroid);
    }

    /// Tests every asteroid against every ship and bullet. An asteroid
    /// resolves at most one hit per tick, and so does a ship.
    fn handle_collisions(&mut self, dt: f32) {
        let asteroids = self.arena.active_indices(EntityKind::Asteroid);
        let mut hit_ships: Vec<usize> = Vec::new();
        let targets: Vec<(usize, EntityKind)> = self
            .arena
            .iter_active()
            .filter(|(_, slot)| can_collide(EntityKind::Asteroid, slot.kind))
            .map(|(index, slot)| (index, slot.kind))
            .collect();

        for asteroid in asteroids {
            let Some(rock) = self
                .arena
                .get_active(asteroid)
                .filter(|slot| slot.kind == EntityKind::Asteroid)
                .copied()
            else {
                continue;
            };

            for &(target, kind) in &targets {
                let Some(other) = self
                    .arena
                    .get_active(target)
                    .filter(|slot| slot.kind == kind)
                else {
                    continue;
                };

                if !swept_aabb(
                    &rock.bounding_box,
                    rock.velocity,
                    &other.bounding_box,
                    other.velocity,
                    dt,
                ) {
                    continue;
                }

                match kind {
                    EntityKind::Ship => {
                        if hit_ships.contains(&target) {
                            continue;
                        }
                        hit_ships.push(target);
                        self.resolve_ship_hit(target, asteroid);
                    }
                    EntityKind::Bullet => self.resolve_bullet_hit(target, asteroid),
                    EntityKind::Asteroid => continue,
                }
                break;
            }
        }
    }

    /// Advances the world by one tick: integrate, collide, then wrap
    /// and cull.
    pub fn step(&mut self, dt: f32) {
        physics::integrate(&mut self.arena, dt);
        self.handle_collisions(dt);

        for bullet in physics::wrap_and_cull(&mut self.arena, &self.bounds) {
            self.forget_other(bullet);
        }

        self.tick = self.tick.wrapping_add(1);
    }

    /// Collects every ship in play and every registered other entity.
    pub fn build_snapshot(&self) -> Snapshot {
        let ships = self
            .ships
            .iter()
            .filter(|record| !record.is_dead)
            .filter_map(|record| {
                let slot = self.arena.get_active(record.slot)?;
                Some(ShipInfo {
                    dead: 0,
                    ship_id: record.slot as i32,
                    score: record.score,
                    lives: record.lives,
                    scale: slot.scale,
                    position: slot.position,
                    velocity: slot.velocity,
                    heading: slot.heading,
                })
            })
            .collect();

        let others = self
            .others
            .iter()
            .filter_map(|&index| {
                let slot = self.arena.get_active(index)?;
                Some(OtherInfo {
                    object_id: index as i32,
                    kind: slot.kind.to_wire(),
                    scale: slot.scale,
                    position: slot.position,
                    velocity: slot.velocity,
                    heading: slot.heading,
                })
            })
            .collect();

        Snapshot { ships, others }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use shared::arena::Aabb;

    const DT: f32 = 1.0 / 60.0;

    fn empty_world(mode: ResolutionMode) -> GameState {
        GameState::with_seed(WorldBounds::default(), mode, 0, 7)
    }

    #[test]
    fn test_initial_asteroid_field() {
        let state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::ClientServer,
            4,
            1,
        );

        assert_eq!(state.others(), &[0, 1, 2, 3]);
        for &index in state.others() {
            let slot = state.arena().get_active(index).unwrap();
            assert_eq!(slot.kind, EntityKind::Asteroid);
            assert_eq!(slot.scale, ASTEROID_SIZE);
            assert_eq!(slot.position.x, -450.0);
            assert!(slot.position.y >= -300.0 && slot.position.y <= 300.0);
            assert_approx_eq!(slot.velocity.length(), ASTEROID_SPEED, 1e-3);
        }
    }

    #[test]
    fn test_add_ship_uses_next_free_slot() {
        let mut state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::ClientServer,
            4,
            1,
        );

        let first = state.add_ship().unwrap();
        let second = state.add_ship().unwrap();

        assert_eq!((first, second), (4, 5));
        let record = state.ship(first).unwrap();
        assert_eq!(record.lives, SHIP_INITIAL_LIVES);
        assert_eq!(record.score, 0);
        assert!(!record.is_dead);
        assert_eq!(state.arena().get_active(first).unwrap().scale, SHIP_SIZE);
    }

    #[test]
    fn test_thrust_applies_drag_per_message() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();

        assert!(state.apply_input(ship, MessageType::MoveUp, DT));
        let v = state.arena().get(ship).unwrap().velocity;
        assert_approx_eq!(v.x, 60.0 * DT * 0.99, 1e-6);
        assert_approx_eq!(v.y, 0.0, 1e-6);

        assert!(state.apply_input(ship, MessageType::MoveUp, DT));
        let v = state.arena().get(ship).unwrap().velocity;
        assert_approx_eq!(v.x, (60.0 * DT * 0.99 + 60.0 * DT) * 0.99, 1e-6);

        let mut expected = v.x;
        for _ in 0..2 {
            assert!(state.apply_input(ship, MessageType::MoveDown, DT));
            expected = (expected - 60.0 * DT) * 0.99;
        }
        let v = state.arena().get(ship).unwrap().velocity;
        assert_approx_eq!(v.x, expected, 1e-6);
        assert!(v.x < 0.0);
    }

    #[test]
    fn test_rotation_wraps_heading() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();

        // Half a second at 2π/s is a half turn
        for _ in 0..31 {
            state.apply_input(ship, MessageType::MoveLeft, DT);
        }
        let heading = state.arena().get(ship).unwrap().heading;
        assert!(heading >= -PI && heading <= PI);
        assert!(heading < 0.0);

        state.apply_input(ship, MessageType::MoveRight, DT);
        state.apply_input(ship, MessageType::MoveRight, DT);
        let heading = state.arena().get(ship).unwrap().heading;
        assert!(heading >= -PI && heading <= PI);
    }

    #[test]
    fn test_shoot_spawns_owned_bullet() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();
        state.arena_mut().get_mut(ship).unwrap().position = Vec2::new(12.0, -4.0);

        assert!(state.apply_input(ship, MessageType::Shoot, DT));

        assert_eq!(state.others().len(), 1);
        let bullet = state.others()[0];
        let slot = state.arena().get_active(bullet).unwrap();
        assert_eq!(slot.kind, EntityKind::Bullet);
        assert_eq!(slot.scale, BULLET_SIZE);
        assert_eq!(slot.position, Vec2::new(12.0, -4.0));
        assert_approx_eq!(slot.velocity.x, BULLET_SPEED, 1e-4);
        assert_approx_eq!(slot.velocity.y, 0.0, 1e-4);
        assert_eq!(slot.owner, Some(ship));
    }

    #[test]
    fn test_input_for_unknown_ship_is_rejected() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        assert!(!state.apply_input(0, MessageType::MoveUp, DT));
        assert!(!state.apply_input(9999, MessageType::Shoot, DT));
        assert!(state.others().is_empty());
    }

    #[test]
    fn test_bullet_leaving_screen_is_culled() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();
        state.arena_mut().get_mut(ship).unwrap().position = Vec2::new(398.0, 0.0);
        state.apply_input(ship, MessageType::Shoot, DT);
        let bullet = state.others()[0];

        state.step(DT);

        assert!(!state.arena().is_active(bullet));
        assert!(state.others().is_empty());
        assert!(state.build_snapshot().others.is_empty());
    }

    #[test]
    fn test_ship_hit_respawns_at_origin_client_server() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();
        {
            let slot = state.arena_mut().get_mut(ship).unwrap();
            slot.position = Vec2::new(100.0, 100.0);
            slot.velocity = Vec2::new(5.0, 5.0);
        }
        let asteroid = state
            .insert_asteroid(Vec2::new(100.0, 100.0), Vec2::ZERO, ASTEROID_SIZE)
            .unwrap();

        state.step(DT);

        let slot = state.arena().get_active(ship).unwrap();
        assert_eq!(slot.position, Vec2::ZERO);
        assert_eq!(slot.velocity, Vec2::ZERO);
        let record = state.ship(ship).unwrap();
        assert_eq!(record.lives, SHIP_INITIAL_LIVES - 1);
        assert_eq!(record.score, 0);

        // Same slot, reassigned to a fresh asteroid at the horizontal edge
        assert_eq!(state.others(), &[asteroid]);
        let rock = state.arena().get_active(asteroid).unwrap();
        assert_eq!(rock.kind, EntityKind::Asteroid);
        assert_eq!(rock.scale, ASTEROID_SIZE);
        assert!(rock.position.x.abs() > 400.0);
        assert_approx_eq!(rock.velocity.length(), ASTEROID_SPEED, 1e-3);
    }

    #[test]
    fn test_two_rocks_on_one_ship_cost_one_life() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();
        {
            let slot = state.arena_mut().get_mut(ship).unwrap();
            slot.position = Vec2::new(200.0, 100.0);
            slot.refresh_bounding_box();
        }
        let first = state
            .insert_asteroid(Vec2::new(190.0, 100.0), Vec2::ZERO, 40.0)
            .unwrap();
        let second = state
            .insert_asteroid(Vec2::new(210.0, 100.0), Vec2::ZERO, 40.0)
            .unwrap();

        state.step(DT);

        let record = state.ship(ship).unwrap();
        assert_eq!(record.lives, SHIP_INITIAL_LIVES - 1);
        let slot = state.arena().get_active(ship).unwrap();
        assert_eq!(slot.position, Vec2::ZERO);
        assert_eq!(slot.bounding_box, Aabb::around(Vec2::ZERO, SHIP_SIZE / 2.0));

        // Only the rock that resolved the hit is sent to the edge
        let moved = [first, second]
            .iter()
            .filter(|&&rock| state.arena().get(rock).unwrap().position.x.abs() > 400.0)
            .count();
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_bullet_hit_single_process_splits_and_scores() {
        let mut state = empty_world(ResolutionMode::SingleProcess);
        let ship = state.add_ship().unwrap();
        state.apply_input(ship, MessageType::Shoot, DT);
        let bullet = state.others()[0];
        {
            let slot = state.arena_mut().get_mut(bullet).unwrap();
            slot.position = Vec2::new(200.0, 0.0);
        }
        state.arena_mut().get_mut(ship).unwrap().position = Vec2::new(-200.0, -200.0);
        state
            .insert_asteroid(Vec2::new(200.0, 0.0), Vec2::ZERO, 40.0)
            .unwrap();

        state.step(DT);

        assert!(!state.arena().is_active(bullet));
        assert!(!state.others().contains(&bullet));
        assert_eq!(state.ship(ship).unwrap().score, ASTEROID_SCORE);

        let asteroids = state.arena().active_indices(EntityKind::Asteroid);
        assert_eq!(asteroids.len(), 2);
        assert_eq!(state.others().len(), 2);
        for index in asteroids {
            let slot = state.arena().get_active(index).unwrap();
            assert!(slot.scale >= 15.0 && slot.scale <= 80.0);
            assert_eq!(slot.scale.fract(), 0.0);
            assert!(slot.velocity.x.abs() <= 80.0 && slot.velocity.y.abs() <= 80.0);
        }
    }

    #[test]
    fn test_ship_hit_single_process_scores_and_costs_life() {
        let mut state = empty_world(ResolutionMode::SingleProcess);
        let ship = state.add_ship().unwrap();
        state.insert_asteroid(Vec2::ZERO, Vec2::ZERO, ASTEROID_SIZE);

        state.step(DT);

        let record = state.ship(ship).unwrap();
        assert_eq!(record.lives, SHIP_INITIAL_LIVES - 1);
        assert_eq!(record.score, ASTEROID_SCORE);
        assert_eq!(state.arena().active_indices(EntityKind::Asteroid).len(), 2);
    }

    #[test]
    fn test_last_life_removes_ship_from_snapshot() {
        let mut state = empty_world(ResolutionMode::ClientServer);
        let ship = state.add_ship().unwrap();

        for _ in 0..SHIP_INITIAL_LIVES {
            let asteroid = state
                .insert_asteroid(Vec2::ZERO, Vec2::ZERO, ASTEROID_SIZE)
                .unwrap();
            state.step(DT);
            // Park the respawned asteroid far from the origin
            state.arena_mut().destroy(asteroid);
            state.others.retain(|&other| other != asteroid);
        }

        assert!(state.ship(ship).is_none());
        assert!(state.ships()[0].is_dead);
        assert!(!state.arena().is_active(ship));
        assert!(state.build_snapshot().ships.is_empty());
        assert!(!state.apply_input(ship, MessageType::MoveUp, DT));
    }

    #[test]
    fn test_asteroids_do_not_collide_with_each_other() {
        let mut state = empty_world(ResolutionMode::SingleProcess);
        let a = state
            .insert_asteroid(Vec2::ZERO, Vec2::ZERO, ASTEROID_SIZE)
            .unwrap();
        let b = state
            .insert_asteroid(Vec2::new(10.0, 0.0), Vec2::ZERO, ASTEROID_SIZE)
            .unwrap();

        state.step(DT);

        assert_eq!(state.others(), &[a, b]);
    }

    #[test]
    fn test_snapshot_contents() {
        let mut state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::ClientServer,
            2,
            3,
        );
        let ship = state.add_ship().unwrap();
        state.apply_input(ship, MessageType::Shoot, DT);

        let snapshot = state.build_snapshot();

        assert_eq!(snapshot.ships.len(), 1);
        assert_eq!(snapshot.ships[0].ship_id, ship as i32);
        assert_eq!(snapshot.ships[0].lives, SHIP_INITIAL_LIVES);
        assert!(!snapshot.ships[0].is_dead());

        let kinds: Vec<i32> = snapshot.others.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![2, 2, 1]);
        assert_eq!(snapshot.others[2].object_id, 3);
    }
}

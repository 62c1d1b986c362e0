//! Client-side world mirror with dead-reckoning correction
//!
//! The client never decides anything about the world. It keeps a local copy
//! of the arena, extrapolates it every frame from the last known velocities
//! and, when a snapshot arrives, schedules the difference between what it
//! predicted and what the server says to be absorbed smoothly over the next
//! inter-snapshot interval.

use log::{debug, info, warn};
use shared::arena::{Arena, EntityKind};
use shared::math::{wrap_angle, wrap_delta, Vec2};
use shared::physics::{self, WorldBounds};
use shared::protocol::{ProtocolError, Snapshot};
use std::collections::HashMap;
use std::f32::consts::PI;
use std::time::Instant;

/// Pending correction for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeadReckoningState {
    pub should_interpolate: bool,
    /// Position delta still to be distributed over the package interval.
    pub correction_vector: Vec2,
    /// Shortest-path heading delta.
    pub correction_rotation: f32,
}

/// Target state of one entity as carried by a snapshot.
struct Target {
    slot: usize,
    kind: EntityKind,
    scale: f32,
    position: Vec2,
    velocity: Vec2,
    heading: f32,
    /// Set for ships whose lives changed since the last snapshot.
    respawned: bool,
}

pub struct ClientWorld {
    arena: Arena,
    reckoning: Vec<DeadReckoningState>,
    bounds: WorldBounds,
    ship_lives: HashMap<usize, i32>,
    last_receipt: Option<Instant>,
    /// Seconds between the two most recent snapshot receipts.
    package_interval: f32,
    elapsed_since_snapshot: f32,
}

impl ClientWorld {
    pub fn new(bounds: WorldBounds) -> Self {
        let arena = Arena::new();
        let reckoning = vec![DeadReckoningState::default(); arena.capacity()];
        Self {
            arena,
            reckoning,
            bounds,
            ship_lives: HashMap::new(),
            last_receipt: None,
            package_interval: 0.0,
            elapsed_since_snapshot: 0.0,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn package_interval(&self) -> f32 {
        self.package_interval
    }

    pub fn reckoning(&self, slot: usize) -> Option<&DeadReckoningState> {
        self.reckoning.get(slot)
    }

    fn slot_index(&self, id: i32) -> Result<usize, ProtocolError> {
        usize::try_from(id)
            .ok()
            .filter(|&slot| slot < self.arena.capacity())
            .ok_or(ProtocolError::InvalidSlot(id))
    }

    /// Checks every id and kind up front so a bad snapshot leaves the
    /// mirror untouched.
    fn collect_targets(&self, snapshot: &Snapshot) -> Result<Vec<Target>, ProtocolError> {
        let mut targets = Vec::with_capacity(snapshot.ships.len() + snapshot.others.len());

        for ship in &snapshot.ships {
            let slot = self.slot_index(ship.ship_id)?;
            let respawned = self
                .ship_lives
                .get(&slot)
                .is_some_and(|&lives| lives != ship.lives);
            targets.push(Target {
                slot,
                kind: EntityKind::Ship,
                scale: ship.scale,
                position: ship.position,
                velocity: ship.velocity,
                heading: ship.heading,
                respawned,
            });
        }

        for other in &snapshot.others {
            targets.push(Target {
                slot: self.slot_index(other.object_id)?,
                kind: other.entity_kind()?,
                scale: other.scale,
                position: other.position,
                velocity: other.velocity,
                heading: other.heading,
                respawned: false,
            });
        }

        Ok(targets)
    }

    /// Merges a decoded snapshot into the mirror.
    ///
    /// Entities already present with the same kind get a scheduled
    /// correction. New entities, kind changes and respawned ships are placed
    /// directly. Local entities the snapshot no longer mentions are removed.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &Snapshot,
        received_at: Instant,
    ) -> Result<(), ProtocolError> {
        let targets = self.collect_targets(snapshot)?;

        if let Some(previous) = self.last_receipt {
            self.package_interval = received_at
                .saturating_duration_since(previous)
                .as_secs_f32();
        }
        self.last_receipt = Some(received_at);
        self.elapsed_since_snapshot = 0.0;

        let mut seen = vec![false; self.arena.capacity()];
        for target in &targets {
            seen[target.slot] = true;
            self.apply_target(target);
        }

        for ship in &snapshot.ships {
            if let Ok(slot) = self.slot_index(ship.ship_id) {
                self.ship_lives.insert(slot, ship.lives);
            }
        }

        let stale: Vec<usize> = self
            .arena
            .iter_active()
            .filter(|(index, _)| !seen[*index])
            .map(|(index, _)| index)
            .collect();
        for index in stale {
            self.arena.destroy(index);
            self.reckoning[index] = DeadReckoningState::default();
            if self.ship_lives.remove(&index).is_some() {
                info!("Ship {} left the game", index);
            }
        }

        Ok(())
    }

    fn apply_target(&mut self, target: &Target) {
        let current = self
            .arena
            .get_active(target.slot)
            .filter(|slot| slot.kind == target.kind)
            .map(|slot| (slot.position, slot.heading));

        let Some((position, heading)) = current.filter(|_| {
            !target.respawned && self.package_interval > 0.0
        }) else {
            if target.respawned {
                debug!("Ship {} respawned", target.slot);
            }
            if let Err(e) = self.arena.set(
                target.slot,
                target.kind,
                target.scale,
                Some(target.position),
                Some(target.velocity),
                target.heading,
            ) {
                warn!("Failed to place entity {}: {}", target.slot, e);
            }
            self.reckoning[target.slot] = DeadReckoningState::default();
            return;
        };

        let raw = target.position - position;
        let correction_vector = if target.kind.info().wraps {
            let period = physics::wrap_period(target.kind, target.scale, &self.bounds);
            Vec2::new(wrap_delta(raw.x, period.x), wrap_delta(raw.y, period.y))
        } else {
            raw
        };
        let correction_rotation = wrap_delta(target.heading - heading, 2.0 * PI);

        if let Some(slot) = self.arena.get_mut(target.slot) {
            slot.velocity = target.velocity;
            slot.scale = target.scale;
            slot.refresh_bounding_box();
        }
        self.reckoning[target.slot] = DeadReckoningState {
            should_interpolate: true,
            correction_vector,
            correction_rotation,
        };
    }

    /// Advances the mirror by one local frame.
    ///
    /// Positions are extrapolated from velocity, then each pending correction
    /// contributes its share of the frame. The share is clamped to the time
    /// left in the package interval, so the increments add up to exactly the
    /// scheduled correction.
    pub fn update(&mut self, frame_dt: f32) {
        physics::integrate(&mut self.arena, frame_dt);

        let remaining = self.package_interval - self.elapsed_since_snapshot;
        if self.package_interval > 0.0 && remaining > 0.0 {
            let fraction = frame_dt.min(remaining) / self.package_interval;
            let exhausted = frame_dt >= remaining;

            for (index, slot) in self.arena.iter_active_mut() {
                let state = &mut self.reckoning[index];
                if !state.should_interpolate {
                    continue;
                }
                slot.position += state.correction_vector * fraction;
                slot.heading = wrap_angle(slot.heading + state.correction_rotation * fraction);
                if exhausted {
                    state.should_interpolate = false;
                }
            }
        }
        self.elapsed_since_snapshot += frame_dt;

        for (_, slot) in self.arena.iter_active_mut() {
            if slot.kind.info().wraps {
                physics::wrap_slot(slot, &self.bounds);
            }
        }
    }
}

/// Score and lives of the local ship, kept under its own lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub ship_id: Option<usize>,
    pub score: i32,
    pub lives: i32,
    pub game_over: bool,
}

impl Scoreboard {
    pub fn new(ship_id: usize) -> Self {
        Self {
            ship_id: Some(ship_id),
            ..Self::default()
        }
    }

    /// Reads the local ship's entry. A snapshot without it means the ship
    /// ran out of lives.
    pub fn update(&mut self, snapshot: &Snapshot) {
        let Some(ship_id) = self.ship_id else {
            return;
        };

        match snapshot
            .ships
            .iter()
            .find(|ship| usize::try_from(ship.ship_id).ok() == Some(ship_id))
        {
            Some(ship) => {
                self.score = ship.score;
                self.lives = ship.lives;
            }
            None if !self.game_over => {
                info!("Game over with score {}", self.score);
                self.lives = 0;
                self.game_over = true;
            }
            None => {}
        }
    }
}

//! Single-process game: the simulation runs in the client loop with no
//! network in between.

use crate::game::Scoreboard;
use log::{debug, info};
use server::game::{GameState, ResolutionMode};
use shared::arena::Arena;
use shared::physics::WorldBounds;
use shared::protocol::MessageType;

pub struct LocalGame {
    state: GameState,
    ship_id: Option<usize>,
    scoreboard: Scoreboard,
}

impl LocalGame {
    pub fn new(bounds: WorldBounds, asteroid_count: usize) -> Self {
        let state = GameState::new(bounds, ResolutionMode::SingleProcess, asteroid_count);
        Self::from_state(state)
    }

    /// Uses `state` as is and adds the player's ship to it.
    pub fn from_state(mut state: GameState) -> Self {
        let ship_id = state.add_ship();
        let scoreboard = match ship_id {
            Some(id) => {
                info!("Local game started as ship {}", id);
                Scoreboard::new(id)
            }
            None => Scoreboard::default(),
        };

        let mut game = LocalGame {
            state,
            ship_id,
            scoreboard,
        };
        game.refresh_scoreboard();
        game
    }

    pub fn ship_id(&self) -> Option<usize> {
        self.ship_id
    }

    pub fn arena(&self) -> &Arena {
        self.state.arena()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies this frame's input events, then steps the world by `dt`.
    pub fn frame(&mut self, events: &[MessageType], dt: f32) {
        if let Some(ship_id) = self.ship_id {
            for &event in events {
                if !self.state.apply_input(ship_id, event, dt) {
                    debug!("Input {:?} ignored, ship {} not in play", event, ship_id);
                }
            }
        }

        self.state.step(dt);
        self.refresh_scoreboard();
    }

    fn refresh_scoreboard(&mut self) {
        if self.ship_id.is_some() {
            let snapshot = self.state.build_snapshot();
            self.scoreboard.update(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::math::Vec2;
    use shared::{EntityKind, ASTEROID_SCORE};

    fn empty_game() -> LocalGame {
        let state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::SingleProcess,
            0,
            3,
        );
        LocalGame::from_state(state)
    }

    #[test]
    fn test_player_ship_is_spawned() {
        let game = empty_game();

        assert_eq!(game.ship_id(), Some(0));
        assert!(game.arena().is_active(0));
        assert_eq!(game.scoreboard().lives, 3);
        assert!(!game.scoreboard().game_over);
    }

    #[test]
    fn test_shoot_spawns_bullet() {
        let mut game = empty_game();

        game.frame(&[MessageType::Shoot], 1.0 / 60.0);

        let bullets = game
            .arena()
            .iter_active()
            .filter(|(_, slot)| slot.kind == EntityKind::Bullet)
            .count();
        assert_eq!(bullets, 1);
    }

    #[test]
    fn test_bullet_hit_scores_and_splits_asteroid() {
        let mut state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::SingleProcess,
            0,
            3,
        );
        state
            .insert_asteroid(Vec2::new(100.0, 0.0), Vec2::ZERO, 20.0)
            .unwrap();
        let mut game = LocalGame::from_state(state);

        game.frame(&[MessageType::Shoot], 1.0 / 60.0);
        for _ in 0..60 {
            game.frame(&[], 1.0 / 60.0);
        }

        assert!(game.scoreboard().score >= ASTEROID_SCORE);
        let asteroids = game
            .arena()
            .iter_active()
            .filter(|(_, slot)| slot.kind == EntityKind::Asteroid)
            .count();
        assert!(asteroids >= 2);
    }
}

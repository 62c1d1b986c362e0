//! The running game as seen by the frame loop

use crate::game::{ClientWorld, Scoreboard};
use crate::local::LocalGame;
use crate::rendering::Renderer;
use shared::protocol::MessageType;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Networked play: the mirror and scoreboard are shared with the network
/// task, and input events are queued for it to send.
pub struct NetworkedSession {
    pub world: Arc<Mutex<ClientWorld>>,
    pub scoreboard: Arc<Mutex<Scoreboard>>,
    pub inputs: mpsc::UnboundedSender<MessageType>,
}

pub enum Session {
    Local(LocalGame),
    Networked(NetworkedSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// The network task is gone and nothing more will arrive.
    Disconnected,
}

impl Session {
    /// Feeds one frame of input and advances the displayed world by `dt`.
    pub fn update(&mut self, events: Vec<MessageType>, dt: f32) -> SessionStatus {
        match self {
            Session::Local(game) => {
                game.frame(&events, dt);
                SessionStatus::Running
            }
            Session::Networked(session) => {
                for event in events {
                    if session.inputs.send(event).is_err() {
                        return SessionStatus::Disconnected;
                    }
                }
                session
                    .world
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .update(dt);
                SessionStatus::Running
            }
        }
    }

    pub fn draw(&self, renderer: &Renderer) {
        match self {
            Session::Local(game) => renderer.render(game.arena(), game.scoreboard()),
            Session::Networked(session) => {
                // Copy first so the two locks are never held together
                let board = session
                    .scoreboard
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                let world = session.world.lock().unwrap_or_else(PoisonError::into_inner);
                renderer.render(world.arena(), &board);
            }
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        match self {
            Session::Local(game) => game.scoreboard().clone(),
            Session::Networked(session) => session
                .scoreboard
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use server::game::{GameState, ResolutionMode};
    use shared::WorldBounds;

    #[test]
    fn test_local_session_steps_world() {
        let state = GameState::with_seed(
            WorldBounds::default(),
            ResolutionMode::SingleProcess,
            0,
            8,
        );
        let mut session = Session::Local(LocalGame::from_state(state));

        let status = session.update(vec![MessageType::Shoot], 1.0 / 60.0);

        assert_eq!(status, SessionStatus::Running);
        let Session::Local(game) = &session else {
            panic!("expected local session");
        };
        assert_eq!(game.state().others().len(), 1);
        assert_eq!(session.scoreboard().lives, 3);
    }

    #[test]
    fn test_networked_session_queues_inputs() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::Networked(NetworkedSession {
            world: Arc::new(Mutex::new(ClientWorld::new(WorldBounds::default()))),
            scoreboard: Arc::new(Mutex::new(Scoreboard::new(0))),
            inputs: tx,
        });

        let status = session.update(vec![MessageType::MoveUp, MessageType::Shoot], 0.016);

        assert_eq!(status, SessionStatus::Running);
        assert_eq!(rx.try_recv().unwrap(), MessageType::MoveUp);
        assert_eq!(rx.try_recv().unwrap(), MessageType::Shoot);
    }

    #[test]
    fn test_networked_session_reports_disconnect() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut session = Session::Networked(NetworkedSession {
            world: Arc::new(Mutex::new(ClientWorld::new(WorldBounds::default()))),
            scoreboard: Arc::new(Mutex::new(Scoreboard::new(0))),
            inputs: tx,
        });

        assert_eq!(session.update(vec![MessageType::Shoot], 0.016), SessionStatus::Disconnected);
        // No events means nothing to notice yet
        assert_eq!(session.update(Vec::new(), 0.016), SessionStatus::Running);
    }
}

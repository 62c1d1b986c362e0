//! Keyboard sampling into input events

use macroquad::prelude::*;
use shared::protocol::MessageType;

/// Keys held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl KeyState {
    /// Reads the arrow keys (or WASD) and space from macroquad.
    pub fn sample() -> Self {
        Self {
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            shoot: is_key_down(KeyCode::Space),
        }
    }
}

/// Turns key state into per-frame events.
///
/// Movement keys emit one event every frame they are held. Shooting fires
/// once per press.
#[derive(Debug, Default)]
pub struct InputManager {
    prev_shoot: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&mut self, keys: KeyState) -> Vec<MessageType> {
        let mut events = Vec::with_capacity(5);

        if keys.up {
            events.push(MessageType::MoveUp);
        }
        if keys.down {
            events.push(MessageType::MoveDown);
        }
        if keys.left {
            events.push(MessageType::MoveLeft);
        }
        if keys.right {
            events.push(MessageType::MoveRight);
        }

        // Detect key press events (current && !previous)
        if keys.shoot && !self.prev_shoot {
            events.push(MessageType::Shoot);
        }
        self.prev_shoot = keys.shoot;

        events
    }

    /// Samples the keyboard and returns this frame's events.
    pub fn update(&mut self) -> Vec<MessageType> {
        self.events(KeyState::sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_repeat_every_frame() {
        let mut input = InputManager::new();
        let keys = KeyState {
            up: true,
            left: true,
            ..KeyState::default()
        };

        for _ in 0..3 {
            assert_eq!(
                input.events(keys),
                vec![MessageType::MoveUp, MessageType::MoveLeft]
            );
        }
    }

    #[test]
    fn test_shoot_is_edge_triggered() {
        let mut input = InputManager::new();
        let held = KeyState {
            shoot: true,
            ..KeyState::default()
        };

        assert_eq!(input.events(held), vec![MessageType::Shoot]);
        assert!(input.events(held).is_empty());
        assert!(input.events(KeyState::default()).is_empty());
        assert_eq!(input.events(held), vec![MessageType::Shoot]);
    }

    #[test]
    fn test_no_keys_no_events() {
        let mut input = InputManager::new();
        assert!(input.events(KeyState::default()).is_empty());
    }
}

//! Keyboard input tracking
//!
//! Abstracts key events into a per-tick snapshot. Steering and speed keys are
//! level-triggered (held keys act every tick); jump is edge-triggered, one
//! request per key-down transition, with auto-repeat ignored.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string. Anything else is not ours.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(KeyCode::ArrowLeft),
            "ArrowRight" => Some(KeyCode::ArrowRight),
            "ArrowUp" => Some(KeyCode::ArrowUp),
            "ArrowDown" => Some(KeyCode::ArrowDown),
            "Space" => Some(KeyCode::Space),
            _ => None,
        }
    }
}

/// Held keys plus a pending jump
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    space: bool,
    jump_pending: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::ArrowLeft => self.left = true,
            KeyCode::ArrowRight => self.right = true,
            KeyCode::ArrowUp => self.up = true,
            KeyCode::ArrowDown => self.down = true,
            KeyCode::Space => {
                // Auto-repeat sends key-down while held
                if !self.space {
                    self.jump_pending = true;
                }
                self.space = true;
            }
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::ArrowLeft => self.left = false,
            KeyCode::ArrowRight => self.right = false,
            KeyCode::ArrowUp => self.up = false,
            KeyCode::ArrowDown => self.down = false,
            KeyCode::Space => self.space = false,
        }
    }

    /// Key-down by DOM code; unknown codes are ignored
    pub fn key_down_code(&mut self, code: &str) {
        if let Some(key) = KeyCode::from_code(code) {
            self.key_down(key);
        }
    }

    /// Key-up by DOM code; unknown codes are ignored
    pub fn key_up_code(&mut self, code: &str) {
        if let Some(key) = KeyCode::from_code(code) {
            self.key_up(key);
        }
    }

    /// Input for the next tick. Consumes the pending jump.
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            accelerate: self.up,
            decelerate: self.down,
            jump: std::mem::take(&mut self.jump_pending),
        }
    }

    /// Release everything (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_repeat_every_tick() {
        let mut keyboard = Keyboard::new();
        keyboard.key_down(KeyCode::ArrowLeft);
        keyboard.key_down(KeyCode::ArrowUp);
        for _ in 0..3 {
            let input = keyboard.snapshot();
            assert!(input.left && input.accelerate);
            assert!(!input.right && !input.decelerate);
        }
        keyboard.key_up(KeyCode::ArrowLeft);
        assert!(!keyboard.snapshot().left);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut keyboard = Keyboard::new();
        keyboard.key_down(KeyCode::Space);
        // Auto-repeat while held
        keyboard.key_down(KeyCode::Space);
        assert!(keyboard.snapshot().jump);
        assert!(!keyboard.snapshot().jump);

        keyboard.key_down(KeyCode::Space);
        assert!(!keyboard.snapshot().jump);

        keyboard.key_up(KeyCode::Space);
        keyboard.key_down(KeyCode::Space);
        assert!(keyboard.snapshot().jump);
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let mut keyboard = Keyboard::new();
        keyboard.key_down_code("KeyQ");
        keyboard.key_down_code("Enter");
        assert_eq!(keyboard.snapshot(), TickInput::default());

        keyboard.key_down_code("ArrowRight");
        assert!(keyboard.snapshot().right);
        keyboard.key_up_code("ArrowRight");
        assert!(!keyboard.snapshot().right);
    }
}

//! Keyboard sampling for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};
use rcb_core::InputSnapshot;

const ACTION_KEYS: [KeyCode; 4] = [KeyCode::Escape, KeyCode::Key1, KeyCode::Key2, KeyCode::Key3];

/// Movement keys that are currently held; WASD and the arrow keys are equivalent.
pub fn held_input() -> InputSnapshot {
    InputSnapshot {
        up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    }
}

/// Menu and quit keys that went down this frame.
pub fn pressed_keys() -> Vec<KeyCode> {
    ACTION_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect()
}

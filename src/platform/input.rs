//! Held keys -> per-tick input
//!
//! Movement and fire are level-triggered. Pause and music are edge-triggered:
//! holding the key down across many frames yields exactly one toggle.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Shoot,
    Pause,
    Music,
}

impl Key {
    /// Map a DOM-style key name ("ArrowLeft", " ", "p", ...) to a game key
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Space" | "Spacebar" => Some(Key::Shoot),
            "p" | "P" => Some(Key::Pause),
            "m" | "M" => Some(Key::Music),
            _ => None,
        }
    }
}

/// Which keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    pub pause: bool,
    pub music: bool,
}

impl KeyboardState {
    pub fn set(&mut self, key: Key, down: bool) {
        let slot = match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::Shoot => &mut self.shoot,
            Key::Pause => &mut self.pause,
            Key::Music => &mut self.music,
        };
        *slot = down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Shoot => self.shoot,
            Key::Pause => self.pause,
            Key::Music => self.music,
        }
    }

    /// Arrow keys as a steer vector, normalized so diagonals are not faster
    pub fn movement(&self) -> MovementInput {
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        if self.left {
            x -= 1.0;
        }
        if self.right {
            x += 1.0;
        }
        if self.up {
            y += 1.0;
        }
        if self.down {
            y -= 1.0;
        }
        if x != 0.0 && y != 0.0 {
            let magnitude = (x * x + y * y).sqrt();
            x /= magnitude;
            y /= magnitude;
        }
        MovementInput {
            x,
            y,
            is_shooting: self.shoot,
        }
    }
}

/// Level-triggered movement sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementInput {
    pub x: f32,
    pub y: f32,
    pub is_shooting: bool,
}

/// Tracks key transitions so toggles fire once per press
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    keys: KeyboardState,
    pause_pending: bool,
    music_pending: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key transition from the host. Repeats of the same state are ignored.
    pub fn key_event(&mut self, key: Key, down: bool) {
        let was_down = self.keys.is_down(key);
        if was_down == down {
            return;
        }
        self.keys.set(key, down);
        if down {
            match key {
                Key::Pause => self.pause_pending = true,
                Key::Music => self.music_pending = true,
                _ => {}
            }
        }
    }

    pub fn keys(&self) -> &KeyboardState {
        &self.keys
    }

    /// Consume a pending pause press
    pub fn take_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_pending)
    }

    /// Consume a pending music press
    pub fn take_music(&mut self) -> bool {
        std::mem::take(&mut self.music_pending)
    }

    /// Build this frame's input, consuming pending toggles
    pub fn sample(&mut self) -> TickInput {
        let movement = self.keys.movement();
        TickInput {
            x: movement.x,
            y: movement.y,
            shoot: movement.is_shooting,
            pause: self.take_pause(),
            toggle_music: self.take_music(),
        }
    }
}

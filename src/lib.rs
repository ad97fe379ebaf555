//! Meteor Storm - A fixed-viewport meteor shooter
//!
//! Core modules:
//! - `sim`: Simulation core (movement, spawning, collisions, game state)
//! - `audio`: Sound effect mapping and the injected audio sink
//! - `platform`: Host input adaptation (held keys -> tick input)
//! - `settings`: Data-driven tuning and presets

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioLog, AudioSink, SilentAudio, SoundEffect};
pub use settings::{ConfigError, ConfigPreset, SimConfig};
pub use sim::{GameEvent, GamePhase, GameSnapshot, Simulation, TickInput, TickSummary};

use glam::Vec2;

/// Game configuration constants (defaults for `SimConfig`)
pub mod consts {
    /// Largest Δt a single step will integrate
    pub const MAX_STEP: f32 = 0.25;

    /// Play field half-extents (400x660 canvas)
    pub const FIELD_HALF_WIDTH: f32 = 200.0;
    pub const FIELD_HALF_HEIGHT: f32 = 330.0;
    /// Shorter field variant (400x600 canvas)
    pub const COMPACT_FIELD_HALF_HEIGHT: f32 = 300.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 300.0;
    pub const SHIP_SIZE: f32 = 40.0;
    pub const SHIP_SPRITE_SIZE: f32 = 64.0;
    pub const SHIP_START_X: f32 = 0.0;
    pub const SHIP_START_Y: f32 = -250.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 500.0;
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_MUZZLE_OFFSET: f32 = 20.0;
    pub const FIRE_COOLDOWN: f32 = 0.1;
    /// Bullets above this height are gone
    pub const BULLET_CEILING: f32 = 440.0;

    /// Meteorite defaults
    pub const METEORITE_SPAWN_INTERVAL: f32 = 1.5;
    pub const METEORITE_CAP: usize = 10;
    pub const METEORITE_SPAWN_Y: f32 = 380.0;
    pub const METEORITE_SPAWN_HALF_SPAN: f32 = 150.0;
    pub const METEORITE_MIN_SIZE: f32 = 20.0;
    pub const METEORITE_MAX_SIZE: f32 = 50.0;
    pub const METEORITE_MAX_DRIFT: f32 = 50.0;
    pub const METEORITE_MIN_FALL: f32 = 50.0;
    pub const METEORITE_MAX_FALL: f32 = 200.0;
    pub const METEORITE_MAX_SPIN: f32 = 1.0;
    /// Despawn margins (wider than the bounds query so rocks linger past the edge)
    pub const METEORITE_FLOOR: f32 = -440.0;
    pub const METEORITE_SIDE_LIMIT: f32 = 300.0;

    /// Generic out-of-bounds query margins
    pub const BOUNDS_HALF_WIDTH: f32 = 250.0;
    pub const BOUNDS_HALF_HEIGHT: f32 = 440.0;

    /// Scoring
    pub const STARTING_LIVES: i32 = 3;
    pub const KILL_REWARD: u64 = 10;
    pub const HIT_PENALTY: u64 = 5;
}

/// Clamp a scalar input axis to [-1, 1], mapping NaN/inf garbage to 0
#[inline]
pub fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Clamp a frame delta into [0, max_step]
#[inline]
pub fn sanitize_dt(dt: f32, max_step: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_step) } else { 0.0 }
}

/// Axis-aligned box corners for a centered rectangle
#[inline]
pub fn centered_box(center: Vec2, size: Vec2) -> (Vec2, Vec2) {
    let half = size * 0.5;
    (center - half, center + half)
}

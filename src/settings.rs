//! Simulation tuning and presets
//!
//! Every gameplay constant lives here so a host can override it from JSON.
//! Missing fields fall back to the defaults in `crate::consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Errors raised while loading or validating a config
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid JSON for `SimConfig`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Named config presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConfigPreset {
    /// 40x40 ship on the 400x660 field
    #[default]
    Classic,
    /// 64x64 sprite ship on the shorter 400x600 field
    Sprite,
}

impl ConfigPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigPreset::Classic => "Classic",
            ConfigPreset::Sprite => "Sprite",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ConfigPreset::Classic),
            "sprite" => Some(ConfigPreset::Sprite),
            _ => None,
        }
    }
}

/// Play field extents and out-of-bounds margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Half-width of the visible field (ship clamp)
    pub half_width: f32,
    /// Half-height of the visible field (ship clamp)
    pub half_height: f32,
    /// Half-extents for `Entity::is_out_of_bounds`
    pub bounds_half_width: f32,
    pub bounds_half_height: f32,
}

impl PlayfieldConfig {
    /// Rectangle for the out-of-bounds query
    pub fn bounds(&self) -> Bounds {
        Bounds {
            half_width: self.bounds_half_width,
            half_height: self.bounds_half_height,
        }
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            half_width: FIELD_HALF_WIDTH,
            half_height: FIELD_HALF_HEIGHT,
            bounds_half_width: BOUNDS_HALF_WIDTH,
            bounds_half_height: BOUNDS_HALF_HEIGHT,
        }
    }
}

/// Player ship tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Units per second at full input deflection
    pub speed: f32,
    /// Square hull edge length
    pub size: f32,
    /// Spawn and reset position
    pub start: Vec2,
}

impl ShipConfig {
    /// Clamp inset from the field edge (half the hull width)
    pub fn padding(&self) -> f32 {
        self.size / 2.0
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            size: SHIP_SIZE,
            start: Vec2::new(SHIP_START_X, SHIP_START_Y),
        }
    }
}

/// Bullet tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub lifetime: f32,
    pub size: Vec2,
    /// Seconds between shots while fire is held
    pub cooldown: f32,
    /// Spawn offset above the ship center
    pub muzzle_offset: f32,
    /// Bullets are removed once above this y
    pub ceiling: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifetime: BULLET_LIFETIME,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            cooldown: FIRE_COOLDOWN,
            muzzle_offset: BULLET_MUZZLE_OFFSET,
            ceiling: BULLET_CEILING,
        }
    }
}

/// Meteorite spawn and despawn tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteoriteConfig {
    pub spawn_interval: f32,
    pub max_active: usize,
    pub spawn_y: f32,
    /// Spawn x is uniform in [-spawn_half_span, spawn_half_span]
    pub spawn_half_span: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Horizontal drift is uniform in [-max_drift, max_drift]
    pub max_drift: f32,
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Spin is uniform in [-max_spin, max_spin] rad/s
    pub max_spin: f32,
    /// Despawn below this y
    pub floor: f32,
    /// Despawn beyond this |x|
    pub side_limit: f32,
}

impl Default for MeteoriteConfig {
    fn default() -> Self {
        Self {
            spawn_interval: METEORITE_SPAWN_INTERVAL,
            max_active: METEORITE_CAP,
            spawn_y: METEORITE_SPAWN_Y,
            spawn_half_span: METEORITE_SPAWN_HALF_SPAN,
            min_size: METEORITE_MIN_SIZE,
            max_size: METEORITE_MAX_SIZE,
            max_drift: METEORITE_MAX_DRIFT,
            min_fall_speed: METEORITE_MIN_FALL,
            max_fall_speed: METEORITE_MAX_FALL,
            max_spin: METEORITE_MAX_SPIN,
            floor: METEORITE_FLOOR,
            side_limit: METEORITE_SIDE_LIMIT,
        }
    }
}

/// Lives and score deltas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub starting_lives: i32,
    pub kill_reward: u64,
    /// Subtracted on a ship hit, score never drops below zero
    pub hit_penalty: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            kill_reward: KILL_REWARD,
            hit_penalty: HIT_PENALTY,
        }
    }
}

/// Complete simulation config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub playfield: PlayfieldConfig,
    pub ship: ShipConfig,
    pub bullet: BulletConfig,
    pub meteorite: MeteoriteConfig,
    pub scoring: ScoringConfig,
    /// Largest Δt integrated by a single step
    pub max_step: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            ship: ShipConfig::default(),
            bullet: BulletConfig::default(),
            meteorite: MeteoriteConfig::default(),
            scoring: ScoringConfig::default(),
            max_step: MAX_STEP,
        }
    }
}

impl SimConfig {
    /// Create config from a preset
    pub fn from_preset(preset: ConfigPreset) -> Self {
        let mut config = Self::default();
        if preset == ConfigPreset::Sprite {
            config.ship.size = SHIP_SPRITE_SIZE;
            config.playfield.half_height = COMPACT_FIELD_HALF_HEIGHT;
        }
        config
    }

    /// Parse and validate a JSON config (partial documents are fine)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_step", self.max_step)?;

        positive("playfield.half_width", self.playfield.half_width)?;
        positive("playfield.half_height", self.playfield.half_height)?;
        positive("playfield.bounds_half_width", self.playfield.bounds_half_width)?;
        positive("playfield.bounds_half_height", self.playfield.bounds_half_height)?;

        positive("ship.speed", self.ship.speed)?;
        positive("ship.size", self.ship.size)?;
        if self.ship.size >= 2.0 * self.playfield.half_width.min(self.playfield.half_height) {
            return Err(invalid("ship.size", "ship does not fit inside the play field"));
        }

        positive("bullet.speed", self.bullet.speed)?;
        positive("bullet.lifetime", self.bullet.lifetime)?;
        positive("bullet.cooldown", self.bullet.cooldown)?;
        positive("bullet.size.x", self.bullet.size.x)?;
        positive("bullet.size.y", self.bullet.size.y)?;
        positive("bullet.ceiling", self.bullet.ceiling)?;

        let m = &self.meteorite;
        positive("meteorite.spawn_interval", m.spawn_interval)?;
        positive("meteorite.min_size", m.min_size)?;
        ordered("meteorite.max_size", m.min_size, m.max_size)?;
        non_negative("meteorite.spawn_half_span", m.spawn_half_span)?;
        non_negative("meteorite.max_drift", m.max_drift)?;
        non_negative("meteorite.max_spin", m.max_spin)?;
        non_negative("meteorite.min_fall_speed", m.min_fall_speed)?;
        ordered("meteorite.max_fall_speed", m.min_fall_speed, m.max_fall_speed)?;
        positive("meteorite.side_limit", m.side_limit)?;
        if !m.spawn_y.is_finite() {
            return Err(invalid("meteorite.spawn_y", "must be finite"));
        }
        if !(m.floor.is_finite() && m.floor < m.spawn_y) {
            return Err(invalid(
                "meteorite.floor",
                format!("must be below spawn_y ({}), got {}", m.spawn_y, m.floor),
            ));
        }

        if self.scoring.starting_lives <= 0 {
            return Err(invalid("scoring.starting_lives", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a non-negative number, got {value}")))
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if max.is_finite() && max >= min {
        Ok(())
    } else {
        Err(invalid(field, format!("range is inverted ({min} > {max})")))
    }
}

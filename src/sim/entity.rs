//! Entity data model
//!
//! Ship, bullets and meteorites share one shape; the kind-specific part is a
//! closed enum payload so the integrator can dispatch with a single match.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::centered_box;
use crate::settings::{BulletConfig, ShipConfig};

/// Unique identifier for an entity (never reused within a run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind-specific entity data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player ship
    Ship {
        /// Units per second at full deflection
        speed: f32,
        /// Inset from the field edge used when clamping
        padding: f32,
    },
    /// A player projectile
    Bullet { age: f32, lifetime: f32 },
    /// A falling rock
    Meteorite {
        /// Radians per second
        spin: f32,
        /// Accumulated rotation for rendering
        rotation: f32,
    },
}

/// Payload-free kind tag for outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    Ship,
    Bullet,
    Meteorite,
}

impl EntityKind {
    pub fn tag(&self) -> EntityTag {
        match self {
            EntityKind::Ship { .. } => EntityTag::Ship,
            EntityKind::Bullet { .. } => EntityTag::Bullet,
            EntityKind::Meteorite { .. } => EntityTag::Meteorite,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let (min, max) = centered_box(center, size);
        Self { min, max }
    }

    /// Inclusive overlap test (touching edges count as a hit)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Rectangle used by the generic out-of-bounds query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_width: f32,
    pub half_height: f32,
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn ship(id: EntityId, config: &ShipConfig) -> Self {
        Self {
            id,
            pos: config.start,
            vel: Vec2::ZERO,
            size: Vec2::splat(config.size),
            active: true,
            kind: EntityKind::Ship {
                speed: config.speed,
                padding: config.padding(),
            },
        }
    }

    /// Bullet leaving the muzzle at `origin`, travelling straight up
    pub fn bullet(id: EntityId, origin: Vec2, config: &BulletConfig) -> Self {
        Self {
            id,
            pos: origin + Vec2::new(0.0, config.muzzle_offset),
            vel: Vec2::new(0.0, config.speed),
            size: config.size,
            active: true,
            kind: EntityKind::Bullet {
                age: 0.0,
                lifetime: config.lifetime,
            },
        }
    }

    pub fn meteorite(id: EntityId, pos: Vec2, vel: Vec2, size: f32, spin: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            size: Vec2::splat(size),
            active: true,
            kind: EntityKind::Meteorite {
                spin,
                rotation: 0.0,
            },
        }
    }

    pub fn tag(&self) -> EntityTag {
        self.kind.tag()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Rotation angle (meteorites only)
    pub fn rotation(&self) -> Option<f32> {
        match self.kind {
            EntityKind::Meteorite { rotation, .. } => Some(rotation),
            _ => None,
        }
    }

    /// Strict bounds query, narrower than the meteorite despawn margin
    pub fn is_out_of_bounds(&self, bounds: &Bounds) -> bool {
        self.pos.y > bounds.half_height
            || self.pos.y < -bounds.half_height
            || self.pos.x.abs() > bounds.half_width
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of host concerns:
//! - Δt and input come in, entities and events go out
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio synthesis or platform dependencies

pub mod arena;
pub mod collision;
pub mod entity;
pub mod movement;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::EntityArena;
pub use collision::{BulletHit, Collisions, ShipHit, detect_collisions};
pub use entity::{Aabb, Bounds, Entity, EntityId, EntityKind, EntityTag};
pub use movement::integrate;
pub use resolve::resolve_collisions;
pub use spawn::{SpawnAttempt, SpawnScheduler};
pub use state::{GameEvent, GamePhase, GameSnapshot, GameState};
pub use tick::{EntityView, Simulation, TickInput, TickSummary};

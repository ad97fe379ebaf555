//! Timed spawning: fire cooldown and meteorite cadence
//!
//! Both timers accumulate Δt and reset to zero when they fire. The RNG is a
//! seeded PCG so a run is reproducible from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::EntityArena;
use super::entity::{Entity, EntityId};
use crate::settings::{BulletConfig, MeteoriteConfig};

/// Outcome of a meteorite timer check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAttempt {
    /// Timer has not elapsed yet
    Waiting,
    /// Timer elapsed and a meteorite was added
    Spawned(EntityId),
    /// Timer elapsed but the population cap was reached
    Capped,
}

/// Fire cooldown and meteorite spawn timers
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    /// Seconds accumulated since the last shot (only counts while not ready)
    fire_elapsed: f32,
    fire_ready: bool,
    /// Seconds accumulated toward the next meteorite
    meteor_elapsed: f32,
    rng: Pcg32,
}

impl SpawnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            fire_elapsed: 0.0,
            fire_ready: true,
            meteor_elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Clear both timers (the RNG stream continues)
    pub fn reset(&mut self) {
        self.fire_elapsed = 0.0;
        self.fire_ready = true;
        self.meteor_elapsed = 0.0;
    }

    pub fn fire_ready(&self) -> bool {
        self.fire_ready
    }

    pub fn meteor_timer(&self) -> f32 {
        self.meteor_elapsed
    }

    /// Advance the fire cooldown and shoot if the trigger is held.
    ///
    /// Returns the new bullet's id when one was fired.
    pub fn update_fire(
        &mut self,
        dt: f32,
        shooting: bool,
        ship_pos: Vec2,
        bullets: &mut EntityArena,
        config: &BulletConfig,
        alloc_id: impl FnOnce() -> EntityId,
    ) -> Option<EntityId> {
        if !self.fire_ready {
            self.fire_elapsed += dt;
            if self.fire_elapsed >= config.cooldown {
                self.fire_ready = true;
                self.fire_elapsed = 0.0;
            }
        }

        if !(shooting && self.fire_ready) {
            return None;
        }

        let id = alloc_id();
        let bullet = Entity::bullet(id, ship_pos, config);
        log::debug!("Fired bullet {} from ({:.1}, {:.1})", id, ship_pos.x, ship_pos.y);
        bullets.insert(bullet);
        self.fire_ready = false;
        self.fire_elapsed = 0.0;
        Some(id)
    }

    /// Advance the meteorite timer and spawn when it elapses.
    ///
    /// A capped attempt still resets the timer, so there is no catch-up burst.
    pub fn update_meteorites(
        &mut self,
        dt: f32,
        meteorites: &mut EntityArena,
        config: &MeteoriteConfig,
        alloc_id: impl FnOnce() -> EntityId,
    ) -> SpawnAttempt {
        self.meteor_elapsed += dt;
        if self.meteor_elapsed < config.spawn_interval {
            return SpawnAttempt::Waiting;
        }
        self.meteor_elapsed = 0.0;

        if meteorites.active_count() >= config.max_active {
            log::debug!("Meteorite spawn skipped: {} active (cap)", config.max_active);
            return SpawnAttempt::Capped;
        }

        let rock = self.roll_meteorite(alloc_id(), config);
        log::debug!(
            "Spawned meteorite {} at ({:.1}, {:.1}) size {:.1}",
            rock.id,
            rock.pos.x,
            rock.pos.y,
            rock.size.x
        );
        let id = rock.id;
        meteorites.insert(rock);
        SpawnAttempt::Spawned(id)
    }

    fn roll_meteorite(&mut self, id: EntityId, config: &MeteoriteConfig) -> Entity {
        let x = self.symmetric(config.spawn_half_span);
        let size = self.span(config.min_size, config.max_size);
        let drift = self.symmetric(config.max_drift);
        let fall = self.span(config.min_fall_speed, config.max_fall_speed);
        let spin = self.symmetric(config.max_spin);
        Entity::meteorite(
            id,
            Vec2::new(x, config.spawn_y),
            Vec2::new(drift, -fall),
            size,
            spin,
        )
    }

    /// Uniform in [min, max], tolerating a collapsed range
    fn span(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.random_range(min..=max)
        } else {
            min
        }
    }

    fn symmetric(&mut self, limit: f32) -> f32 {
        self.span(-limit, limit)
    }
}

//! Per-frame simulation step
//!
//! The host calls `Simulation::step` once per displayed frame with the elapsed
//! time and the current input. One step runs input -> integration -> spawning
//! -> collision detection -> resolution -> compaction, then hands the events
//! to the injected audio sink and returns a summary for rendering and HUD.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::collision::detect_collisions;
use super::entity::{Entity, EntityId, EntityTag};
use super::movement::integrate;
use super::resolve::resolve_collisions;
use super::spawn::SpawnScheduler;
use super::state::{GameEvent, GamePhase, GameSnapshot, GameState};
use crate::audio::{AudioSink, SilentAudio, SoundEffect};
use crate::settings::{ConfigError, SimConfig};
use crate::{sanitize_axis, sanitize_dt};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Horizontal steer in [-1, 1] (already normalized for diagonals)
    pub x: f32,
    /// Vertical steer in [-1, 1]
    pub y: f32,
    /// Fire held
    pub shoot: bool,
    /// Pause toggle (edge-triggered by the host)
    pub pause: bool,
    /// Music toggle (edge-triggered by the host)
    pub toggle_music: bool,
}

impl TickInput {
    /// Copy with steer components forced into [-1, 1]
    pub fn sanitized(&self) -> Self {
        Self {
            x: sanitize_axis(self.x),
            y: sanitize_axis(self.y),
            ..*self
        }
    }

    pub fn steer(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Render-facing view of one active entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityTag,
    pub pos: Vec2,
    pub size: Vec2,
    /// Meteorites only
    pub rotation: Option<f32>,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.tag(),
            pos: entity.pos,
            size: entity.size,
            rotation: entity.rotation(),
        }
    }
}

/// Everything the host needs after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Active ship, bullets and meteorites (in that order)
    pub entities: Vec<EntityView>,
    /// Events raised this tick, in the order they happened
    pub events: Vec<GameEvent>,
    pub state: GameSnapshot,
}

impl TickSummary {
    pub fn count(&self, kind: EntityTag) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

/// The simulation: entities, timers, game state and the audio sink
#[derive(Debug)]
pub struct Simulation<A: AudioSink = SilentAudio> {
    config: SimConfig,
    state: GameState,
    ship: Entity,
    bullets: EntityArena,
    meteorites: EntityArena,
    spawner: SpawnScheduler,
    audio: A,
    /// Background music is started on the first movement
    music_started: bool,
    /// Steps actually simulated (paused/over steps excluded)
    ticks: u64,
    next_id: u32,
}

fn alloc_id(next: &mut u32) -> EntityId {
    let id = EntityId(*next);
    *next += 1;
    id
}

impl Simulation<SilentAudio> {
    /// Default tuning, no audio
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SimConfig::default(), seed, SilentAudio)
    }
}

impl<A: AudioSink> Simulation<A> {
    /// Create a simulation from a validated config and an audio sink
    pub fn new(config: SimConfig, seed: u64, audio: A) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed, audio))
    }

    fn build(config: SimConfig, seed: u64, audio: A) -> Self {
        let mut next_id = 1;
        let ship = Entity::ship(alloc_id(&mut next_id), &config.ship);
        let cap = config.meteorite.max_active;
        log::info!(
            "Simulation created (seed {}, field {}x{}, ship at ({}, {}))",
            seed,
            config.playfield.half_width * 2.0,
            config.playfield.half_height * 2.0,
            ship.pos.x,
            ship.pos.y
        );
        Self {
            state: GameState::new(config.scoring.starting_lives),
            ship,
            bullets: EntityArena::with_capacity(32),
            meteorites: EntityArena::with_capacity(cap + 1),
            spawner: SpawnScheduler::new(seed),
            audio,
            music_started: false,
            ticks: 0,
            next_id,
            config,
        }
    }

    /// Advance the game by `dt` seconds
    pub fn step(&mut self, input: &TickInput, dt: f32) -> TickSummary {
        let raw_dt = dt;
        let dt = sanitize_dt(raw_dt, self.config.max_step);
        if !raw_dt.is_finite() || raw_dt < 0.0 {
            log::warn!("Rejected frame delta {raw_dt}, stepping with 0");
        } else if dt < raw_dt {
            log::debug!("Frame delta {raw_dt:.3}s clamped to {dt:.3}s");
        }
        let input = input.sanitized();

        // Music is a host concern and works in every phase
        if input.toggle_music {
            self.audio.toggle_music();
        }
        if input.pause {
            self.state.toggle_pause();
        }
        if self.state.phase != GamePhase::Playing {
            return self.summary(Vec::new());
        }

        self.ticks += 1;
        let steer = input.steer();
        if !self.music_started && steer != Vec2::ZERO {
            self.audio.start_music();
            self.music_started = true;
        }

        // Integration
        integrate(&mut self.ship, dt, steer, &self.config);
        for bullet in self.bullets.iter_active_mut() {
            integrate(bullet, dt, Vec2::ZERO, &self.config);
        }
        for rock in self.meteorites.iter_active_mut() {
            integrate(rock, dt, Vec2::ZERO, &self.config);
        }

        // Spawning
        let mut events = Vec::new();
        let next_id = &mut self.next_id;
        if let Some(bullet) = self.spawner.update_fire(
            dt,
            input.shoot,
            self.ship.pos,
            &mut self.bullets,
            &self.config.bullet,
            || alloc_id(next_id),
        ) {
            events.push(GameEvent::Shoot { bullet });
        }
        let attempt = self.spawner.update_meteorites(
            dt,
            &mut self.meteorites,
            &self.config.meteorite,
            || alloc_id(next_id),
        );

        // Collisions
        let hits = detect_collisions(&self.bullets, &self.meteorites, &self.ship);
        events.extend(resolve_collisions(
            &hits,
            &mut self.bullets,
            &mut self.meteorites,
            &mut self.state,
            &self.config.scoring,
        ));

        let removed_bullets = self.bullets.compact();
        let removed_rocks = self.meteorites.compact();
        if removed_bullets + removed_rocks > 0 {
            log::debug!("Removed {removed_bullets} bullets, {removed_rocks} meteorites");
        }
        log::trace!(
            "tick {}: dt={dt:.4} bullets={} meteorites={} spawn={attempt:?} events={}",
            self.ticks,
            self.bullets.len(),
            self.meteorites.len(),
            events.len()
        );

        for event in &events {
            self.audio.play(SoundEffect::from(*event));
        }
        self.summary(events)
    }

    /// Full restart: fresh score and lives, empty field, timers cleared
    pub fn reset(&mut self) {
        self.state.reset();
        self.bullets.clear();
        self.meteorites.clear();
        self.spawner.reset();
        self.ship = Entity::ship(self.ship.id, &self.config.ship);
        log::info!("Game reset");
    }

    /// Add a meteorite directly (scripted waves, tests). Ignores the cap.
    pub fn spawn_meteorite(&mut self, pos: Vec2, vel: Vec2, size: f32, spin: f32) -> EntityId {
        let id = alloc_id(&mut self.next_id);
        self.meteorites
            .insert(Entity::meteorite(id, pos, vel, size, spin));
        id
    }

    pub fn set_spawn_interval(&mut self, seconds: f32) {
        if seconds.is_finite() && seconds > 0.0 {
            self.config.meteorite.spawn_interval = seconds;
            log::info!("Spawn interval set to {seconds}s");
        } else {
            log::warn!("Ignoring spawn interval {seconds}");
        }
    }

    pub fn set_max_meteorites(&mut self, max: usize) {
        self.config.meteorite.max_active = max;
        log::info!("Max meteorites set to {max}");
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn ship(&self) -> &Entity {
        &self.ship
    }

    pub fn bullets(&self) -> &EntityArena {
        &self.bullets
    }

    pub fn meteorites(&self) -> &EntityArena {
        &self.meteorites
    }

    pub fn active_bullet_count(&self) -> usize {
        self.bullets.active_count()
    }

    pub fn active_meteorite_count(&self) -> usize {
        self.meteorites.active_count()
    }

    /// Out-of-bounds query against the configured playfield bounds
    pub fn is_out_of_bounds(&self, entity: &Entity) -> bool {
        entity.is_out_of_bounds(&self.config.playfield.bounds())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fire_ready(&self) -> bool {
        self.spawner.fire_ready()
    }

    pub fn meteor_timer(&self) -> f32 {
        self.spawner.meteor_timer()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// One-line collision overview for debug overlays
    pub fn debug_info(&self) -> String {
        let hits = detect_collisions(&self.bullets, &self.meteorites, &self.ship);
        format!(
            "Collision Debug: {} bullets, {} meteorites, {} bullet-meteorite hits, {} ship-meteorite hits",
            self.active_bullet_count(),
            self.active_meteorite_count(),
            hits.bullet_meteorite.len(),
            hits.ship_meteorite.len()
        )
    }

    fn summary(&self, events: Vec<GameEvent>) -> TickSummary {
        let mut entities = Vec::with_capacity(1 + self.bullets.len() + self.meteorites.len());
        if self.ship.active {
            entities.push(EntityView::from(&self.ship));
        }
        entities.extend(self.bullets.iter_active().map(|(_, e)| EntityView::from(e)));
        entities.extend(self.meteorites.iter_active().map(|(_, e)| EntityView::from(e)));
        TickSummary {
            entities,
            events,
            state: self.state.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioLog;

    const DT: f32 = 1.0 / 60.0;

    fn shoot() -> TickInput {
        TickInput {
            shoot: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_step_fires_and_reports_shoot() {
        let mut sim = Simulation::with_seed(1);
        let summary = sim.step(&shoot(), DT);
        assert_eq!(summary.count(EntityTag::Bullet), 1);
        assert_eq!(summary.count(EntityTag::Ship), 1);
        assert!(matches!(summary.events[..], [GameEvent::Shoot { .. }]));
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut sim = Simulation::with_seed(1);
        sim.step(&shoot(), DT);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let paused = sim.step(&pause, DT);
        assert!(paused.state.is_paused);

        let frozen = sim.step(&TickInput { x: 1.0, shoot: true, ..Default::default() }, 0.2);
        assert_eq!(frozen.entities, paused.entities);
        assert!(frozen.events.is_empty());

        // Resume and play on the same tick
        let resumed = sim.step(&pause, DT);
        assert!(!resumed.state.is_paused);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_bad_dt_is_clamped() {
        let mut sim = Simulation::with_seed(1);
        let start = sim.ship().pos;
        sim.step(&TickInput { x: 1.0, ..Default::default() }, f32::NAN);
        assert_eq!(sim.ship().pos, start);
        sim.step(&TickInput { x: 1.0, ..Default::default() }, -1.0);
        assert_eq!(sim.ship().pos, start);
        sim.step(&TickInput { x: 1.0, ..Default::default() }, 100.0);
        let moved = sim.ship().pos.x - start.x;
        assert!((moved - 300.0 * sim.config().max_step).abs() < 1e-3);
    }

    #[test]
    fn test_garbage_input_is_clamped() {
        let mut sim = Simulation::with_seed(1);
        let start = sim.ship().pos;
        sim.step(&TickInput { x: 50.0, y: f32::NAN, ..Default::default() }, 0.1);
        assert!((sim.ship().pos.x - (start.x + 30.0)).abs() < 1e-3);
        assert_eq!(sim.ship().pos.y, start.y);
    }

    #[test]
    fn test_audio_receives_events_and_music() {
        let mut sim = Simulation::new(SimConfig::default(), 1, AudioLog::default()).unwrap();
        sim.step(&TickInput { x: 1.0, shoot: true, ..Default::default() }, DT);
        assert_eq!(sim.audio().effects, vec![SoundEffect::Shoot]);
        assert!(sim.audio().music_playing);

        // Only the first movement starts music
        sim.step(&TickInput { toggle_music: true, ..Default::default() }, DT);
        assert!(!sim.audio().music_playing);
        sim.step(&TickInput { x: -1.0, ..Default::default() }, DT);
        assert!(!sim.audio().music_playing);
        assert_eq!(sim.audio().music_starts, 1);
    }

    #[test]
    fn test_reset_clears_field() {
        let mut sim = Simulation::with_seed(9);
        sim.spawn_meteorite(Vec2::new(0.0, 200.0), Vec2::ZERO, 30.0, 0.0);
        sim.step(&TickInput { x: 1.0, shoot: true, ..Default::default() }, 0.1);
        sim.state_mut().score = 50;
        sim.reset();
        assert_eq!(sim.active_bullet_count(), 0);
        assert_eq!(sim.active_meteorite_count(), 0);
        assert_eq!(sim.ship().pos, sim.config().ship.start);
        assert_eq!(sim.snapshot().score, 0);
        assert_eq!(sim.snapshot().lives, 3);
        assert!(sim.fire_ready());
        assert_eq!(sim.meteor_timer(), 0.0);
    }

    #[test]
    fn test_bounds_query_uses_config() {
        let rock = Entity::meteorite(EntityId(99), Vec2::new(100.0, 0.0), Vec2::ZERO, 30.0, 0.0);
        let sim = Simulation::with_seed(1);
        assert!(!sim.is_out_of_bounds(&rock));

        let config =
            SimConfig::from_json(r#"{ "playfield": { "bounds_half_width": 50.0 } }"#).unwrap();
        let narrow = Simulation::new(config, 1, SilentAudio).unwrap();
        assert!(narrow.is_out_of_bounds(&rock));
    }

    #[test]
    fn test_lowered_cap_blocks_next_spawn() {
        let mut sim = Simulation::with_seed(5);
        for x in [-100.0, 0.0, 100.0] {
            sim.spawn_meteorite(Vec2::new(x, 300.0), Vec2::ZERO, 20.0, 0.0);
        }
        sim.set_max_meteorites(3);
        assert_eq!(sim.config().meteorite.max_active, 3);
        // 6 x 0.25s elapses the 1.5s timer once
        for _ in 0..6 {
            sim.step(&TickInput::default(), 0.25);
        }
        assert_eq!(sim.active_meteorite_count(), 3);
        assert_eq!(sim.meteor_timer(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.ship.speed = 0.0;
        assert!(Simulation::new(config, 1, SilentAudio).is_err());
    }

    #[test]
    fn test_debug_info_counts() {
        let mut sim = Simulation::with_seed(1);
        sim.spawn_meteorite(Vec2::new(0.0, 0.0), Vec2::ZERO, 30.0, 0.0);
        assert_eq!(
            sim.debug_info(),
            "Collision Debug: 0 bullets, 1 meteorites, 0 bullet-meteorite hits, 0 ship-meteorite hits"
        );
    }
}

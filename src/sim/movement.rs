//! Per-step movement integration
//!
//! Explicit first-order integration (`pos += vel * dt`), no acceleration.
//! Each kind has its own boundary policy: bullets age out or leave through
//! the ceiling, meteorites despawn past a margin, the ship is clamped.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use crate::settings::SimConfig;

/// Advance one entity by `dt` seconds.
///
/// `steer` is the normalized movement input and only matters for the ship.
/// Inactive entities are left untouched.
pub fn integrate(entity: &mut Entity, dt: f32, steer: Vec2, config: &SimConfig) {
    if !entity.active {
        return;
    }
    debug_assert!(dt >= 0.0, "dt must be sanitized before integration");

    match &mut entity.kind {
        EntityKind::Ship { speed, padding } => {
            let vel = steer * *speed;
            let (pad, field) = (*padding, &config.playfield);
            entity.vel = vel;
            entity.pos += vel * dt;
            entity.pos.x = entity
                .pos
                .x
                .clamp(-field.half_width + pad, field.half_width - pad);
            entity.pos.y = entity
                .pos
                .y
                .clamp(-field.half_height + pad, field.half_height - pad);
        }
        EntityKind::Bullet { age, lifetime } => {
            *age += dt;
            let expired = *age >= *lifetime;
            entity.pos += entity.vel * dt;
            if expired || entity.pos.y > config.bullet.ceiling {
                entity.active = false;
            }
        }
        EntityKind::Meteorite { spin, rotation } => {
            *rotation += *spin * dt;
            entity.pos += entity.vel * dt;
            let m = &config.meteorite;
            if entity.pos.y < m.floor || entity.pos.x.abs() > m.side_limit {
                entity.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn test_bullet_ages_and_moves() {
        let cfg = config();
        let mut bullet = Entity::bullet(EntityId(1), Vec2::new(10.0, 0.0), &cfg.bullet);
        integrate(&mut bullet, 0.1, Vec2::ZERO, &cfg);
        assert!(bullet.active);
        assert!((bullet.pos.y - 70.0).abs() < 1e-4);
        assert_eq!(bullet.pos.x, 10.0);
        match bullet.kind {
            EntityKind::Bullet { age, .. } => assert!((age - 0.1).abs() < 1e-6),
            _ => panic!("expected bullet"),
        }
    }

    #[test]
    fn test_bullet_expires_on_lifetime() {
        let cfg = config();
        let mut bullet = Entity::bullet(EntityId(1), Vec2::new(0.0, -900.0), &cfg.bullet);
        if let EntityKind::Bullet { age, .. } = &mut bullet.kind {
            *age = 1.9;
        }
        integrate(&mut bullet, 0.05, Vec2::ZERO, &cfg);
        assert!(bullet.active);
        integrate(&mut bullet, 0.1, Vec2::ZERO, &cfg);
        assert!(!bullet.active);
    }

    #[test]
    fn test_bullet_leaves_through_ceiling() {
        let cfg = config();
        let mut bullet = Entity::bullet(EntityId(1), Vec2::new(0.0, 410.0), &cfg.bullet);
        // Starts at y=430, one 0.05s step moves it 25 units up
        integrate(&mut bullet, 0.05, Vec2::ZERO, &cfg);
        assert!(!bullet.active);
        assert!(bullet.pos.y > 440.0);
    }

    #[test]
    fn test_inactive_entity_does_not_move() {
        let cfg = config();
        let mut bullet = Entity::bullet(EntityId(1), Vec2::ZERO, &cfg.bullet);
        bullet.deactivate();
        let before = bullet.clone();
        integrate(&mut bullet, 0.2, Vec2::ZERO, &cfg);
        assert_eq!(bullet, before);
    }

    #[test]
    fn test_meteorite_spins_and_falls() {
        let cfg = config();
        let mut rock = Entity::meteorite(
            EntityId(2),
            Vec2::new(0.0, 380.0),
            Vec2::new(10.0, -100.0),
            30.0,
            0.5,
        );
        integrate(&mut rock, 0.2, Vec2::ZERO, &cfg);
        assert!(rock.active);
        assert!((rock.pos - Vec2::new(2.0, 360.0)).length() < 1e-4);
        assert!((rock.rotation().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_meteorite_despawn_margins() {
        let cfg = config();
        // 280 is past the 250 bounds query but inside the 300 despawn margin
        let mut rock = Entity::meteorite(EntityId(3), Vec2::new(280.0, 0.0), Vec2::ZERO, 30.0, 0.0);
        integrate(&mut rock, 0.1, Vec2::ZERO, &cfg);
        assert!(rock.active);

        rock.pos.x = -301.0;
        integrate(&mut rock, 0.0, Vec2::ZERO, &cfg);
        assert!(!rock.active);

        let mut low = Entity::meteorite(EntityId(4), Vec2::new(0.0, -430.0), Vec2::new(0.0, -200.0), 30.0, 0.0);
        integrate(&mut low, 0.1, Vec2::ZERO, &cfg);
        assert!(!low.active);
    }

    #[test]
    fn test_max_speed_meteorite_gone_within_4_1_seconds() {
        let cfg = config();
        let mut rock = Entity::meteorite(EntityId(5), Vec2::new(0.0, 380.0), Vec2::new(0.0, -200.0), 50.0, 1.0);
        let dt = 0.01;
        let mut elapsed = 0.0;
        while rock.active && elapsed < 10.0 {
            integrate(&mut rock, dt, Vec2::ZERO, &cfg);
            elapsed += dt;
        }
        assert!(!rock.active);
        assert!(elapsed <= 4.1 + 2.0 * dt, "took {elapsed}s");
        assert!(elapsed > 4.0);
    }

    #[test]
    fn test_ship_moves_and_clamps() {
        let cfg = config();
        let mut ship = Entity::ship(EntityId(0), &cfg.ship);
        integrate(&mut ship, 0.1, Vec2::new(1.0, 0.0), &cfg);
        assert!((ship.pos - Vec2::new(30.0, -250.0)).length() < 1e-4);
        assert_eq!(ship.vel, Vec2::new(300.0, 0.0));

        // Slam into the bottom-left corner
        integrate(&mut ship, 5.0, Vec2::new(-1.0, -1.0), &cfg);
        assert_eq!(ship.pos, Vec2::new(-180.0, -310.0));
        assert!(ship.active);

        integrate(&mut ship, 5.0, Vec2::new(1.0, 1.0), &cfg);
        assert_eq!(ship.pos, Vec2::new(180.0, 310.0));
    }

    #[test]
    fn test_ship_zero_dt_keeps_position() {
        let cfg = config();
        let mut ship = Entity::ship(EntityId(0), &cfg.ship);
        integrate(&mut ship, 0.0, Vec2::new(1.0, 1.0), &cfg);
        assert_eq!(ship.pos, cfg.ship.start);
    }
}

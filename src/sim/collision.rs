//! Collision detection
//!
//! Brute-force pairwise AABB checks. The population is tiny (at most a
//! handful of rocks and a fire-rate-bounded stream of bullets), so there is no
//! broad phase. Detection only reads entity state; consequences are applied
//! by `resolve`.

use serde::{Deserialize, Serialize};

use super::arena::EntityArena;
use super::entity::Entity;

/// A bullet overlapping a meteorite (slot indices, valid for this tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletHit {
    pub bullet: usize,
    pub meteorite: usize,
}

/// A meteorite overlapping the ship (slot index, valid for this tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipHit {
    pub meteorite: usize,
}

/// All overlaps found in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collisions {
    pub bullet_meteorite: Vec<BulletHit>,
    pub ship_meteorite: Vec<ShipHit>,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.bullet_meteorite.is_empty() && self.ship_meteorite.is_empty()
    }
}

/// Find every bullet-meteorite and ship-meteorite overlap among active entities
pub fn detect_collisions(bullets: &EntityArena, meteorites: &EntityArena, ship: &Entity) -> Collisions {
    let mut result = Collisions::default();

    for (bullet_slot, bullet) in bullets.iter_active() {
        let bullet_box = bullet.bounds();
        for (rock_slot, rock) in meteorites.iter_active() {
            if bullet_box.intersects(&rock.bounds()) {
                result.bullet_meteorite.push(BulletHit {
                    bullet: bullet_slot,
                    meteorite: rock_slot,
                });
            }
        }
    }

    if ship.active {
        let ship_box = ship.bounds();
        for (rock_slot, rock) in meteorites.iter_active() {
            if ship_box.intersects(&rock.bounds()) {
                result.ship_meteorite.push(ShipHit { meteorite: rock_slot });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::entity::EntityId;
    use glam::Vec2;

    fn rock(id: u32, pos: Vec2, size: f32) -> Entity {
        Entity::meteorite(EntityId(id), pos, Vec2::ZERO, size, 0.0)
    }

    fn bullet_at(id: u32, pos: Vec2) -> Entity {
        let cfg = SimConfig::default();
        let mut bullet = Entity::bullet(EntityId(id), Vec2::ZERO, &cfg.bullet);
        bullet.pos = pos;
        bullet
    }

    fn ship() -> Entity {
        Entity::ship(EntityId(0), &SimConfig::default().ship)
    }

    #[test]
    fn test_bullet_inside_meteorite() {
        let mut bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        bullets.insert(bullet_at(1, Vec2::new(0.0, 100.0)));
        rocks.insert(rock(2, Vec2::new(0.0, 100.0), 30.0));

        let hits = detect_collisions(&bullets, &rocks, &ship());
        assert_eq!(hits.bullet_meteorite, vec![BulletHit { bullet: 0, meteorite: 0 }]);
        assert!(hits.ship_meteorite.is_empty());
        // Detection never touches activity
        assert!(bullets.get(0).unwrap().active && rocks.get(0).unwrap().active);
    }

    #[test]
    fn test_edge_contact_counts() {
        let mut bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        // Bullet right edge at x=2, rock left edge at x=2
        bullets.insert(bullet_at(1, Vec2::new(0.0, 0.0)));
        rocks.insert(rock(2, Vec2::new(12.0, 0.0), 20.0));
        let hits = detect_collisions(&bullets, &rocks, &ship());
        assert_eq!(hits.bullet_meteorite.len(), 1);
    }

    #[test]
    fn test_inactive_entities_are_skipped() {
        let mut bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        bullets.insert(bullet_at(1, Vec2::new(0.0, 100.0)));
        rocks.insert(rock(2, Vec2::new(0.0, 100.0), 30.0));
        rocks.insert(rock(3, Vec2::new(0.0, -250.0), 30.0));
        rocks.get_mut(0).unwrap().deactivate();
        rocks.get_mut(1).unwrap().deactivate();
        assert!(detect_collisions(&bullets, &rocks, &ship()).is_empty());
    }

    #[test]
    fn test_ship_meteorite_overlap() {
        let bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        rocks.insert(rock(2, Vec2::new(100.0, 100.0), 30.0));
        rocks.insert(rock(3, Vec2::new(25.0, -230.0), 20.0));
        let hits = detect_collisions(&bullets, &rocks, &ship());
        assert_eq!(hits.ship_meteorite, vec![ShipHit { meteorite: 1 }]);
    }

    #[test]
    fn test_inactive_ship_is_ignored() {
        let bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        rocks.insert(rock(2, Vec2::new(0.0, -250.0), 30.0));
        let mut ship = ship();
        ship.deactivate();
        assert!(detect_collisions(&bullets, &rocks, &ship).is_empty());
    }

    #[test]
    fn test_every_overlapping_pair_reported() {
        let mut bullets = EntityArena::default();
        let mut rocks = EntityArena::default();
        bullets.insert(bullet_at(1, Vec2::new(0.0, 0.0)));
        bullets.insert(bullet_at(2, Vec2::new(5.0, 0.0)));
        rocks.insert(rock(3, Vec2::new(0.0, 0.0), 40.0));
        rocks.insert(rock(4, Vec2::new(10.0, 0.0), 40.0));
        let hits = detect_collisions(&bullets, &rocks, &ship());
        assert_eq!(hits.bullet_meteorite.len(), 4);
    }
}

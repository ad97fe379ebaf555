//! Collision resolution
//!
//! Applies gameplay consequences to the pairs found by `detect_collisions`.
//! Bullet hits are processed first, then ship hits. A pair whose entities were
//! already deactivated earlier in the tick is skipped, so one bullet kills at
//! most one rock and a rock shot this tick cannot also hit the ship.

use super::arena::EntityArena;
use super::collision::Collisions;
use super::state::{GameEvent, GameState};
use crate::settings::ScoringConfig;

/// Apply collision outcomes and return the resulting events in order
pub fn resolve_collisions(
    collisions: &Collisions,
    bullets: &mut EntityArena,
    meteorites: &mut EntityArena,
    state: &mut GameState,
    scoring: &ScoringConfig,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for hit in &collisions.bullet_meteorite {
        let (Some(bullet), Some(rock)) = (bullets.get_mut(hit.bullet), meteorites.get_mut(hit.meteorite))
        else {
            continue;
        };
        if !(bullet.active && rock.active) {
            continue;
        }
        bullet.deactivate();
        rock.deactivate();
        state.award_kill(scoring.kill_reward);
        log::debug!("Bullet {} destroyed meteorite {} (score {})", bullet.id, rock.id, state.score);
        events.push(GameEvent::Kill {
            bullet: bullet.id,
            meteorite: rock.id,
        });
    }

    for hit in &collisions.ship_meteorite {
        let Some(rock) = meteorites.get_mut(hit.meteorite) else {
            continue;
        };
        if !rock.active {
            continue;
        }
        rock.deactivate();
        state.take_hit(scoring.hit_penalty);
        log::debug!(
            "Ship hit by meteorite {} (lives {}, score {})",
            rock.id,
            state.lives,
            state.score
        );
        events.push(GameEvent::Hit { meteorite: rock.id });
    }

    events
}

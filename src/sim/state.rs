//! Game state and phase machine
//!
//! Score, lives and the Playing/Paused/GameOver phase. Everything the UI
//! needs to draw the HUD comes from here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Frozen; only the pause toggle is honored
    Paused,
    /// Run ended; only a full reset leaves this phase
    GameOver,
}

/// Something that happened during a tick (for audio and effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bullet left the ship
    Shoot { bullet: EntityId },
    /// A bullet destroyed a meteorite
    Kill { bullet: EntityId, meteorite: EntityId },
    /// A meteorite struck the ship
    Hit { meteorite: EntityId },
}

/// Score, lives and phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: i32,
    pub phase: GamePhase,
    starting_lives: i32,
}

impl GameState {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            phase: GamePhase::Playing,
            starting_lives,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Flip Playing <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => {
                log::info!("Game paused");
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Game resumed");
                GamePhase::Playing
            }
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    pub fn award_kill(&mut self, reward: u64) {
        self.score = self.score.saturating_add(reward);
    }

    /// Lose a life and some score (floored at zero). Returns true if this hit
    /// ended the run.
    pub fn take_hit(&mut self, penalty: u64) -> bool {
        self.lives -= 1;
        self.score = self.score.saturating_sub(penalty);
        if self.lives <= 0 && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!("GAME OVER! Final score: {}", self.score);
            return true;
        }
        false
    }

    /// Back to a fresh run
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.phase = GamePhase::Playing;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            score: self.score,
            lives: self.lives,
            is_paused: self.is_paused(),
            is_game_over: self.is_game_over(),
        }
    }
}

/// HUD view of the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub score: u64,
    pub lives: i32,
    pub is_paused: bool,
    pub is_game_over: bool,
}

impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_game_over {
            "GAME OVER"
        } else if self.is_paused {
            "PAUSED"
        } else {
            "PLAYING"
        };
        write!(f, "Score: {} | Lives: {} | {}", self.score, self.lives, status)
    }
}

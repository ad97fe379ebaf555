//! Audio hand-off
//!
//! The simulation never synthesizes sound. It maps gameplay events to sound
//! effects and forwards them to whatever `AudioSink` the host injected.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Meteorite destroyed
    Explosion,
    /// Ship struck
    Hit,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Shoot { .. } => SoundEffect::Shoot,
            GameEvent::Kill { .. } => SoundEffect::Explosion,
            GameEvent::Hit { .. } => SoundEffect::Hit,
        }
    }
}

/// Host audio backend
pub trait AudioSink {
    /// Play a one-shot effect
    fn play(&mut self, effect: SoundEffect);

    /// Start background music (called once, on the player's first move)
    fn start_music(&mut self) {}

    /// Flip background music on/off
    fn toggle_music(&mut self) {}
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect);
    }

    fn start_music(&mut self) {
        (**self).start_music();
    }

    fn toggle_music(&mut self) {
        (**self).toggle_music();
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {effect:?}");
    }
}

/// Records what would have been played
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioLog {
    pub effects: Vec<SoundEffect>,
    pub music_playing: bool,
    pub music_starts: u32,
    /// Drop effects instead of recording them
    pub muted: bool,
}

impl AudioLog {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.effects.iter().filter(|e| **e == effect).count()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl AudioSink for AudioLog {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            self.effects.push(effect);
        }
    }

    fn start_music(&mut self) {
        if !self.music_playing {
            self.music_playing = true;
            self.music_starts += 1;
            log::info!("Background music started");
        }
    }

    fn toggle_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            log::info!("Background music stopped");
        } else {
            self.start_music();
        }
    }
}

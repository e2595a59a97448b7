//! Audio routing
//!
//! The simulation never plays sounds itself; it queues [`GameEvent`]s and the
//! host hands them to an [`AudioManager`], which picks a [`SoundEffect`] and
//! forwards it to whatever [`SoundSink`] the platform provides.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake ate food
    Eat,
    /// Snake hit a wall, obstacle or itself
    Collision,
    /// Round over
    GameOver,
    /// Final score made the leaderboard
    HighScore,
    /// A new obstacle appeared
    ObstacleSpawn,
    /// Boost engaged
    Boost,
    /// Menu cursor moved
    MenuMove,
    /// Menu entry activated
    MenuSelect,
}

/// A simple synth description, for sinks that generate sounds procedurally
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency (Hz)
    pub freq: f32,
    /// End frequency (Hz), swept linearly
    pub end_freq: f32,
    /// Seconds
    pub duration: f32,
    /// Relative loudness (0.0 - 1.0)
    pub gain: f32,
}

impl SoundEffect {
    pub fn tone(&self) -> Tone {
        match self {
            // Short rising chirp
            SoundEffect::Eat => Tone { freq: 600.0, end_freq: 900.0, duration: 0.08, gain: 0.5 },
            // Low thud
            SoundEffect::Collision => Tone { freq: 150.0, end_freq: 60.0, duration: 0.15, gain: 0.7 },
            // Slow descending tone
            SoundEffect::GameOver => Tone { freq: 440.0, end_freq: 110.0, duration: 0.8, gain: 0.6 },
            SoundEffect::HighScore => Tone { freq: 523.0, end_freq: 1047.0, duration: 0.5, gain: 0.6 },
            SoundEffect::ObstacleSpawn => Tone { freq: 220.0, end_freq: 330.0, duration: 0.12, gain: 0.4 },
            SoundEffect::Boost => Tone { freq: 300.0, end_freq: 600.0, duration: 0.1, gain: 0.3 },
            SoundEffect::MenuMove => Tone { freq: 400.0, end_freq: 400.0, duration: 0.04, gain: 0.25 },
            SoundEffect::MenuSelect => Tone { freq: 500.0, end_freq: 700.0, duration: 0.07, gain: 0.35 },
        }
    }

    /// The effect a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::Collision(_) => Some(SoundEffect::Collision),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::HighScoreQualified { .. } => Some(SoundEffect::HighScore),
            GameEvent::ObstacleAdded => Some(SoundEffect::ObstacleSpawn),
            GameEvent::BoostStarted => Some(SoundEffect::Boost),
            GameEvent::MenuMoved => Some(SoundEffect::MenuMove),
            GameEvent::MenuConfirmed => Some(SoundEffect::MenuSelect),
            _ => None,
        }
    }
}

/// Platform audio backend
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sound {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn SoundSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    /// A missing sink leaves the manager silent
    pub fn new(sink: Option<Box<dyn SoundSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Pick up volume and mute state from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(!settings.sound_enabled);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else { return };
        sink.play(effect, vol * effect.tone().gain);
    }

    /// Play whatever the events call for, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

//! Game settings and preferences
//!
//! Persisted separately from high scores as a small JSON file.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wall behaviour for new rounds
    pub game_mode: GameMode,

    // === Audio ===
    /// Sound effects on/off (Options menu toggle)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_mode: GameMode::Classic,
            sound_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Effective volume after the mute toggle
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Failed to read settings {}: {}", path.display(), e);
                }
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume_respects_mute() {
        let mut s = Settings::default();
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
        s.sound_enabled = false;
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "game_mode": "PortalWalls" }"#).unwrap();
        assert_eq!(s.game_mode, GameMode::PortalWalls);
        assert!(s.sound_enabled);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("vorax-settings-{}.json", std::process::id()));
        let s = Settings {
            game_mode: GameMode::PortalWalls,
            sound_enabled: false,
            ..Default::default()
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path), s);
        let _ = std::fs::remove_file(&path);
    }
}

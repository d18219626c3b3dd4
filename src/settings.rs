//! Host settings and preferences
//!
//! Read from a JSON file handed to the binary; missing or broken files fall
//! back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::MAX_BACKLOG_MS;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on hurt/death/boss landing
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,

    // === Audio ===
    pub muted: bool,
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Simulation ===
    /// Clamp on accumulated frame time before ticks are dropped
    pub max_backlog_ms: f64,
    /// Seed for cosmetic randomness; 0 picks one from the clock
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,

            muted: false,
            music_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,

            reduced_motion: false,

            max_backlog_ms: MAX_BACKLOG_MS,
            seed: 0,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Volume for sound effects, 0 when muted
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Whether music cues should reach the host at all
    pub fn effective_music(&self) -> bool {
        self.music_enabled && !self.muted && self.master_volume * self.music_volume > 0.0
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, using defaults if the file is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut s = Settings::default();
        assert!(s.effective_screen_shake());
        s.reduced_motion = true;
        assert!(!s.effective_screen_shake());
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut s = Settings::default();
        assert!((s.effective_sfx_volume() - 0.8).abs() < 1e-6);
        assert!(s.effective_music());
        s.muted = true;
        assert_eq!(s.effective_sfx_volume(), 0.0);
        assert!(!s.effective_music());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"muted": true, "seed": 9}"#).unwrap();
        assert!(s.muted);
        assert_eq!(s.seed, 9);
        assert_eq!(s.max_backlog_ms, MAX_BACKLOG_MS);
        assert!(s.screen_shake);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{\"muted\": 3}"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("pixel-quest-no-such-settings.json");
        assert!(matches!(Settings::try_load_from(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pixel-quest-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"music_enabled": false, "sfx_volume": 0.25}"#).unwrap();
        let s = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert!(!s.music_enabled);
        assert_eq!(s.sfx_volume, 0.25);
        assert!(s.screen_shake);
    }
}

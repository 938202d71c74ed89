//! Game settings and preferences
//!
//! Persisted as JSON in the working directory. This covers preferences
//! only; game state is never saved.

use std::fs;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Show FPS counter in the HUD (requires the font asset)
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Settings file name, resolved against the working directory
    pub const FILE_NAME: &'static str = "dodgefall_settings.json";

    /// Load settings, falling back to defaults on a missing or corrupt file
    pub fn load() -> Self {
        match fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(e) => {
                    log::warn!("Corrupt {} ({e}); using defaults", Self::FILE_NAME);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(Self::FILE_NAME, json) {
                    log::warn!("Could not write {} ({e})", Self::FILE_NAME);
                }
            }
            Err(e) => log::warn!("Could not serialize settings ({e})"),
        }
    }

    /// Volume applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.25,
            show_fps: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Settings = serde_json::from_str("{\"show_fps\": true}").unwrap();
        assert!(parsed.show_fps);
        assert_eq!(parsed.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        assert!(serde_json::from_str::<Settings>("not json").is_err());
    }

    #[test]
    fn test_effective_volume_clamped() {
        let mut settings = Settings::default();
        settings.master_volume = 2.0;
        settings.sfx_volume = 2.0;
        assert_eq!(settings.effective_sfx_volume(), 1.0);
    }
}

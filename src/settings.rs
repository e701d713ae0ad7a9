//! Game settings and preferences
//!
//! Persisted separately from tuning as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume, applied on top of the per-effect channels (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Gunfire volume, both sides (0.0 - 1.0)
    pub bullet_volume: f32,
    /// Explosion volume (0.0 - 1.0)
    pub explosion_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Health bars above ships
    pub show_health_bars: bool,

    // === Accessibility ===
    /// Reduced motion (no invincibility flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            bullet_volume: 0.2,
            explosion_volume: 0.2,
            muted: false,

            show_health_bars: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Volume after master scaling and mute; inputs are clamped to 0..=1
    pub fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * channel.clamp(0.0, 1.0)
        }
    }

    /// Volume for a sound effect channel (gunfire, explosions)
    pub fn effective_sfx_volume(&self, channel: f32) -> f32 {
        self.effective_volume(channel) * self.sfx_volume.clamp(0.0, 1.0)
    }

    /// Effective flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

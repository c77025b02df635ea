//! Player settings and preferences
//!
//! Persisted separately from the leaderboard through the same storage.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAYER_NAME_LEN;
use crate::platform::storage::{self, Storage, StorageError};

/// Name used when the player leaves the field empty
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded on the leaderboard
    pub player_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background video soundtrack volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no idle hover, no score pulse)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            master_volume: 0.8,
            music_volume: 0.7,
            mute_on_blur: true,
            reduced_motion: false,
            show_fps: false,
        }
    }
}

/// Trim and cap a typed name; empty becomes the default name
pub fn sanitize_player_name(raw: &str) -> String {
    let name: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_PLAYER_NAME_LEN)
        .collect();
    let name = name.trim_end().to_string();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name
    }
}

impl Settings {
    /// Set the leaderboard name (sanitized)
    pub fn set_player_name(&mut self, raw: &str) {
        self.player_name = sanitize_player_name(raw);
    }

    /// Whether the idle hover and score pulse should animate
    pub fn motion_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective soundtrack volume (master applied, clamped)
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_fish_settings";

    /// Load settings, falling back to defaults on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match storage::load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut settings)) => {
                settings.player_name = sanitize_player_name(&settings.player_name);
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage::save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::cosmetics::{self, Cosmetic};
use crate::error::StorageError;
use crate::platform::KeyValueStore;
use crate::platform::storage::{load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no hit flash)
    pub reduced_motion: bool,

    /// Cosmetic the otter wears
    pub cosmetic: Option<Cosmetic>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            show_fps: false,

            reduced_motion: false,

            cosmetic: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "otterRiverSettings";

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings = match load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);

        // A hand-edited settings blob can't grant a cosmetic
        if let Some(cosmetic) = settings.cosmetic {
            if !cosmetics::is_unlocked(store, cosmetic) {
                log::warn!("{} is not unlocked, removing it", cosmetic.display_name());
                settings.cosmetic = None;
            }
        }
        settings
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Volume to play effects at
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        !self.reduced_motion
    }

    /// Wear the best unlocked cosmetic if none is selected yet
    pub fn adopt_unlocks(&mut self, fresh: &[Cosmetic]) -> bool {
        if self.cosmetic.is_some() {
            return false;
        }
        match fresh.last() {
            Some(best) => {
                self.cosmetic = Some(*best);
                true
            }
            None => false,
        }
    }
}

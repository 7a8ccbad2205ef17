//! Player preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Start muted; the player opts in with the mute button
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Visuals ===
    /// Faint background grid
    pub show_grid: bool,

    /// Name typed at the last round start, used to pre-fill the name field
    pub last_player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            show_grid: true,
            last_player_name: String::new(),
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "kitepilot_settings";

    /// Volume actually applied to sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged, not returned
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StorageError};

    #[test]
    fn test_defaults_start_muted() {
        let settings = Settings::default();
        assert!(settings.muted);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_mute());
        settings.set_master_volume(0.5);
        settings.set_sfx_volume(2.0);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.effective_volume(), 0.5);
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.muted = false;
        settings.last_player_name = "kite#0001".into();
        settings.save(&mut store);

        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_bad_data_falls_back() {
        let mut store = MemoryStore::new();
        store.set("kitepilot_settings", "[1, 2").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());

        // Missing fields take defaults
        store.set("kitepilot_settings", r#"{"muted": false}"#).unwrap();
        let loaded = Settings::load(&store);
        assert!(!loaded.muted);
        assert_eq!(loaded.master_volume, 0.8);

        store.fail_with(Some(StorageError::Unavailable));
        assert_eq!(Settings::load(&store), Settings::default());
        settings_save_does_not_panic(&mut store);
    }

    fn settings_save_does_not_panic(store: &mut MemoryStore) {
        Settings::default().save(store);
    }
}

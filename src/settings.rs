//! Game settings and preferences
//!
//! Persisted separately from run statistics under their own storage key.

use serde::{Deserialize, Serialize};

use crate::config::{LevelConfig, LevelPreset};
use crate::platform::KeyValueStorage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level size preset; `None` picks one from the viewport
    pub preset: Option<LevelPreset>,
    /// Full generator override, takes precedence over `preset`
    pub level: Option<LevelConfig>,
    /// Always play this seed (shareable levels)
    pub seed: Option<u64>,

    // === Resize ===
    /// Rebuild the level when the viewport changes a lot
    pub regenerate_on_resize: bool,
    /// Relative change in either dimension that counts as "a lot"
    pub resize_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: None,
            level: None,
            seed: None,

            regenerate_on_resize: true,
            resize_threshold: 0.2,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "lion_splash_settings";

    /// Generator parameters for a viewport of the given size
    pub fn level_config(&self, width: f32, height: f32) -> LevelConfig {
        if let Some(config) = &self.level {
            return config.clone();
        }
        self.preset
            .unwrap_or_else(|| LevelPreset::for_viewport(width, height))
            .config()
    }

    /// True if going from `old` to `new` should rebuild the level
    pub fn resize_needs_regeneration(&self, old: (f32, f32), new: (f32, f32)) -> bool {
        if !self.regenerate_on_resize {
            return false;
        }
        let changed = |a: f32, b: f32| (b - a).abs() > a.abs() * self.resize_threshold;
        changed(old.0, new.0) || changed(old.1, new.1)
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut dyn KeyValueStorage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {}", e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

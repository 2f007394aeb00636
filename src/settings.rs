//! Context settings
//!
//! Capacity bounds for the per-context object registries. Settings are
//! serializable so hosts can persist them alongside the rest of their
//! engine configuration; JSON helpers are provided for standalone use.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_max_effect_slots() -> usize {
    64
}

fn default_max_filters() -> usize {
    256
}

/// Per-context registry capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Upper bound on simultaneously live auxiliary effect slots
    #[serde(default = "default_max_effect_slots")]
    pub max_effect_slots: usize,

    /// Upper bound on simultaneously live filters
    #[serde(default = "default_max_filters")]
    pub max_filters: usize,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            max_effect_slots: default_max_effect_slots(),
            max_filters: default_max_filters(),
        }
    }
}

impl ContextSettings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Errors from settings persistence
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Format(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ContextSettings::default();
        assert_eq!(settings.max_effect_slots, 64);
        assert_eq!(settings.max_filters, 256);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: ContextSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ContextSettings::default());

        let settings: ContextSettings =
            serde_json::from_str(r#"{"max_effect_slots": 8}"#).unwrap();
        assert_eq!(settings.max_effect_slots, 8);
        assert_eq!(settings.max_filters, 256);
    }

    #[test]
    fn test_file_round_trip() {
        let settings = ContextSettings {
            max_effect_slots: 16,
            max_filters: 32,
        };
        let path = std::env::temp_dir().join("immersive-audio-settings-test.json");
        settings.save(&path).unwrap();
        let loaded = ContextSettings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}

//! Run settings
//!
//! Loaded from a JSON file; anything missing falls back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{END_GRACE_SECS, MAX_FRAME_SECS};

/// Settings for a run through the levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin wobble phases; attempt `n` uses `seed + n`
    pub seed: u64,
    /// Longest elapsed time fed into a single step (seconds)
    pub max_frame_secs: f64,
    /// How long a won or lost level stays up before moving on (seconds)
    pub end_grace_secs: f64,
    /// Frames the headless driver runs before giving up
    pub frame_budget: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            max_frame_secs: MAX_FRAME_SECS,
            end_grace_secs: END_GRACE_SECS,
            // Ten minutes at 60 Hz
            frame_budget: 60 * 60 * 10,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}, using default settings", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_frame_secs, 0.1);
        assert_eq!(settings.end_grace_secs, 1.0);
        assert_eq!(settings.seed, 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"seed": 99}"#).unwrap();
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.end_grace_secs, END_GRACE_SECS);
        assert_eq!(settings.frame_budget, Settings::default().frame_budget);
    }

    #[test]
    fn test_load_missing_file() {
        let settings = Settings::load("/nonexistent/tile-platformer/settings.json");
        assert_eq!(settings, Settings::default());
    }
}

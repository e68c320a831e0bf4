//! Game settings
//!
//! Loaded from a JSON file next to the binary; missing fields take defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlayArea;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Animate fruit (velocity + wall bounces). Toggleable at runtime.
    pub motion_enabled: bool,
    /// Live fruit per session
    pub population: usize,
    /// Session length in seconds
    pub session_secs: u32,

    // === Play area (logical units) ===
    pub play_width: f32,
    pub full_height: f32,
    pub spawn_margin: f32,
    /// Velocity component range [-max_speed, max_speed]
    pub max_speed: f32,

    /// Harvest popup lifetime
    pub feedback_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            motion_enabled: false,
            population: DEFAULT_POPULATION,
            session_secs: SESSION_SECS,
            play_width: PLAY_WIDTH,
            full_height: FULL_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            max_speed: MAX_SPEED,
            feedback_ms: FEEDBACK_MS,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "orchard-rush.json";

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validate())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would break the simulation
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        self.population = self.population.max(1);
        self.session_secs = self.session_secs.max(1);
        if !(self.play_width.is_finite() && self.play_width > 0.0) {
            self.play_width = defaults.play_width;
        }
        if !(self.full_height.is_finite() && self.full_height > 0.0) {
            self.full_height = defaults.full_height;
        }
        let max_margin = self.play_width.min(self.full_height) / 2.0;
        if !(self.spawn_margin.is_finite() && self.spawn_margin >= 0.0)
            || self.spawn_margin >= max_margin
        {
            self.spawn_margin = defaults.spawn_margin.min(max_margin / 2.0);
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            self.max_speed = defaults.max_speed;
        }
        self
    }

    pub fn play_area(&self) -> PlayArea {
        PlayArea::new(self.play_width, self.full_height, self.spawn_margin)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let s = Settings::from_json(r#"{ "motion_enabled": true, "population": 4 }"#).unwrap();
        assert!(s.motion_enabled);
        assert_eq!(s.population, 4);
        assert_eq!(s.session_secs, SESSION_SECS);
        assert_eq!(s.play_width, PLAY_WIDTH);
    }

    #[test]
    fn validate_clamps_nonsense() {
        let s = Settings::from_json(
            r#"{ "population": 0, "session_secs": 0, "play_width": -3.0, "spawn_margin": 500.0, "max_speed": -1.0 }"#,
        )
        .unwrap();
        assert_eq!(s.population, 1);
        assert_eq!(s.session_secs, 1);
        assert_eq!(s.play_width, PLAY_WIDTH);
        assert!(s.spawn_margin * 2.0 < s.play_width.min(s.full_height));
        assert_eq!(s.max_speed, MAX_SPEED);
        // Validated settings always build a play area
        let _ = s.play_area();
    }

    #[test]
    fn json_round_trip() {
        let s = Settings {
            motion_enabled: true,
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(Settings::from_json("{ population: ").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let s = Settings::load("/nonexistent/orchard-rush.json");
        assert_eq!(s, Settings::default());
    }
}

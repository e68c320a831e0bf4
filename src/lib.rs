//! Orchard Rush - A timed fruit-harvest arcade game
//!
//! Core modules:
//! - `sim`: Session state machine and fruit simulation (motion, gestures, scoring)
//! - `settings`: Configuration surface (motion toggle, population, play area)
//! - `records`: Process-lifetime best score
//! - `autoplay`: Scripted player for demos and tests

pub mod autoplay;
pub mod records;
pub mod settings;
pub mod sim;

pub use records::BestScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Live fruit count per session
    pub const DEFAULT_POPULATION: usize = 10;
    /// Session length in seconds
    pub const SESSION_SECS: u32 = 180;
    /// Countdown tick interval (one second of wall-clock time)
    pub const COUNTDOWN_MS: u64 = 1000;

    /// Logical play area. The drop zone sits to the right of `PLAY_WIDTH`
    /// and does not take part in x-axis reflection.
    pub const PLAY_WIDTH: f32 = 80.0;
    pub const FULL_HEIGHT: f32 = 100.0;
    /// Spawn margin from the play region edges (half the largest fruit footprint)
    pub const SPAWN_MARGIN: f32 = 5.0;

    /// Velocity components are drawn from [-MAX_SPEED, MAX_SPEED] units/second
    pub const MAX_SPEED: f32 = 15.0;
    /// Largest motion step applied in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// How long a harvest notification stays visible
    pub const FEEDBACK_MS: u64 = 1000;
}

/// Axis-aligned rectangle, inclusive on all edges
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from a top-left corner and a size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

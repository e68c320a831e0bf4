//! Read-only view of a session for the renderer
//!
//! The renderer polls [`Session::revision`](super::Session::revision) and pulls a
//! fresh snapshot whenever it changes.

use serde::{Deserialize, Serialize};

use super::feedback::HarvestEvent;
use super::fruit::{Fruit, HarvestCounts};
use super::session::{HeldFruit, SessionState};
use crate::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub state: SessionState,
    pub score: u32,
    pub high_score: u32,
    pub time_remaining: u32,
    pub fruits: Vec<Fruit>,
    pub harvest_counts: HarvestCounts,
    pub held: Option<HeldFruit>,
    pub feedback: Vec<HarvestEvent>,
    pub motion_enabled: bool,
    pub drop_zone: Option<Rect>,
}

impl SessionSnapshot {
    /// Whether gestures are currently accepted
    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Fruit to draw at the pointer instead of its logical position
    pub fn held_fruit(&self) -> Option<&Fruit> {
        let held = self.held?;
        self.fruits.iter().find(|f| f.id == held.fruit_id)
    }

    /// Remaining time as "m:ss"
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

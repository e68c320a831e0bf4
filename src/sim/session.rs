//! Session Controller - the game run state machine
//!
//! ```text
//! Idle --start--> Playing <--toggle_pause--> Paused
//! Playing --countdown hits 0--> Ended --(best score reconciled)--> Idle
//! any --reset--> Idle
//! ```
//!
//! All mutation happens through the handlers below, one call at a time on the
//! logic thread. Clock callbacks carry a [`ClockHandle`] and are discarded once
//! the clock has been cancelled (pause, reset, end).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::PlayArea;
use super::clock::{ClockHandle, Countdown, SimClock, apply_motion};
use super::factory::FruitFactory;
use super::feedback::{FeedbackQueue, HarvestEvent};
use super::fruit::{Category, Fruit, Gesture, HarvestCounts};
use super::resolver::{ResolvedHarvest, resolve};
use super::snapshot::SessionSnapshot;
use crate::records::BestScore;
use crate::settings::Settings;
use crate::Rect;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No session running (initial, and after a session ends)
    Idle,
    /// Clock running, gestures accepted
    Playing,
    /// Clock stopped, counters frozen
    Paused,
    /// Countdown reached zero; passes straight through to Idle
    Ended,
}

/// Fruit currently being dragged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeldFruit {
    pub fruit_id: u32,
    /// Screen position where the drag began
    pub origin: Vec2,
    /// Latest pointer screen position
    pub pointer: Vec2,
}

/// Result of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub final_score: u32,
    pub harvest_counts: HarvestCounts,
    /// Final score beat the previous best
    pub new_best: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    score: u32,
    countdown: Countdown,
    harvest_counts: HarvestCounts,
    best: BestScore,
    /// Live population (exactly `population` entries while a session is active)
    fruits: Vec<Fruit>,
    held: Option<HeldFruit>,
    /// Screen-space drop target, supplied by the renderer
    drop_zone: Option<Rect>,
    motion_enabled: bool,
    feedback: FeedbackQueue,
    clock: SimClock,
    factory: FruitFactory,
    population: usize,
    session_secs: u32,
    last_outcome: Option<SessionOutcome>,
    /// Bumped on every observable change
    revision: u64,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let factory = FruitFactory::new(settings.play_area(), settings.max_speed);
        Self::with_factory(settings, factory)
    }

    /// Session with a caller-provided factory (fixed seeds in tests)
    pub fn with_factory(settings: &Settings, factory: FruitFactory) -> Self {
        assert!(settings.population > 0, "population must be positive");
        Self {
            state: SessionState::Idle,
            score: 0,
            countdown: Countdown::new(settings.session_secs),
            harvest_counts: HarvestCounts::default(),
            best: BestScore::new(),
            fruits: Vec::with_capacity(settings.population),
            held: None,
            drop_zone: None,
            motion_enabled: settings.motion_enabled,
            feedback: FeedbackQueue::new(settings.feedback_ms),
            clock: SimClock::new(),
            factory,
            population: settings.population,
            session_secs: settings.session_secs,
            last_outcome: None,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // === Accessors ===

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.best.best()
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn harvest_counts(&self) -> &HarvestCounts {
        &self.harvest_counts
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn fruit(&self, id: u32) -> Option<&Fruit> {
        self.fruits.iter().find(|f| f.id == id)
    }

    pub fn fruits_of(&self, category: Category) -> impl Iterator<Item = &Fruit> {
        self.fruits.iter().filter(move |f| f.category == category)
    }

    pub fn held(&self) -> Option<&HeldFruit> {
        self.held.as_ref()
    }

    pub fn feedback(&self) -> &[HarvestEvent] {
        self.feedback.events()
    }

    pub fn motion_enabled(&self) -> bool {
        self.motion_enabled
    }

    pub fn drop_zone(&self) -> Option<Rect> {
        self.drop_zone
    }

    pub fn play_area(&self) -> &PlayArea {
        self.factory.area()
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn last_outcome(&self) -> Option<&SessionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Number of sessions that ran to the end of their countdown
    pub fn completed_sessions(&self) -> u32 {
        self.best.sessions()
    }

    /// Handle the host's timers must carry, if the clock is running
    pub fn clock_handle(&self) -> Option<ClockHandle> {
        self.clock.current()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revision: self.revision,
            state: self.state,
            score: self.score,
            high_score: self.best.best(),
            time_remaining: self.countdown.remaining(),
            fruits: self.fruits.clone(),
            harvest_counts: self.harvest_counts,
            held: self.held,
            feedback: self.feedback.events().to_vec(),
            motion_enabled: self.motion_enabled,
            drop_zone: self.drop_zone,
        }
    }

    // === Configuration ===

    /// Toggle motion. Takes effect on the next frame; enabling starts a fresh Δt.
    pub fn set_motion_enabled(&mut self, enabled: bool) {
        if self.motion_enabled == enabled {
            return;
        }
        self.motion_enabled = enabled;
        if enabled {
            self.clock.restart_motion_baseline();
        }
        log::debug!("Motion {}", if enabled { "enabled" } else { "disabled" });
        self.touch();
    }

    /// Set the drop target in screen coordinates
    pub fn set_drop_zone(&mut self, zone: Option<Rect>) {
        self.drop_zone = zone;
        self.touch();
    }

    // === Transitions ===

    /// Idle -> Playing. Returns the clock handle for the host's timers,
    /// or None if a session is already running or paused.
    pub fn start(&mut self) -> Option<ClockHandle> {
        if self.state != SessionState::Idle {
            log::trace!("start ignored in {:?}", self.state);
            return None;
        }
        self.score = 0;
        self.countdown = Countdown::new(self.session_secs);
        self.harvest_counts.clear();
        self.held = None;
        self.feedback.clear();
        self.last_outcome = None;
        self.fruits = self.factory.generate_many(self.population);
        self.state = SessionState::Playing;
        let handle = self.clock.arm();
        log::info!(
            "Session started: {} fruit, {}s",
            self.fruits.len(),
            self.session_secs
        );
        self.touch();
        Some(handle)
    }

    /// Playing <-> Paused. Returns the new clock handle when resuming.
    pub fn toggle_pause(&mut self) -> Option<ClockHandle> {
        match self.state {
            SessionState::Playing => {
                self.clock.cancel();
                if let Some(held) = self.held.take() {
                    log::debug!("Pause released held fruit #{}", held.fruit_id);
                }
                self.state = SessionState::Paused;
                log::info!("Paused at {}s remaining", self.countdown.remaining());
                self.touch();
                None
            }
            SessionState::Paused => {
                self.state = SessionState::Playing;
                let handle = self.clock.arm();
                log::info!("Resumed at {}s remaining", self.countdown.remaining());
                self.touch();
                Some(handle)
            }
            SessionState::Idle | SessionState::Ended => None,
        }
    }

    /// Any state -> Idle, discarding the current session
    pub fn reset(&mut self) {
        self.clock.cancel();
        self.state = SessionState::Idle;
        self.score = 0;
        self.countdown = Countdown::new(self.session_secs);
        self.harvest_counts.clear();
        self.fruits.clear();
        self.held = None;
        self.feedback.clear();
        log::info!("Session reset");
        self.touch();
    }

    /// Playing -> Ended -> Idle when the countdown runs out
    fn finish(&mut self) {
        self.clock.cancel();
        self.state = SessionState::Ended;
        let new_best = self.best.reconcile(self.score);
        self.last_outcome = Some(SessionOutcome {
            final_score: self.score,
            harvest_counts: self.harvest_counts,
            new_best,
        });
        self.fruits.clear();
        self.held = None;
        log::info!(
            "Session over: score {} ({} harvested), best {}",
            self.score,
            self.harvest_counts.total(),
            self.best.best()
        );
        self.state = SessionState::Idle;
        self.touch();
    }

    // === Clock callbacks ===

    fn accepts(&self, handle: ClockHandle) -> bool {
        let live = self.state == SessionState::Playing && self.clock.is_live(handle);
        if !live {
            log::trace!("Stale clock callback discarded");
        }
        live
    }

    /// One-second countdown callback. Returns false if the handle is dead.
    pub fn countdown_tick(&mut self, handle: ClockHandle) -> bool {
        if !self.accepts(handle) {
            return false;
        }
        self.countdown_step();
        true
    }

    fn countdown_step(&mut self) {
        let expired = self.countdown.tick();
        self.touch();
        if expired {
            self.finish();
        }
    }

    /// Animation frame callback. Moves fruit (if motion is on) by the real
    /// time elapsed since the previous frame and expires old notifications.
    pub fn frame(&mut self, handle: ClockHandle, now_ms: u64) -> bool {
        if !self.accepts(handle) {
            return false;
        }
        self.frame_step(now_ms);
        true
    }

    fn frame_step(&mut self, now_ms: u64) {
        let dt = self.clock.frame_dt(now_ms);
        let mut changed = self.feedback.expire(self.clock.now_ms());
        if self.motion_enabled && dt > 0.0 {
            let held = self.held.map(|h| h.fruit_id);
            apply_motion(&mut self.fruits, self.factory.area(), dt, held);
            changed = true;
        }
        if changed {
            self.touch();
        }
    }

    /// Single driver for hosts with one timer: converts elapsed wall-clock
    /// time into whole countdown ticks, then runs one motion frame.
    pub fn advance(&mut self, handle: ClockHandle, now_ms: u64) -> bool {
        if !self.accepts(handle) {
            return false;
        }
        let due = self.clock.countdown_due(now_ms);
        for _ in 0..due {
            self.countdown_step();
            if self.state != SessionState::Playing {
                return true;
            }
        }
        self.frame_step(now_ms);
        true
    }

    // === Gestures ===

    /// Click-style gesture on a fruit. Wrong gestures, unknown ids and
    /// non-playing states are ignored, as is everything while a fruit is held.
    /// Drag-and-drop only resolves through [`Session::end_drag`].
    pub fn interact(&mut self, fruit_id: u32, gesture: Gesture) -> Option<ResolvedHarvest> {
        if self.state != SessionState::Playing {
            return None;
        }
        if gesture == Gesture::DragAndDrop {
            log::trace!("Drag-and-drop on #{} needs a drag, ignored", fruit_id);
            return None;
        }
        if let Some(held) = self.held {
            log::trace!(
                "Fruit #{} is held, gesture on #{} ignored",
                held.fruit_id,
                fruit_id
            );
            return None;
        }
        let harvest = resolve(self.fruit(fruit_id)?, gesture)?;
        self.apply_harvest(harvest);
        Some(harvest)
    }

    /// Press on a grape. Returns true if the fruit is now held.
    pub fn begin_drag(&mut self, fruit_id: u32, pointer: Vec2) -> bool {
        if self.state != SessionState::Playing || self.held.is_some() {
            return false;
        }
        match self.fruit(fruit_id) {
            Some(f) if f.category.gesture() == Gesture::DragAndDrop => {}
            _ => return false,
        }
        self.held = Some(HeldFruit {
            fruit_id,
            origin: pointer,
            pointer,
        });
        log::debug!("Drag started on #{}", fruit_id);
        self.touch();
        true
    }

    /// Track the pointer while a fruit is held
    pub fn update_drag(&mut self, pointer: Vec2) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(held) = self.held.as_mut() else {
            return false;
        };
        held.pointer = pointer;
        self.touch();
        true
    }

    /// Release the held fruit. Scores if released inside the drop zone,
    /// otherwise the fruit stays live and unselected.
    pub fn end_drag(&mut self, pointer: Vec2) -> Option<ResolvedHarvest> {
        if self.state != SessionState::Playing {
            return None;
        }
        let held = self.held.take()?;
        self.touch();

        let inside = self.drop_zone.is_some_and(|zone| zone.contains(pointer));
        if !inside {
            log::debug!("Fruit #{} dropped outside the zone", held.fruit_id);
            return None;
        }
        let harvest = resolve(self.fruit(held.fruit_id)?, Gesture::DragAndDrop)?;
        self.apply_harvest(harvest);
        Some(harvest)
    }

    /// Score, count, replace the fruit in place, and queue the popup
    fn apply_harvest(&mut self, harvest: ResolvedHarvest) {
        let Some(idx) = self.fruits.iter().position(|f| f.id == harvest.fruit_id) else {
            return;
        };
        self.score += harvest.points;
        self.harvest_counts.increment(harvest.category);
        self.fruits[idx] = self.factory.generate();
        self.feedback
            .push(harvest.category, harvest.pos, self.clock.now_ms());
        log::debug!(
            "Harvested {} #{} (+{}), score {}",
            harvest.category.as_str(),
            harvest.fruit_id,
            harvest.points,
            self.score
        );
        self.touch();
    }
}

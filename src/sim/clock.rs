//! Simulation Clock - countdown and per-frame motion
//!
//! The host owns the real timers (a one-second interval and an animation
//! frame callback). Every time the clock is armed it hands out a fresh
//! [`ClockHandle`]; the host passes that handle back with each callback.
//! Cancelling bumps the generation, so a callback that was already queued
//! when the session paused or reset carries a dead handle and does nothing.

use super::arena::PlayArea;
use super::fruit::Fruit;
use crate::consts::{COUNTDOWN_MS, MAX_FRAME_DT};

/// Cancellation token for scheduled clock callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHandle {
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SimClock {
    generation: u64,
    armed: bool,
    /// Last motion frame timestamp (Δt baseline)
    last_frame_ms: Option<u64>,
    /// Last timestamp seen by `countdown_due`
    last_advance_ms: Option<u64>,
    /// Elapsed time not yet converted into whole countdown ticks
    countdown_accum_ms: u64,
    /// Latest host timestamp observed (ms)
    now_ms: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin scheduling. Any previously issued handle becomes dead.
    pub fn arm(&mut self) -> ClockHandle {
        self.generation += 1;
        self.armed = true;
        self.clear_baselines();
        ClockHandle {
            generation: self.generation,
        }
    }

    /// Stop scheduling. All outstanding handles become dead.
    pub fn cancel(&mut self) {
        if self.armed {
            self.generation += 1;
            self.armed = false;
        }
        self.clear_baselines();
    }

    fn clear_baselines(&mut self) {
        self.last_frame_ms = None;
        self.last_advance_ms = None;
        self.countdown_accum_ms = 0;
    }

    /// Whether a callback carrying `handle` may still run
    #[inline]
    pub fn is_live(&self, handle: ClockHandle) -> bool {
        self.armed && handle.generation == self.generation
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The handle callbacks must currently carry, if armed
    pub fn current(&self) -> Option<ClockHandle> {
        self.armed.then_some(ClockHandle {
            generation: self.generation,
        })
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Record a host timestamp (timestamps never move backwards)
    pub fn observe(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Forget the motion baseline so the next frame starts a fresh Δt
    pub fn restart_motion_baseline(&mut self) {
        self.last_frame_ms = None;
    }

    /// Seconds since the previous frame, capped at `MAX_FRAME_DT`.
    /// The first frame after arming or a baseline restart yields 0.
    pub fn frame_dt(&mut self, now_ms: u64) -> f32 {
        self.observe(now_ms);
        let dt = match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        dt.min(MAX_FRAME_DT)
    }

    /// Whole countdown ticks that elapsed since the previous call.
    /// Sub-second remainders carry over until the clock is cancelled.
    pub fn countdown_due(&mut self, now_ms: u64) -> u32 {
        self.observe(now_ms);
        if let Some(last) = self.last_advance_ms {
            self.countdown_accum_ms += now_ms.saturating_sub(last);
        }
        self.last_advance_ms = Some(now_ms);
        let ticks = self.countdown_accum_ms / COUNTDOWN_MS;
        self.countdown_accum_ms %= COUNTDOWN_MS;
        ticks as u32
    }
}

/// Seconds left in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Decrement by one second (floor 0). Returns true when this tick hit zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}

/// Move every fruit by its velocity, reflecting off the play area walls.
/// `held` is pinned to the pointer and does not move.
pub fn apply_motion(fruits: &mut [Fruit], area: &PlayArea, dt: f32, held: Option<u32>) {
    if dt <= 0.0 {
        return;
    }
    for fruit in fruits.iter_mut().filter(|f| Some(f.id) != held) {
        area.step(&mut fruit.pos, &mut fruit.vel, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fruit::{Category, FruitSize};
    use glam::Vec2;

    fn fruit(id: u32, pos: Vec2, vel: Vec2) -> Fruit {
        Fruit {
            id,
            category: Category::Apple,
            size: FruitSize::Small,
            pos,
            vel,
        }
    }

    #[test]
    fn cancelled_handle_is_dead() {
        let mut clock = SimClock::new();
        assert!(!clock.is_armed());
        let h = clock.arm();
        assert!(clock.is_armed());
        assert!(clock.is_live(h));
        clock.cancel();
        assert!(!clock.is_armed());
        assert!(!clock.is_live(h));
        assert_eq!(clock.current(), None);

        // Re-arming does not revive the old handle
        let h2 = clock.arm();
        assert!(!clock.is_live(h));
        assert!(clock.is_live(h2));
        assert_eq!(clock.current(), Some(h2));
    }

    #[test]
    fn first_frame_sets_baseline() {
        let mut clock = SimClock::new();
        clock.arm();
        assert_eq!(clock.frame_dt(5_000), 0.0);
        assert!((clock.frame_dt(5_016) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn frame_dt_is_capped() {
        let mut clock = SimClock::new();
        clock.arm();
        clock.frame_dt(0);
        assert_eq!(clock.frame_dt(10_000), MAX_FRAME_DT);
    }

    #[test]
    fn rearm_restarts_baseline() {
        let mut clock = SimClock::new();
        clock.arm();
        clock.frame_dt(1_000);
        clock.cancel();
        clock.arm();
        // Time spent cancelled is not replayed
        assert_eq!(clock.frame_dt(60_000), 0.0);
    }

    #[test]
    fn countdown_due_carries_remainder() {
        let mut clock = SimClock::new();
        clock.arm();
        assert_eq!(clock.countdown_due(0), 0);
        assert_eq!(clock.countdown_due(700), 0);
        assert_eq!(clock.countdown_due(1_400), 1);
        assert_eq!(clock.countdown_due(3_500), 2);
        assert_eq!(clock.countdown_due(3_600), 0);
        assert_eq!(clock.countdown_due(4_100), 1);
    }

    #[test]
    fn countdown_remainder_dropped_on_cancel() {
        let mut clock = SimClock::new();
        clock.arm();
        clock.countdown_due(0);
        clock.countdown_due(900);
        clock.cancel();
        clock.arm();
        clock.countdown_due(10_000);
        assert_eq!(clock.countdown_due(10_200), 0);
    }

    #[test]
    fn countdown_floors_at_zero() {
        let mut c = Countdown::new(2);
        assert!(!c.tick());
        assert!(c.tick());
        assert!(c.expired());
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn motion_skips_held_fruit() {
        let area = PlayArea::default();
        let mut fruits = vec![
            fruit(1, Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0)),
            fruit(2, Vec2::new(20.0, 20.0), Vec2::new(10.0, 0.0)),
        ];
        apply_motion(&mut fruits, &area, 0.1, Some(2));
        assert_eq!(fruits[0].pos, Vec2::new(11.0, 10.0));
        assert_eq!(fruits[1].pos, Vec2::new(20.0, 20.0));
    }
}

//! Play area bounds and boundary reflection
//!
//! Fruit move inside the playable sub-region: x in [0, width], y in [0, height].
//! The drop zone lies outside `width` on screen, so it never bounces fruit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Logical play region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Playable sub-region width (x-axis reflection bound)
    pub width: f32,
    /// Full logical height (y-axis reflection bound)
    pub height: f32,
    /// Spawn margin kept clear of the edges
    pub margin: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: FULL_HEIGHT,
            margin: SPAWN_MARGIN,
        }
    }
}

impl PlayArea {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        assert!(width > 0.0 && height > 0.0, "play area must be non-empty");
        assert!(
            margin >= 0.0 && margin * 2.0 < width && margin * 2.0 < height,
            "spawn margin must leave a spawn region"
        );
        Self {
            width,
            height,
            margin,
        }
    }

    /// Upper reflection bound per axis
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Corners of the spawn region (play area shrunk by the margin)
    pub fn spawn_region(&self) -> (Vec2, Vec2) {
        let m = Vec2::splat(self.margin);
        (m, self.bounds() - m)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Advance a body by `vel * dt`, reflecting off each wall independently.
    ///
    /// A component that would leave [0, max] has its velocity inverted and its
    /// position clamped to the wall; no overshoot is carried into the same tick.
    pub fn step(&self, pos: &mut Vec2, vel: &mut Vec2, dt: f32) {
        let bounds = self.bounds();
        let (x, vx) = reflect_axis(pos.x + vel.x * dt, vel.x, bounds.x);
        let (y, vy) = reflect_axis(pos.y + vel.y * dt, vel.y, bounds.y);
        *pos = Vec2::new(x, y);
        *vel = Vec2::new(vx, vy);
    }
}

/// Reflect one axis against [0, max]
#[inline]
pub fn reflect_axis(next: f32, vel: f32, max: f32) -> (f32, f32) {
    if next < 0.0 {
        (0.0, vel.abs())
    } else if next > max {
        (max, -vel.abs())
    } else {
        (next, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reflects_off_right_wall_without_overshoot() {
        let area = PlayArea::default();
        let mut pos = Vec2::new(area.width, 50.0);
        let mut vel = Vec2::new(10.0, 0.0);
        area.step(&mut pos, &mut vel, 0.016);
        assert!(vel.x < 0.0);
        assert!(pos.x <= area.width);
        assert_eq!(pos.x, area.width);
        assert_eq!(pos.y, 50.0);
    }

    #[test]
    fn reflects_off_top_and_left_independently() {
        let area = PlayArea::default();
        let mut pos = Vec2::new(0.5, 0.5);
        let mut vel = Vec2::new(-10.0, -10.0);
        area.step(&mut pos, &mut vel, 0.1);
        assert_eq!(pos, Vec2::ZERO);
        assert_eq!(vel, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn one_axis_reflects_other_moves_freely() {
        let area = PlayArea::default();
        let mut pos = Vec2::new(40.0, area.height - 0.1);
        let mut vel = Vec2::new(5.0, 5.0);
        area.step(&mut pos, &mut vel, 1.0);
        assert_eq!(pos, Vec2::new(45.0, area.height));
        assert_eq!(vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn reflection_uses_play_width_not_full_width() {
        let area = PlayArea::new(80.0, 100.0, 5.0);
        let mut pos = Vec2::new(79.0, 10.0);
        let mut vel = Vec2::new(15.0, 0.0);
        area.step(&mut pos, &mut vel, 1.0);
        assert_eq!(pos.x, 80.0);
    }

    #[test]
    fn spawn_region_respects_margin() {
        let area = PlayArea::new(80.0, 100.0, 5.0);
        let (lo, hi) = area.spawn_region();
        assert_eq!(lo, Vec2::new(5.0, 5.0));
        assert_eq!(hi, Vec2::new(75.0, 95.0));
    }

    #[test]
    #[should_panic]
    fn margin_too_large_is_rejected() {
        PlayArea::new(10.0, 10.0, 5.0);
    }

    proptest! {
        #[test]
        fn step_stays_in_bounds(
            x in 0.0f32..=80.0,
            y in 0.0f32..=100.0,
            vx in -15.0f32..=15.0,
            vy in -15.0f32..=15.0,
            dt in 0.0f32..=0.1,
        ) {
            let area = PlayArea::default();
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(vx, vy);
            area.step(&mut pos, &mut vel, dt);
            prop_assert!(area.contains(pos));
            prop_assert_eq!(vel.x.abs(), vx.abs());
            prop_assert_eq!(vel.y.abs(), vy.abs());
        }
    }
}

//! Fruit Factory - random fruit generation
//!
//! Category and size are drawn uniformly from their closed sets, position
//! uniformly inside the spawn region, velocity uniformly per axis from a
//! symmetric range. Velocity is always drawn, even with motion disabled.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::PlayArea;
use super::fruit::{Category, Fruit, FruitSize};
use crate::consts::MAX_SPEED;

#[derive(Debug, Clone)]
pub struct FruitFactory {
    rng: Pcg32,
    area: PlayArea,
    max_speed: f32,
    /// Next fruit ID (never reset, so IDs are unique for the process lifetime)
    next_id: u32,
}

impl FruitFactory {
    /// Factory seeded from OS entropy
    pub fn new(area: PlayArea, max_speed: f32) -> Self {
        Self::with_rng(Pcg32::from_os_rng(), area, max_speed)
    }

    /// Factory with a fixed seed (tests, replays)
    pub fn with_seed(seed: u64, area: PlayArea, max_speed: f32) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), area, max_speed)
    }

    fn with_rng(rng: Pcg32, area: PlayArea, max_speed: f32) -> Self {
        assert!(max_speed >= 0.0, "max_speed must be non-negative");
        Self {
            rng,
            area,
            max_speed,
            next_id: 1,
        }
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    /// Allocate a new fruit ID
    fn next_fruit_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Produce one fruit
    pub fn generate(&mut self) -> Fruit {
        let id = self.next_fruit_id();
        let category = Category::ALL[self.rng.random_range(0..Category::ALL.len())];
        let size = FruitSize::ALL[self.rng.random_range(0..FruitSize::ALL.len())];

        let (lo, hi) = self.area.spawn_region();
        let pos = Vec2::new(
            self.rng.random_range(lo.x..=hi.x),
            self.rng.random_range(lo.y..=hi.y),
        );

        let s = self.max_speed;
        let vel = Vec2::new(
            self.rng.random_range(-s..=s),
            self.rng.random_range(-s..=s),
        );

        Fruit {
            id,
            category,
            size,
            pos,
            vel,
        }
    }

    /// Produce `n` independent fruit
    pub fn generate_many(&mut self, n: usize) -> Vec<Fruit> {
        assert!(n > 0, "generate_many called with n = 0");
        (0..n).map(|_| self.generate()).collect()
    }
}

impl Default for FruitFactory {
    fn default() -> Self {
        Self::new(PlayArea::default(), MAX_SPEED)
    }
}

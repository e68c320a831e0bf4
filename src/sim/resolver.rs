//! Interaction Resolver - gesture/category matching
//!
//! A gesture scores only on the category it is bound to. Any other pairing
//! is the player trying the wrong gesture and resolves to nothing.

use glam::Vec2;

use super::fruit::{Category, Fruit, Gesture};

/// A successful harvest, ready to be applied to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHarvest {
    pub fruit_id: u32,
    pub category: Category,
    pub points: u32,
    /// Last known position of the harvested fruit
    pub pos: Vec2,
}

pub fn resolve(fruit: &Fruit, gesture: Gesture) -> Option<ResolvedHarvest> {
    if fruit.category.gesture() != gesture {
        log::trace!(
            "{:?} on {} #{} ignored",
            gesture,
            fruit.category.as_str(),
            fruit.id
        );
        return None;
    }
    Some(ResolvedHarvest {
        fruit_id: fruit.id,
        category: fruit.category,
        points: fruit.category.points(),
        pos: fruit.pos,
    })
}

//! Fruit entities and the category/gesture binding table

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fruit kind. Each category is bound to exactly one scoring gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Harvested with a primary click
    Apple,
    /// Harvested with a double click
    Banana,
    /// Harvested with a secondary (right) click
    Cherry,
    /// Harvested by dragging into the drop zone
    Grape,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Apple,
        Category::Banana,
        Category::Cherry,
        Category::Grape,
    ];

    /// The only gesture that harvests this category
    pub fn gesture(self) -> Gesture {
        match self {
            Category::Apple => Gesture::PrimaryClick,
            Category::Banana => Gesture::DoubleClick,
            Category::Cherry => Gesture::SecondaryClick,
            Category::Grape => Gesture::DragAndDrop,
        }
    }

    /// Points awarded per harvest
    pub fn points(self) -> u32 {
        match self {
            Category::Apple => 10,
            Category::Banana => 20,
            Category::Cherry => 15,
            Category::Grape => 25,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Apple => "apple",
            Category::Banana => "banana",
            Category::Cherry => "cherry",
            Category::Grape => "grape",
        }
    }
}

/// Player input kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    PrimaryClick,
    DoubleClick,
    SecondaryClick,
    DragAndDrop,
}

impl Gesture {
    pub const ALL: [Gesture; 4] = [
        Gesture::PrimaryClick,
        Gesture::DoubleClick,
        Gesture::SecondaryClick,
        Gesture::DragAndDrop,
    ];
}

/// Visual size class (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitSize {
    Small,
    Medium,
    Large,
}

impl FruitSize {
    pub const ALL: [FruitSize; 3] = [FruitSize::Small, FruitSize::Medium, FruitSize::Large];
}

/// A harvestable fruit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    pub category: Category,
    pub size: FruitSize,
    /// Logical position, x in [0, play_width], y in [0, full_height]
    pub pos: Vec2,
    /// Units per second, only applied while motion is enabled
    pub vel: Vec2,
}

/// Per-category harvest tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestCounts([u32; 4]);

impl HarvestCounts {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    pub fn increment(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn clear(&mut self) {
        self.0 = [0; 4];
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

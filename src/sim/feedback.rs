//! Harvest notifications for the renderer (not gameplay-affecting)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fruit::Category;

/// "+points" popup at the spot a fruit was harvested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestEvent {
    pub id: u32,
    pub category: Category,
    pub pos: Vec2,
    /// Session clock time when the harvest happened (ms)
    pub created_ms: u64,
}

impl HarvestEvent {
    pub fn points(&self) -> u32 {
        self.category.points()
    }
}

/// Pending notifications, oldest first
#[derive(Debug, Clone)]
pub struct FeedbackQueue {
    events: Vec<HarvestEvent>,
    ttl_ms: u64,
    next_id: u32,
}

impl FeedbackQueue {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            events: Vec::new(),
            ttl_ms,
            next_id: 1,
        }
    }

    pub fn push(&mut self, category: Category, pos: Vec2, now_ms: u64) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.events.push(HarvestEvent {
            id,
            category,
            pos,
            created_ms: now_ms,
        });
    }

    /// Drop events older than the display duration. Returns true if any expired.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let before = self.events.len();
        let ttl = self.ttl_ms;
        self.events
            .retain(|e| now_ms.saturating_sub(e.created_ms) < ttl);
        self.events.len() != before
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[HarvestEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_expire_after_ttl() {
        let mut q = FeedbackQueue::new(1000);
        q.push(Category::Apple, Vec2::ZERO, 0);
        q.push(Category::Grape, Vec2::ONE, 600);
        assert_eq!(q.len(), 2);

        assert!(!q.expire(999));
        assert!(q.expire(1000));
        assert_eq!(q.len(), 1);
        assert_eq!(q.events()[0].category, Category::Grape);
        assert_eq!(q.events()[0].points(), 25);

        assert!(q.expire(1600));
        assert!(q.is_empty());
    }

    #[test]
    fn ids_are_distinct() {
        let mut q = FeedbackQueue::new(1000);
        q.push(Category::Apple, Vec2::ZERO, 0);
        q.push(Category::Apple, Vec2::ZERO, 0);
        assert_ne!(q.events()[0].id, q.events()[1].id);
        q.clear();
        assert!(q.is_empty());
    }
}

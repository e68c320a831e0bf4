//! Idle/demo mode - a scripted player
//!
//! Picks the most valuable live fruit and performs its bound gesture through
//! the same calls a real renderer would make. Grapes are dragged to the
//! centre of the drop zone, and skipped when no zone is configured.

use glam::Vec2;

use crate::sim::{Fruit, Gesture, ResolvedHarvest, Session};

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Minimum time between actions (ms)
    pub interval_ms: u64,
    /// Logical -> screen scale used to fake pointer positions
    pub screen_scale: f32,
    last_action_ms: Option<u64>,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(400)
    }
}

impl AutoPlayer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            screen_scale: 10.0,
            last_action_ms: None,
        }
    }

    /// Choose the next target: highest points first, lowest id on ties
    pub fn pick(&self, session: &Session) -> Option<Fruit> {
        let can_drop = session.drop_zone().is_some();
        session
            .fruits()
            .iter()
            .filter(|f| can_drop || f.category.gesture() != Gesture::DragAndDrop)
            .max_by(|a, b| {
                a.category
                    .points()
                    .cmp(&b.category.points())
                    .then(b.id.cmp(&a.id))
            })
            .cloned()
    }

    /// Act if the interval has elapsed. Returns the harvest, if any.
    pub fn act(&mut self, session: &mut Session, now_ms: u64) -> Option<ResolvedHarvest> {
        if !session.is_playing() {
            return None;
        }
        if let Some(last) = self.last_action_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return None;
            }
        }
        self.last_action_ms = Some(now_ms);

        let target = self.pick(session)?;
        match target.category.gesture() {
            Gesture::DragAndDrop => {
                let zone = session.drop_zone()?;
                let start = target.pos * self.screen_scale;
                let end = zone.center();
                if !session.begin_drag(target.id, start) {
                    return None;
                }
                session.update_drag(start.lerp(end, 0.5));
                session.end_drag(end)
            }
            gesture => session.interact(target.id, gesture),
        }
    }

    /// Pointer position the renderer should show for a held fruit
    pub fn to_screen(&self, logical: Vec2) -> Vec2 {
        logical * self.screen_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Category, FruitFactory};
    use crate::{Rect, Settings};

    fn session(with_zone: bool) -> Session {
        let settings = Settings::default();
        let factory = FruitFactory::with_seed(99, settings.play_area(), settings.max_speed);
        let mut s = Session::with_factory(&settings, factory);
        if with_zone {
            s.set_drop_zone(Some(Rect::new(
                Vec2::new(800.0, 0.0),
                Vec2::new(1000.0, 1000.0),
            )));
        }
        s.start();
        s
    }

    #[test]
    fn every_action_scores() {
        let mut s = session(true);
        let mut bot = AutoPlayer::new(0);
        for i in 0..50 {
            let before = s.score();
            let h = bot.act(&mut s, i).expect("bot harvests");
            assert_eq!(s.score(), before + h.points);
            assert_eq!(s.fruits().len(), 10);
        }
    }

    #[test]
    fn prefers_grapes_when_droppable() {
        let s = session(true);
        let bot = AutoPlayer::default();
        let pick = bot.pick(&s).unwrap();
        let has_grape = s.fruits_of(Category::Grape).next().is_some();
        if has_grape {
            assert_eq!(pick.category, Category::Grape);
        }
    }

    #[test]
    fn skips_grapes_without_zone() {
        let mut s = session(false);
        let mut bot = AutoPlayer::new(0);
        for i in 0..30 {
            bot.act(&mut s, i);
        }
        assert_eq!(s.harvest_counts().get(Category::Grape), 0);
        assert!(s.score() > 0);
    }

    #[test]
    fn respects_interval() {
        let mut s = session(true);
        let mut bot = AutoPlayer::new(500);
        assert!(bot.act(&mut s, 1_000).is_some());
        assert!(bot.act(&mut s, 1_200).is_none());
        assert!(bot.act(&mut s, 1_500).is_some());
    }

    #[test]
    fn idle_when_not_playing() {
        let mut s = session(true);
        s.toggle_pause();
        let mut bot = AutoPlayer::new(0);
        assert!(bot.act(&mut s, 0).is_none());
    }
}

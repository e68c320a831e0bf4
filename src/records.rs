//! Best score tracking
//!
//! Lives for the process lifetime only; nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Process-lifetime best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    best: u32,
    /// Completed sessions seen
    sessions: u32,
}

impl BestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished session's score.
    /// Returns true if it became the new best.
    pub fn reconcile(&mut self, score: u32) -> bool {
        self.sessions += 1;
        if !self.qualifies(score) {
            return false;
        }
        log::info!("New best score: {} (was {})", score, self.best);
        self.best = score;
        true
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strictly_higher_scores_replace_best() {
        let mut best = BestScore::new();
        assert!(!best.reconcile(0));
        assert!(best.reconcile(40));
        assert!(!best.reconcile(40));
        assert!(!best.reconcile(25));
        assert!(best.reconcile(41));
        assert_eq!(best.best(), 41);
        assert_eq!(best.sessions(), 5);
    }

    #[test]
    fn qualifies_does_not_record() {
        let best = BestScore::new();
        assert!(best.qualifies(1));
        assert!(!best.qualifies(0));
        assert_eq!(best.sessions(), 0);
    }
}

//! Score, turns and round progression

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Turn & round economy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    pub score: u64,
    /// Current round (1-based)
    pub round: u32,
    /// Turns left; may dip below 0 internally, the display clamps it
    pub turns: i32,
    /// Markers requested for the next spawn
    pub spawn_count: u32,
    /// Set once turns run out; no further mutations after this
    pub terminal: bool,
}

impl Economy {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            round: 1,
            turns: tuning.start_turns,
            spawn_count: tuning.start_spawn_count.min(tuning.max_markers),
            terminal: false,
        }
    }

    /// Add points (saturating)
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Apply a turn delta (negative spends turns)
    pub fn adjust_turns(&mut self, delta: i32) {
        self.turns = self.turns.saturating_add(delta);
    }

    /// Turn counter as the player sees it
    pub fn displayed_turns(&self) -> u32 {
        self.turns.max(0) as u32
    }

    /// True once the turn budget is spent
    pub fn is_exhausted(&self) -> bool {
        self.turns <= 0
    }

    /// Bump the round and difficulty; returns the new spawn count
    pub fn advance_round(&mut self, max_markers: u32) -> u32 {
        self.round += 1;
        self.spawn_count = (self.spawn_count + 1).min(max_markers);
        self.spawn_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_values() {
        let economy = Economy::new(&Tuning::default());
        assert_eq!(economy.score, 0);
        assert_eq!(economy.round, 1);
        assert_eq!(economy.turns, 15);
        assert_eq!(economy.spawn_count, 6);
        assert!(!economy.terminal);
    }

    #[test]
    fn test_advance_round_caps_spawn_count() {
        let mut economy = Economy::new(&Tuning::default());
        assert_eq!(economy.advance_round(50), 7);
        assert_eq!(economy.round, 2);

        economy.spawn_count = 50;
        assert_eq!(economy.advance_round(50), 50);
        assert_eq!(economy.round, 3);
    }

    #[test]
    fn test_displayed_turns_clamp() {
        let mut economy = Economy::new(&Tuning::default());
        economy.adjust_turns(-15);
        assert!(economy.is_exhausted());
        assert_eq!(economy.displayed_turns(), 0);
        economy.adjust_turns(-1);
        assert_eq!(economy.displayed_turns(), 0);
        economy.adjust_turns(4);
        assert_eq!(economy.displayed_turns(), 3);
        assert!(!economy.is_exhausted());
    }
}

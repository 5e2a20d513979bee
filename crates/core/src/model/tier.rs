use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Level;

/// Difficulty bucket controlling content pool and time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        };
        write!(f, "{name}")
    }
}

/// Fixed level thresholds mapping a level to a tier.
///
/// Levels `1..=easy_max` are easy, `easy_max+1..=medium_max` medium,
/// everything above hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTiers {
    easy_max: u32,
    medium_max: u32,
}

impl LevelTiers {
    /// Build a tier map. `medium_max` below `easy_max` is clamped up so the
    /// mapping always stays monotone.
    #[must_use]
    pub fn new(easy_max: u32, medium_max: u32) -> Self {
        Self {
            easy_max,
            medium_max: medium_max.max(easy_max),
        }
    }

    #[must_use]
    pub fn tier_for(&self, level: Level) -> Tier {
        let level = level.value();
        if level <= self.easy_max {
            Tier::Easy
        } else if level <= self.medium_max {
            Tier::Medium
        } else {
            Tier::Hard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u32) -> Level {
        Level::new(n).unwrap()
    }

    #[test]
    fn maps_levels_to_tiers() {
        let tiers = LevelTiers::new(2, 5);
        assert_eq!(tiers.tier_for(level(1)), Tier::Easy);
        assert_eq!(tiers.tier_for(level(2)), Tier::Easy);
        assert_eq!(tiers.tier_for(level(3)), Tier::Medium);
        assert_eq!(tiers.tier_for(level(5)), Tier::Medium);
        assert_eq!(tiers.tier_for(level(6)), Tier::Hard);
        assert_eq!(tiers.tier_for(level(40)), Tier::Hard);
    }

    #[test]
    fn clamps_inverted_thresholds() {
        let tiers = LevelTiers::new(4, 2);
        assert_eq!(tiers.tier_for(level(4)), Tier::Easy);
        assert_eq!(tiers.tier_for(level(5)), Tier::Hard);
    }
}

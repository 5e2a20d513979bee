use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::tier::LevelTiers;
use crate::scoring::StarThresholds;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("level must be >= 1")]
    InvalidLevel,

    #[error("unknown game slug: {0}")]
    UnknownGame(String),
}

/// A 1-based game level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Creates a level.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidLevel` for level zero.
    pub fn new(level: u32) -> Result<Self, GameError> {
        if level == 0 {
            return Err(GameError::InvalidLevel);
        }
        Ok(Self(level))
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven mini-games in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    MathAdventure,
    WordWizard,
    ScienceLab,
    MemoryPalace,
    PatternQuest,
    GeographyExplorer,
    CreativityCanvas,
}

impl GameKind {
    pub const ALL: [GameKind; 7] = [
        GameKind::MathAdventure,
        GameKind::WordWizard,
        GameKind::ScienceLab,
        GameKind::MemoryPalace,
        GameKind::PatternQuest,
        GameKind::GeographyExplorer,
        GameKind::CreativityCanvas,
    ];

    /// Every game ships the same number of levels.
    #[must_use]
    pub fn total_levels(self) -> u32 {
        7
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            GameKind::MathAdventure => "math-adventure",
            GameKind::WordWizard => "word-wizard",
            GameKind::ScienceLab => "science-lab",
            GameKind::MemoryPalace => "memory-palace",
            GameKind::PatternQuest => "pattern-quest",
            GameKind::GeographyExplorer => "geography-explorer",
            GameKind::CreativityCanvas => "creativity-canvas",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameKind::MathAdventure => "Math Adventure",
            GameKind::WordWizard => "Word Wizard",
            GameKind::ScienceLab => "Science Lab",
            GameKind::MemoryPalace => "Memory Palace",
            GameKind::PatternQuest => "Pattern Quest",
            GameKind::GeographyExplorer => "Geography Explorer",
            GameKind::CreativityCanvas => "Creativity Canvas",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameKind::MathAdventure => "Solve puzzles and equations in magical lands!",
            GameKind::WordWizard => "Cast spells with vocabulary and spelling!",
            GameKind::ScienceLab => "Conduct experiments and discover wonders!",
            GameKind::MemoryPalace => "Train your brain with memory challenges!",
            GameKind::PatternQuest => "Discover sequences and logical patterns!",
            GameKind::GeographyExplorer => "Travel the world and learn about places!",
            GameKind::CreativityCanvas => "Express yourself through art and imagination!",
        }
    }

    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            GameKind::MathAdventure => "Mathematics",
            GameKind::WordWizard => "Language",
            GameKind::ScienceLab => "Science",
            GameKind::MemoryPalace => "Memory",
            GameKind::PatternQuest => "Logic",
            GameKind::GeographyExplorer => "Geography",
            GameKind::CreativityCanvas => "Art",
        }
    }

    /// Level thresholds for the easy/medium/hard content pools.
    #[must_use]
    pub fn tiers(self) -> LevelTiers {
        match self {
            GameKind::MathAdventure | GameKind::PatternQuest => LevelTiers::new(2, 4),
            _ => LevelTiers::new(2, 5),
        }
    }

    /// Star-rating cutoffs for this game.
    #[must_use]
    pub fn thresholds(self) -> StarThresholds {
        match self {
            GameKind::CreativityCanvas => StarThresholds::relaxed(),
            _ => StarThresholds::standard(),
        }
    }

    /// Session time budget in seconds; higher levels get more time.
    ///
    /// Creativity Canvas budgets per drawing prompt instead, so its session
    /// budget is derived from the generated challenges and this base is only
    /// a fallback.
    #[must_use]
    pub fn time_budget_secs(self, level: Level) -> u32 {
        let extra = level.value() - 1;
        match self {
            GameKind::MathAdventure => 60 + extra * 10,
            GameKind::WordWizard | GameKind::PatternQuest => 90 + extra * 15,
            GameKind::ScienceLab => 75 + extra * 10,
            GameKind::MemoryPalace => 60 + level.value() * 15,
            GameKind::GeographyExplorer => 100 + extra * 20,
            GameKind::CreativityCanvas => 90 + extra * 30,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for GameKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| GameError::UnknownGame(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tier;

    #[test]
    fn slugs_round_trip() {
        for kind in GameKind::ALL {
            let parsed: GameKind = kind.slug().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        let err = "spelling-bee".parse::<GameKind>().unwrap_err();
        assert!(matches!(err, GameError::UnknownGame(_)));
    }

    #[test]
    fn level_zero_is_rejected() {
        assert!(matches!(Level::new(0), Err(GameError::InvalidLevel)));
    }

    #[test]
    fn math_tiers_follow_level_cutoffs() {
        let tiers = GameKind::MathAdventure.tiers();
        assert_eq!(tiers.tier_for(Level::new(2).unwrap()), Tier::Easy);
        assert_eq!(tiers.tier_for(Level::new(4).unwrap()), Tier::Medium);
        assert_eq!(tiers.tier_for(Level::new(5).unwrap()), Tier::Hard);
    }

    #[test]
    fn time_budget_grows_with_level() {
        for kind in GameKind::ALL {
            let low = kind.time_budget_secs(Level::new(1).unwrap());
            let high = kind.time_budget_secs(Level::new(7).unwrap());
            assert!(low > 0);
            assert!(high > low);
        }
    }
}

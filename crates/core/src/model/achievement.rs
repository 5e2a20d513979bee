use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::model::{GameKind, LevelProgress};

/// A level completed faster than this counts toward Speed Demon.
const SPEED_DEMON_SECS: u32 = 30;

/// The fixed achievement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementKind {
    FirstSteps,
    SpeedDemon,
    Perfectionist,
    Explorer,
    Master,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 5] = [
        AchievementKind::FirstSteps,
        AchievementKind::SpeedDemon,
        AchievementKind::Perfectionist,
        AchievementKind::Explorer,
        AchievementKind::Master,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "first-steps",
            AchievementKind::SpeedDemon => "speed-demon",
            AchievementKind::Perfectionist => "perfectionist",
            AchievementKind::Explorer => "explorer",
            AchievementKind::Master => "master",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "First Steps",
            AchievementKind::SpeedDemon => "Speed Demon",
            AchievementKind::Perfectionist => "Perfectionist",
            AchievementKind::Explorer => "Game Explorer",
            AchievementKind::Master => "Game Master",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AchievementKind::FirstSteps => "Complete your first game level",
            AchievementKind::SpeedDemon => "Complete a level in under 30 seconds",
            AchievementKind::Perfectionist => "Get 3 stars on 10 levels",
            AchievementKind::Explorer => "Try all 7 different games",
            AchievementKind::Master => "Complete all levels in any game",
        }
    }

    /// Progress count needed to unlock.
    #[must_use]
    pub fn requirement(self) -> u32 {
        match self {
            AchievementKind::FirstSteps | AchievementKind::SpeedDemon | AchievementKind::Master => {
                1
            }
            AchievementKind::Perfectionist => 10,
            AchievementKind::Explorer => 7,
        }
    }

    fn progress_in(self, progress: &[LevelProgress]) -> u32 {
        match self {
            AchievementKind::FirstSteps => u32::from(progress.iter().any(LevelProgress::completed)),
            AchievementKind::SpeedDemon => count_u32(
                progress
                    .iter()
                    .filter(|p| p.completed() && p.time_spent_secs() < SPEED_DEMON_SECS),
            ),
            AchievementKind::Perfectionist => {
                count_u32(progress.iter().filter(|p| p.stars() == 3))
            }
            AchievementKind::Explorer => {
                let games: HashSet<GameKind> = progress.iter().map(LevelProgress::game).collect();
                count_u32(games.iter())
            }
            AchievementKind::Master => count_u32(GameKind::ALL.iter().filter(|game| {
                let completed = progress
                    .iter()
                    .filter(|p| p.game() == **game && p.completed())
                    .count();
                completed as u32 >= game.total_levels()
            })),
        }
    }
}

fn count_u32<T>(iter: impl Iterator<Item = T>) -> u32 {
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for AchievementKind {
    type Err = UnknownAchievement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AchievementKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| UnknownAchievement(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown achievement slug: {0}")]
pub struct UnknownAchievement(pub String);

/// Current unlock state of one achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    pub kind: AchievementKind,
    pub progress: u32,
    pub unlocked: bool,
}

impl AchievementStatus {
    #[must_use]
    pub fn locked(kind: AchievementKind) -> Self {
        Self {
            kind,
            progress: 0,
            unlocked: false,
        }
    }
}

/// Recompute every achievement from the player's level progress.
///
/// Unlocking is monotone: an achievement that was unlocked in `previous`
/// stays unlocked even if the recomputed progress would no longer qualify.
#[must_use]
pub fn recompute(
    progress: &[LevelProgress],
    previous: &[AchievementStatus],
) -> Vec<AchievementStatus> {
    AchievementKind::ALL
        .into_iter()
        .map(|kind| {
            let count = kind.progress_in(progress);
            let was_unlocked = previous
                .iter()
                .any(|status| status.kind == kind && status.unlocked);
            AchievementStatus {
                kind,
                progress: count,
                unlocked: was_unlocked || count >= kind.requirement(),
            }
        })
        .collect()
}

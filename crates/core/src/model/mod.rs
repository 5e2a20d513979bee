mod achievement;
mod challenge;
mod game;
mod ids;
mod player;
mod progress;
mod result;
mod tier;

pub use achievement::{
    AchievementKind, AchievementStatus, UnknownAchievement, recompute,
};
pub use challenge::{Answer, Challenge, ChallengeBody, Verdict};
pub use game::{GameError, GameKind, Level};
pub use ids::PlayerId;
pub use player::{ContentFilter, ParentalSettings, Player, PlayerError};
pub use progress::LevelProgress;
pub use result::{ResultError, SessionResult};
pub use tier::{LevelTiers, Tier};

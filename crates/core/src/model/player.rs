use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PlayerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("player name cannot be empty")]
    EmptyName,

    #[error("email must contain '@': {0}")]
    InvalidEmail(String),

    #[error("daily time limit must be between 1 and 1440 minutes")]
    InvalidDailyLimit,
}

/// How strictly content is filtered for this player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    #[default]
    Safe,
    Moderate,
    Open,
}

/// Parental-control knobs attached to a player profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalSettings {
    daily_limit_mins: u32,
    minutes_used_today: u32,
    notifications: bool,
    report_progress: bool,
    content_filter: ContentFilter,
}

impl ParentalSettings {
    /// Create settings with a validated daily limit.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::InvalidDailyLimit` outside 1..=1440 minutes.
    pub fn new(
        daily_limit_mins: u32,
        notifications: bool,
        report_progress: bool,
        content_filter: ContentFilter,
    ) -> Result<Self, PlayerError> {
        if daily_limit_mins == 0 || daily_limit_mins > 24 * 60 {
            return Err(PlayerError::InvalidDailyLimit);
        }
        Ok(Self {
            daily_limit_mins,
            minutes_used_today: 0,
            notifications,
            report_progress,
            content_filter,
        })
    }

    #[must_use]
    pub fn daily_limit_mins(&self) -> u32 {
        self.daily_limit_mins
    }

    #[must_use]
    pub fn minutes_used_today(&self) -> u32 {
        self.minutes_used_today
    }

    #[must_use]
    pub fn notifications(&self) -> bool {
        self.notifications
    }

    #[must_use]
    pub fn report_progress(&self) -> bool {
        self.report_progress
    }

    #[must_use]
    pub fn content_filter(&self) -> ContentFilter {
        self.content_filter
    }

    /// Minutes of play left today under the daily limit.
    #[must_use]
    pub fn remaining_mins(&self) -> u32 {
        self.daily_limit_mins.saturating_sub(self.minutes_used_today)
    }

    /// Record play time against today's allowance.
    pub fn record_play_time(&mut self, minutes: u32) {
        self.minutes_used_today = self.minutes_used_today.saturating_add(minutes);
    }

    /// Reset today's usage, e.g. at the start of a new day.
    pub fn reset_daily_usage(&mut self) {
        self.minutes_used_today = 0;
    }
}

impl Default for ParentalSettings {
    /// One hour per day, notifications and progress reports on, safe filter.
    fn default() -> Self {
        Self {
            daily_limit_mins: 60,
            minutes_used_today: 0,
            notifications: true,
            report_progress: true,
            content_filter: ContentFilter::Safe,
        }
    }
}

/// A player profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    email: String,
    avatar: String,
    total_score: u64,
    level: u32,
    streak: u32,
    joined_at: DateTime<Utc>,
    parental: ParentalSettings,
}

impl Player {
    /// Create a fresh profile with zeroed stats and default parental settings.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` for an empty name or a mail-shaped-less email.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> Result<Self, PlayerError> {
        Self::from_persisted(
            id,
            name,
            email,
            avatar,
            0,
            1,
            0,
            joined_at,
            ParentalSettings::default(),
        )
    }

    /// Rehydrate a profile from storage.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError` if name or email fail validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: PlayerId,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
        total_score: u64,
        level: u32,
        streak: u32,
        joined_at: DateTime<Utc>,
        parental: ParentalSettings,
    ) -> Result<Self, PlayerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlayerError::EmptyName);
        }
        let email = email.into();
        if !email.contains('@') {
            return Err(PlayerError::InvalidEmail(email));
        }
        Ok(Self {
            id,
            name,
            email,
            avatar: avatar.into(),
            total_score,
            level: level.max(1),
            streak,
            joined_at,
            parental,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    #[must_use]
    pub fn parental(&self) -> &ParentalSettings {
        &self.parental
    }

    #[must_use]
    pub fn parental_mut(&mut self) -> &mut ParentalSettings {
        &mut self.parental
    }

    pub fn set_parental(&mut self, settings: ParentalSettings) {
        self.parental = settings;
    }

    pub fn set_total_score(&mut self, total: u64) {
        self.total_score = total;
    }

    /// Rename the player.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::EmptyName` for a blank name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), PlayerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlayerError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_avatar(&mut self, avatar: impl Into<String>) {
        self.avatar = avatar.into();
    }
}

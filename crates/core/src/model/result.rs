use thiserror::Error;

use crate::model::{GameKind, Level};
use crate::scoring::StarThresholds;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("star rating must be between 1 and 3, got {0}")]
    InvalidStars(u8),
}

/// Terminal, immutable outcome of one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    game: GameKind,
    level: Level,
    score: u32,
    stars: u8,
    completed: bool,
    time_spent_secs: u32,
}

impl SessionResult {
    /// Rate a finished session under the given star policy.
    ///
    /// The star rating is derived here so it can never disagree with the
    /// score; `completed` is whatever the session state machine decided.
    #[must_use]
    pub fn rate(
        game: GameKind,
        level: Level,
        score: u32,
        max_score: u32,
        thresholds: &StarThresholds,
        completed: bool,
        time_spent_secs: u32,
    ) -> Self {
        let stars = thresholds.stars_for(score, max_score);
        Self::new(game, level, score, stars, completed, time_spent_secs)
    }

    fn new(
        game: GameKind,
        level: Level,
        score: u32,
        stars: u8,
        completed: bool,
        time_spent_secs: u32,
    ) -> Self {
        debug_assert!((1..=3).contains(&stars));
        Self {
            game,
            level,
            score,
            stars,
            completed,
            time_spent_secs,
        }
    }

    /// Rehydrate a result from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::InvalidStars` for a rating outside 1..=3.
    pub fn from_persisted(
        game: GameKind,
        level: Level,
        score: u32,
        stars: u8,
        completed: bool,
        time_spent_secs: u32,
    ) -> Result<Self, ResultError> {
        if !(1..=3).contains(&stars) {
            return Err(ResultError::InvalidStars(stars));
        }
        Ok(Self::new(game, level, score, stars, completed, time_spent_secs))
    }

    #[must_use]
    pub fn game(&self) -> GameKind {
        self.game
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn stars(&self) -> u8 {
        self.stars
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn time_spent_secs(&self) -> u32 {
        self.time_spent_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_stars() {
        let level = Level::new(1).unwrap();
        let err =
            SessionResult::from_persisted(GameKind::MathAdventure, level, 100, 0, true, 30)
                .unwrap_err();
        assert_eq!(err, ResultError::InvalidStars(0));
        let err =
            SessionResult::from_persisted(GameKind::MathAdventure, level, 100, 4, true, 30)
                .unwrap_err();
        assert_eq!(err, ResultError::InvalidStars(4));
    }

    #[test]
    fn accepts_valid_result() {
        let level = Level::new(3).unwrap();
        let result =
            SessionResult::from_persisted(GameKind::WordWizard, level, 400, 2, true, 75).unwrap();
        assert_eq!(result.score(), 400);
        assert_eq!(result.stars(), 2);
        assert!(result.completed());
    }
}

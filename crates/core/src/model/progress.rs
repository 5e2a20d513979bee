use crate::model::{GameKind, Level, ResultError, SessionResult};

/// Durable per-level record of a player's best run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    game: GameKind,
    level: Level,
    score: u32,
    stars: u8,
    completed: bool,
    time_spent_secs: u32,
}

impl LevelProgress {
    #[must_use]
    pub fn from_result(result: &SessionResult) -> Self {
        Self {
            game: result.game(),
            level: result.level(),
            score: result.score(),
            stars: result.stars(),
            completed: result.completed(),
            time_spent_secs: result.time_spent_secs(),
        }
    }

    /// Rehydrate a progress row from storage.
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
        Ok(Self {
            game,
            level,
            score,
            stars,
            completed,
            time_spent_secs,
        })
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

    /// Fold a newer run into this record, keeping the best of each field.
    ///
    /// Replaying a level can never lose a player's earlier score or stars;
    /// the recorded time is the fastest completed run.
    pub fn merge_best(&mut self, newer: &LevelProgress) {
        debug_assert_eq!(self.game, newer.game);
        debug_assert_eq!(self.level, newer.level);

        self.score = self.score.max(newer.score);
        self.stars = self.stars.max(newer.stars);
        if newer.completed {
            if self.completed {
                self.time_spent_secs = self.time_spent_secs.min(newer.time_spent_secs);
            } else {
                self.time_spent_secs = newer.time_spent_secs;
            }
            self.completed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32, stars: u8, completed: bool, secs: u32) -> LevelProgress {
        LevelProgress::from_persisted(
            GameKind::MathAdventure,
            Level::new(1).unwrap(),
            score,
            stars,
            completed,
            secs,
        )
        .unwrap()
    }

    #[test]
    fn merge_keeps_best_score_and_stars() {
        let mut best = entry(500, 3, true, 40);
        best.merge_best(&entry(200, 1, true, 90));
        assert_eq!(best.score(), 500);
        assert_eq!(best.stars(), 3);
        assert_eq!(best.time_spent_secs(), 40);
    }

    #[test]
    fn merge_upgrades_incomplete_run() {
        let mut record = entry(300, 2, false, 60);
        record.merge_best(&entry(250, 2, true, 80));
        assert!(record.completed());
        assert_eq!(record.score(), 300);
        assert_eq!(record.time_spent_secs(), 80);
    }

    #[test]
    fn merge_prefers_faster_completed_time() {
        let mut record = entry(400, 2, true, 100);
        record.merge_best(&entry(400, 2, true, 35));
        assert_eq!(record.time_spent_secs(), 35);
    }
}

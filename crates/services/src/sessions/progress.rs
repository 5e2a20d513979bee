use play_core::model::{GameKind, Level};

/// Read-only snapshot of a running session, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub game: GameKind,
    pub level: Level,
    pub answered: usize,
    pub total: usize,
    pub score: u32,
    pub max_score: u32,
    pub remaining_secs: u32,
    pub finished: bool,
}

impl SessionProgress {
    /// Completion as a 0..=100 percentage of challenges answered.
    #[must_use]
    pub fn percent_done(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.answered * 100 / self.total) as u32
    }
}

use std::sync::Arc;

use play_core::model::PlayerId;
use storage::repository::{PlayerRepository, ProgressRepository};

use crate::error::LeaderboardError;

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub score: u64,
    pub level: u32,
    pub streak: u32,
    pub completed_levels: u32,
}

/// Ranks players by total score.
#[derive(Clone)]
pub struct LeaderboardService {
    players: Arc<dyn PlayerRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(players: Arc<dyn PlayerRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { players, progress }
    }

    /// Top `limit` players ordered by score, then alphabetically on ties.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` for storage failures.
    pub async fn standings(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut players = self.players.list_players(limit).await?;
        players.sort_by(|a, b| {
            b.total_score()
                .cmp(&a.total_score())
                .then_with(|| a.name().cmp(b.name()))
        });

        let mut entries = Vec::with_capacity(players.len());
        for (index, player) in players.into_iter().enumerate() {
            let completed = self
                .progress
                .list_progress(player.id())
                .await?
                .iter()
                .filter(|p| p.completed())
                .count();
            entries.push(LeaderboardEntry {
                rank: index as u32 + 1,
                player_id: player.id(),
                name: player.name().to_owned(),
                avatar: player.avatar().to_owned(),
                score: player.total_score(),
                level: player.level(),
                streak: player.streak(),
                completed_levels: completed as u32,
            });
        }
        Ok(entries)
    }

    /// This player's row, `None` when outside the top `limit`.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` for storage failures.
    pub async fn standing_of(
        &self,
        player: PlayerId,
        limit: u32,
    ) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        let standings = self.standings(limit).await?;
        Ok(standings.into_iter().find(|e| e.player_id == player))
    }
}

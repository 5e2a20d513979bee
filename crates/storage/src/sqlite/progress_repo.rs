use async_trait::async_trait;
use play_core::model::{GameKind, LevelProgress, PlayerId};

use super::SqliteRepository;
use super::mapping::{progress_from_row, u64_from_i64};
use crate::repository::{ProgressRepository, StorageError};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn upsert_progress(
        &self,
        player: PlayerId,
        entry: &LevelProgress,
    ) -> Result<(), StorageError> {
        // Read-merge-write so replays keep the best fields of each run.
        let existing = sqlx::query(
            "SELECT * FROM level_progress WHERE player_id = ? AND game = ? AND level = ?;",
        )
        .bind(player.to_string())
        .bind(entry.game().to_string())
        .bind(i64::from(entry.level().value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let merged = match existing.as_ref().map(progress_from_row).transpose()? {
            Some(mut current) => {
                current.merge_best(entry);
                current
            }
            None => entry.clone(),
        };

        sqlx::query(
            "INSERT INTO level_progress
                (player_id, game, level, score, stars, completed, time_spent_secs)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(player_id, game, level) DO UPDATE SET
                score = excluded.score,
                stars = excluded.stars,
                completed = excluded.completed,
                time_spent_secs = excluded.time_spent_secs;",
        )
        .bind(player.to_string())
        .bind(merged.game().to_string())
        .bind(i64::from(merged.level().value()))
        .bind(i64::from(merged.score()))
        .bind(i64::from(merged.stars()))
        .bind(merged.completed())
        .bind(i64::from(merged.time_spent_secs()))
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn list_progress(&self, player: PlayerId) -> Result<Vec<LevelProgress>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM level_progress WHERE player_id = ? ORDER BY game ASC, level ASC;",
        )
        .bind(player.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;
        rows.iter().map(progress_from_row).collect()
    }

    async fn game_progress(
        &self,
        player: PlayerId,
        game: GameKind,
    ) -> Result<Vec<LevelProgress>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM level_progress WHERE player_id = ? AND game = ? ORDER BY level ASC;",
        )
        .bind(player.to_string())
        .bind(game.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;
        rows.iter().map(progress_from_row).collect()
    }

    async fn total_score(&self, player: PlayerId) -> Result<u64, StorageError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(score), 0) FROM level_progress WHERE player_id = ?;",
        )
        .bind(player.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;
        u64_from_i64(row.0)
    }
}

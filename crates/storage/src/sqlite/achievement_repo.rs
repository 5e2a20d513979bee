use async_trait::async_trait;
use play_core::model::{AchievementStatus, PlayerId};

use super::SqliteRepository;
use super::mapping::status_from_row;
use crate::repository::{AchievementRepository, StorageError};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl AchievementRepository for SqliteRepository {
    async fn save_statuses(
        &self,
        player: PlayerId,
        statuses: &[AchievementStatus],
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for status in statuses {
            sqlx::query(
                "INSERT INTO achievements (player_id, kind, progress, unlocked)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT(player_id, kind) DO UPDATE SET
                    progress = excluded.progress,
                    unlocked = excluded.unlocked;",
            )
            .bind(player.to_string())
            .bind(status.kind.slug())
            .bind(i64::from(status.progress))
            .bind(status.unlocked)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn load_statuses(
        &self,
        player: PlayerId,
    ) -> Result<Vec<AchievementStatus>, StorageError> {
        let rows = sqlx::query("SELECT * FROM achievements WHERE player_id = ? ORDER BY kind ASC;")
            .bind(player.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;
        rows.iter().map(status_from_row).collect()
    }
}

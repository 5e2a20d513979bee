use async_trait::async_trait;
use play_core::model::{Player, PlayerId};

use super::SqliteRepository;
use super::mapping::{i64_from_u64, parental_to_json, player_from_row};
use crate::repository::{PlayerRepository, StorageError};

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl PlayerRepository for SqliteRepository {
    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        let parental = parental_to_json(player.parental())?;
        sqlx::query(
            "INSERT INTO players
                (id, name, email, avatar, total_score, level, streak, joined_at, parental)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                avatar = excluded.avatar,
                total_score = excluded.total_score,
                level = excluded.level,
                streak = excluded.streak,
                parental = excluded.parental;",
        )
        .bind(player.id().to_string())
        .bind(player.name())
        .bind(player.email())
        .bind(player.avatar())
        .bind(i64_from_u64(player.total_score())?)
        .bind(i64::from(player.level()))
        .bind(i64::from(player.streak()))
        .bind(player.joined_at())
        .bind(parental)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StorageError::Conflict,
            other => conn(other),
        })?;
        Ok(())
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        let row = sqlx::query("SELECT * FROM players WHERE id = ?;")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        row.as_ref().map(player_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StorageError> {
        let row = sqlx::query("SELECT * FROM players WHERE email = ? COLLATE NOCASE;")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        row.as_ref().map(player_from_row).transpose()
    }

    async fn list_players(&self, limit: u32) -> Result<Vec<Player>, StorageError> {
        let rows = sqlx::query("SELECT * FROM players ORDER BY total_score DESC, name ASC LIMIT ?;")
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;
        rows.iter().map(player_from_row).collect()
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError> {
        let outcome = sqlx::query("DELETE FROM players WHERE id = ?;")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        if outcome.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

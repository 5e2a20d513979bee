//! Conversions between `SQLite` column values and domain types.

use chrono::{DateTime, Utc};
use play_core::model::{
    AchievementKind, AchievementStatus, GameKind, Level, LevelProgress, ParentalSettings, Player,
    PlayerId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(super) fn ser<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(super) fn player_id(text: &str) -> Result<PlayerId, StorageError> {
    text.parse().map_err(ser)
}

pub(super) fn game_kind(text: &str) -> Result<GameKind, StorageError> {
    text.parse().map_err(ser)
}

pub(super) fn level_from_i64(raw: i64) -> Result<Level, StorageError> {
    let value = u32::try_from(raw).map_err(ser)?;
    Level::new(value).map_err(ser)
}

pub(super) fn u32_from_i64(raw: i64) -> Result<u32, StorageError> {
    u32::try_from(raw).map_err(ser)
}

pub(super) fn u64_from_i64(raw: i64) -> Result<u64, StorageError> {
    u64::try_from(raw).map_err(ser)
}

pub(super) fn stars_from_i64(raw: i64) -> Result<u8, StorageError> {
    u8::try_from(raw).map_err(ser)
}

pub(super) fn i64_from_u64(value: u64) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(ser)
}

pub(super) fn parental_to_json(settings: &ParentalSettings) -> Result<String, StorageError> {
    serde_json::to_string(settings).map_err(ser)
}

pub(super) fn parental_from_json(raw: &str) -> Result<ParentalSettings, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(super) fn player_from_row(row: &SqliteRow) -> Result<Player, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let name: String = row.try_get("name").map_err(ser)?;
    let email: String = row.try_get("email").map_err(ser)?;
    let avatar: String = row.try_get("avatar").map_err(ser)?;
    let total_score: i64 = row.try_get("total_score").map_err(ser)?;
    let level: i64 = row.try_get("level").map_err(ser)?;
    let streak: i64 = row.try_get("streak").map_err(ser)?;
    let joined_at: DateTime<Utc> = row.try_get("joined_at").map_err(ser)?;
    let parental: String = row.try_get("parental").map_err(ser)?;

    Player::from_persisted(
        player_id(&id)?,
        name,
        email,
        avatar,
        u64_from_i64(total_score)?,
        u32_from_i64(level)?,
        u32_from_i64(streak)?,
        joined_at,
        parental_from_json(&parental)?,
    )
    .map_err(ser)
}

pub(super) fn progress_from_row(row: &SqliteRow) -> Result<LevelProgress, StorageError> {
    let game: String = row.try_get("game").map_err(ser)?;
    let level: i64 = row.try_get("level").map_err(ser)?;
    let score: i64 = row.try_get("score").map_err(ser)?;
    let stars: i64 = row.try_get("stars").map_err(ser)?;
    let completed: bool = row.try_get("completed").map_err(ser)?;
    let time_spent_secs: i64 = row.try_get("time_spent_secs").map_err(ser)?;

    LevelProgress::from_persisted(
        game_kind(&game)?,
        level_from_i64(level)?,
        u32_from_i64(score)?,
        stars_from_i64(stars)?,
        completed,
        u32_from_i64(time_spent_secs)?,
    )
    .map_err(ser)
}

pub(super) fn status_from_row(row: &SqliteRow) -> Result<AchievementStatus, StorageError> {
    let kind: String = row.try_get("kind").map_err(ser)?;
    let progress: i64 = row.try_get("progress").map_err(ser)?;
    let unlocked: bool = row.try_get("unlocked").map_err(ser)?;

    let kind: AchievementKind = kind.parse().map_err(ser)?;
    Ok(AchievementStatus {
        kind,
        progress: u32_from_i64(progress)?,
        unlocked,
    })
}

use sqlx::SqlitePool;

use super::SqliteInitError;

pub(super) async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS players (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            avatar      TEXT NOT NULL,
            total_score INTEGER NOT NULL DEFAULT 0,
            level       INTEGER NOT NULL DEFAULT 1,
            streak      INTEGER NOT NULL DEFAULT 0,
            joined_at   TEXT NOT NULL,
            parental    TEXT NOT NULL
        );",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS level_progress (
            player_id       TEXT NOT NULL,
            game            TEXT NOT NULL,
            level           INTEGER NOT NULL,
            score           INTEGER NOT NULL,
            stars           INTEGER NOT NULL,
            completed       INTEGER NOT NULL,
            time_spent_secs INTEGER NOT NULL,
            PRIMARY KEY (player_id, game, level),
            FOREIGN KEY (player_id) REFERENCES players(id) ON DELETE CASCADE
        );",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS achievements (
            player_id TEXT NOT NULL,
            kind      TEXT NOT NULL,
            progress  INTEGER NOT NULL,
            unlocked  INTEGER NOT NULL,
            PRIMARY KEY (player_id, kind),
            FOREIGN KEY (player_id) REFERENCES players(id) ON DELETE CASCADE
        );",
    )
    .execute(pool)
    .await?;

    Ok(())
}

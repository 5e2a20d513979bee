use async_trait::async_trait;
use play_core::model::{AchievementStatus, GameKind, LevelProgress, Player, PlayerId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for player profiles.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Persist or update a player profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError>;

    /// Fetch a player by id, `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError>;

    /// Look a player up by email, `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StorageError>;

    /// List up to `limit` players.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn list_players(&self, limit: u32) -> Result<Vec<Player>, StorageError>;

    /// Delete a player and their progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the player does not exist.
    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError>;
}

/// Repository contract for per-level progress records.
///
/// Upserts keep the best run per `(player, game, level)` via
/// `LevelProgress::merge_best`, so replaying a level never loses progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Record a finished run, merged into any existing record for the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(
        &self,
        player: PlayerId,
        entry: &LevelProgress,
    ) -> Result<(), StorageError>;

    /// All progress records for a player.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn list_progress(&self, player: PlayerId) -> Result<Vec<LevelProgress>, StorageError>;

    /// Progress records for one game, ordered by level.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn game_progress(
        &self,
        player: PlayerId,
        game: GameKind,
    ) -> Result<Vec<LevelProgress>, StorageError>;

    /// Sum of best scores across every recorded level.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn total_score(&self, player: PlayerId) -> Result<u64, StorageError>;
}

/// Repository contract for achievement unlock state.
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Replace the stored statuses for a player.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the statuses cannot be stored.
    async fn save_statuses(
        &self,
        player: PlayerId,
        statuses: &[AchievementStatus],
    ) -> Result<(), StorageError>;

    /// Load stored statuses; empty for a player with no history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn load_statuses(&self, player: PlayerId)
    -> Result<Vec<AchievementStatus>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    players: Arc<Mutex<HashMap<PlayerId, Player>>>,
    progress: Arc<Mutex<HashMap<(PlayerId, GameKind, u32), LevelProgress>>>,
    achievements: Arc<Mutex<HashMap<PlayerId, Vec<AchievementStatus>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn upsert_player(&self, player: &Player) -> Result<(), StorageError> {
        let mut guard = self.players.lock().map_err(poisoned)?;
        guard.insert(player.id(), player.clone());
        Ok(())
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        let guard = self.players.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Player>, StorageError> {
        let guard = self.players.lock().map_err(poisoned)?;
        Ok(guard
            .values()
            .find(|p| p.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_players(&self, limit: u32) -> Result<Vec<Player>, StorageError> {
        let guard = self.players.lock().map_err(poisoned)?;
        let mut players: Vec<Player> = guard.values().cloned().collect();
        players.sort_by(|a, b| {
            b.total_score()
                .cmp(&a.total_score())
                .then_with(|| a.name().cmp(b.name()))
        });
        players.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(players)
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), StorageError> {
        let mut guard = self.players.lock().map_err(poisoned)?;
        guard.remove(&id).ok_or(StorageError::NotFound)?;
        drop(guard);
        let mut progress = self.progress.lock().map_err(poisoned)?;
        progress.retain(|(player, _, _), _| *player != id);
        drop(progress);
        let mut achievements = self.achievements.lock().map_err(poisoned)?;
        achievements.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn upsert_progress(
        &self,
        player: PlayerId,
        entry: &LevelProgress,
    ) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(poisoned)?;
        let key = (player, entry.game(), entry.level().value());
        match guard.get_mut(&key) {
            Some(existing) => existing.merge_best(entry),
            None => {
                guard.insert(key, entry.clone());
            }
        }
        Ok(())
    }

    async fn list_progress(&self, player: PlayerId) -> Result<Vec<LevelProgress>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        let mut entries: Vec<LevelProgress> = guard
            .iter()
            .filter(|((owner, _, _), _)| *owner == player)
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by_key(|e| (e.game().slug(), e.level().value()));
        Ok(entries)
    }

    async fn game_progress(
        &self,
        player: PlayerId,
        game: GameKind,
    ) -> Result<Vec<LevelProgress>, StorageError> {
        let entries = self.list_progress(player).await?;
        Ok(entries.into_iter().filter(|e| e.game() == game).collect())
    }

    async fn total_score(&self, player: PlayerId) -> Result<u64, StorageError> {
        let entries = self.list_progress(player).await?;
        Ok(entries.iter().map(|e| u64::from(e.score())).sum())
    }
}

#[async_trait]
impl AchievementRepository for InMemoryRepository {
    async fn save_statuses(
        &self,
        player: PlayerId,
        statuses: &[AchievementStatus],
    ) -> Result<(), StorageError> {
        let mut guard = self.achievements.lock().map_err(poisoned)?;
        guard.insert(player, statuses.to_vec());
        Ok(())
    }

    async fn load_statuses(
        &self,
        player: PlayerId,
    ) -> Result<Vec<AchievementStatus>, StorageError> {
        let guard = self.achievements.lock().map_err(poisoned)?;
        Ok(guard.get(&player).cloned().unwrap_or_default())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub players: Arc<dyn PlayerRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let players: Arc<dyn PlayerRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let achievements: Arc<dyn AchievementRepository> = Arc::new(repo);
        Self {
            players,
            progress,
            achievements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::Level;
    use play_core::time::fixed_now;

    fn build_player(name: &str) -> Player {
        Player::new(
            PlayerId::random(),
            name,
            format!("{}@example.com", name.to_lowercase()),
            "🌟",
            fixed_now(),
        )
        .unwrap()
    }

    fn entry(game: GameKind, level: u32, score: u32, stars: u8) -> LevelProgress {
        LevelProgress::from_persisted(game, Level::new(level).unwrap(), score, stars, true, 60)
            .unwrap()
    }

    #[tokio::test]
    async fn round_trips_player() {
        let repo = InMemoryRepository::new();
        let player = build_player("Mina");
        repo.upsert_player(&player).await.unwrap();

        let fetched = repo.get_player(player.id()).await.unwrap().unwrap();
        assert_eq!(fetched, player);
        let by_email = repo.find_by_email("MINA@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id(), player.id());
    }

    #[tokio::test]
    async fn upsert_progress_keeps_best_run() {
        let repo = InMemoryRepository::new();
        let player = build_player("Theo");
        repo.upsert_player(&player).await.unwrap();

        repo.upsert_progress(player.id(), &entry(GameKind::MathAdventure, 1, 500, 3))
            .await
            .unwrap();
        repo.upsert_progress(player.id(), &entry(GameKind::MathAdventure, 1, 200, 1))
            .await
            .unwrap();
        repo.upsert_progress(player.id(), &entry(GameKind::WordWizard, 2, 240, 2))
            .await
            .unwrap();

        let all = repo.list_progress(player.id()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(repo.total_score(player.id()).await.unwrap(), 740);

        let math = repo
            .game_progress(player.id(), GameKind::MathAdventure)
            .await
            .unwrap();
        assert_eq!(math.len(), 1);
        assert_eq!(math[0].score(), 500);
        assert_eq!(math[0].stars(), 3);
    }

    #[tokio::test]
    async fn delete_player_removes_progress() {
        let repo = InMemoryRepository::new();
        let player = build_player("Iris");
        repo.upsert_player(&player).await.unwrap();
        repo.upsert_progress(player.id(), &entry(GameKind::ScienceLab, 1, 300, 2))
            .await
            .unwrap();

        repo.delete_player(player.id()).await.unwrap();
        assert!(repo.get_player(player.id()).await.unwrap().is_none());
        assert!(repo.list_progress(player.id()).await.unwrap().is_empty());
        assert!(matches!(
            repo.delete_player(player.id()).await,
            Err(StorageError::NotFound)
        ));
    }
}

use play_core::model::{
    AchievementKind, AchievementStatus, GameKind, Level, LevelProgress, Player, PlayerId,
};
use play_core::time::fixed_now;
use storage::repository::{Storage, StorageError};

// Shared-cache memory databases so every pooled connection sees the same
// tables; a distinct name per test keeps them isolated.
async fn storage(db_name: &str) -> Storage {
    let url = format!("sqlite:file:{db_name}?mode=memory&cache=shared");
    Storage::sqlite(&url).await.expect("in-memory sqlite")
}

fn sample_player(name: &str, email: &str) -> Player {
    Player::new(PlayerId::random(), name, email, "🌟", fixed_now()).unwrap()
}

fn progress_entry(game: GameKind, level: u32, score: u32, stars: u8, secs: u32) -> LevelProgress {
    LevelProgress::from_persisted(game, Level::new(level).unwrap(), score, stars, true, secs)
        .unwrap()
}

#[tokio::test]
async fn player_round_trip() {
    let storage = storage("memdb_player_round_trip").await;
    let player = sample_player("Mina", "mina@example.com");

    storage.players.upsert_player(&player).await.unwrap();
    let loaded = storage.players.get_player(player.id()).await.unwrap();
    assert_eq!(loaded, Some(player.clone()));

    let by_email = storage
        .players
        .find_by_email("mina@example.com")
        .await
        .unwrap();
    assert_eq!(by_email, Some(player));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let storage = storage("memdb_duplicate_email_is_a_conflict").await;
    storage
        .players
        .upsert_player(&sample_player("Mina", "taken@example.com"))
        .await
        .unwrap();
    let err = storage
        .players
        .upsert_player(&sample_player("Ira", "taken@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn upsert_updates_existing_player() {
    let storage = storage("memdb_upsert_updates_existing_player").await;
    let mut player = sample_player("Mina", "mina@example.com");
    storage.players.upsert_player(&player).await.unwrap();

    player.set_total_score(640);
    player.set_avatar("🦊");
    storage.players.upsert_player(&player).await.unwrap();

    let loaded = storage
        .players
        .get_player(player.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.total_score(), 640);
    assert_eq!(loaded.avatar(), "🦊");
}

#[tokio::test]
async fn progress_upsert_keeps_best_run() {
    let storage = storage("memdb_progress_upsert_keeps_best_run").await;
    let player = sample_player("Mina", "mina@example.com");
    storage.players.upsert_player(&player).await.unwrap();

    let first = progress_entry(GameKind::MathAdventure, 1, 500, 3, 40);
    let worse = progress_entry(GameKind::MathAdventure, 1, 200, 1, 90);
    storage
        .progress
        .upsert_progress(player.id(), &first)
        .await
        .unwrap();
    storage
        .progress
        .upsert_progress(player.id(), &worse)
        .await
        .unwrap();

    let rows = storage.progress.list_progress(player.id()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].score(), 500);
    assert_eq!(rows[0].stars(), 3);
    assert_eq!(rows[0].time_spent_secs(), 40);

    assert_eq!(storage.progress.total_score(player.id()).await.unwrap(), 500);
}

#[tokio::test]
async fn game_progress_is_ordered_by_level() {
    let storage = storage("memdb_game_progress_is_ordered_by_level").await;
    let player = sample_player("Mina", "mina@example.com");
    storage.players.upsert_player(&player).await.unwrap();

    for level in [3, 1, 2] {
        let entry = progress_entry(GameKind::WordWizard, level, 100 * level, 2, 60);
        storage
            .progress
            .upsert_progress(player.id(), &entry)
            .await
            .unwrap();
    }
    let entry = progress_entry(GameKind::ScienceLab, 1, 150, 2, 50);
    storage
        .progress
        .upsert_progress(player.id(), &entry)
        .await
        .unwrap();

    let rows = storage
        .progress
        .game_progress(player.id(), GameKind::WordWizard)
        .await
        .unwrap();
    let levels: Vec<u32> = rows.iter().map(|p| p.level().value()).collect();
    assert_eq!(levels, vec![1, 2, 3]);
}

#[tokio::test]
async fn achievements_round_trip() {
    let storage = storage("memdb_achievements_round_trip").await;
    let player = sample_player("Mina", "mina@example.com");
    storage.players.upsert_player(&player).await.unwrap();

    let statuses = vec![
        AchievementStatus {
            kind: AchievementKind::FirstSteps,
            progress: 1,
            unlocked: true,
        },
        AchievementStatus {
            kind: AchievementKind::Perfectionist,
            progress: 4,
            unlocked: false,
        },
    ];
    storage
        .achievements
        .save_statuses(player.id(), &statuses)
        .await
        .unwrap();

    let mut loaded = storage
        .achievements
        .load_statuses(player.id())
        .await
        .unwrap();
    loaded.sort_by_key(|s| s.kind.slug());
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().any(|s| s.kind == AchievementKind::FirstSteps && s.unlocked));
    assert!(loaded.iter().any(|s| s.kind == AchievementKind::Perfectionist && s.progress == 4));
}

#[tokio::test]
async fn deleting_a_player_cascades() {
    let storage = storage("memdb_deleting_a_player_cascades").await;
    let player = sample_player("Mina", "mina@example.com");
    storage.players.upsert_player(&player).await.unwrap();

    let entry = progress_entry(GameKind::MemoryPalace, 1, 300, 2, 70);
    storage
        .progress
        .upsert_progress(player.id(), &entry)
        .await
        .unwrap();

    storage.players.delete_player(player.id()).await.unwrap();
    assert!(storage.players.get_player(player.id()).await.unwrap().is_none());
    assert!(storage.progress.list_progress(player.id()).await.unwrap().is_empty());

    let err = storage.players.delete_player(player.id()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

use std::sync::Arc;

use play_core::model::{
    GameKind, Level, LevelProgress, PlayerId, SessionResult, recompute,
};
use storage::repository::{AchievementRepository, PlayerRepository, ProgressRepository};

use crate::error::SessionError;

use super::engine::{GameSession, SessionConfig};

/// Starts sessions and persists finished results.
///
/// Reporting is exactly-once per session: the progress upsert, the player's
/// total score, and the achievement recompute happen together, and a storage
/// failure leaves the session unreported so the caller can retry.
#[derive(Clone)]
pub struct SessionRunner {
    players: Arc<dyn PlayerRepository>,
    progress: Arc<dyn ProgressRepository>,
    achievements: Arc<dyn AchievementRepository>,
}

impl SessionRunner {
    #[must_use]
    pub fn new(
        players: Arc<dyn PlayerRepository>,
        progress: Arc<dyn ProgressRepository>,
        achievements: Arc<dyn AchievementRepository>,
    ) -> Self {
        Self {
            players,
            progress,
            achievements,
        }
    }

    /// Start a fresh session for one level of one game.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no challenges can be generated.
    pub fn start_session(
        &self,
        game: GameKind,
        level: Level,
        config: SessionConfig,
    ) -> Result<GameSession, SessionError> {
        GameSession::new(game, level, config)
    }

    /// Persist a finished session for `player`.
    ///
    /// Returns the recorded result, or `None` when the session was already
    /// reported or has not finished yet.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on persistence failure; the session
    /// stays unreported and the call can be retried.
    pub async fn record_result(
        &self,
        player: PlayerId,
        session: &mut GameSession,
    ) -> Result<Option<SessionResult>, SessionError> {
        if session.is_reported() {
            return Ok(None);
        }
        let Some(result) = session.result().cloned() else {
            return Ok(None);
        };

        let entry = LevelProgress::from_result(&result);
        self.progress.upsert_progress(player, &entry).await?;

        // Keep the profile's headline score in sync with the best-run sum.
        let total = self.progress.total_score(player).await?;
        if let Some(mut profile) = self.players.get_player(player).await? {
            profile.set_total_score(total);
            self.players.upsert_player(&profile).await?;
        }

        let all_progress = self.progress.list_progress(player).await?;
        let previous = self.achievements.load_statuses(player).await?;
        let statuses = recompute(&all_progress, &previous);
        self.achievements.save_statuses(player, &statuses).await?;

        session.mark_reported();
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use play_core::model::{AchievementKind, Answer, ChallengeBody, Player};
    use storage::repository::Storage;

    fn runner(storage: &Storage) -> SessionRunner {
        SessionRunner::new(
            storage.players.clone(),
            storage.progress.clone(),
            storage.achievements.clone(),
        )
    }

    async fn seeded_player(storage: &Storage) -> PlayerId {
        let joined = Utc.timestamp_opt(1_720_000_000, 0).unwrap();
        let player =
            Player::new(PlayerId::random(), "Mina", "mina@example.com", "🌟", joined).unwrap();
        storage.players.upsert_player(&player).await.unwrap();
        player.id()
    }

    fn play_to_completion(session: &mut GameSession) {
        while let Some(challenge) = session.current_challenge() {
            let answer = match challenge.body() {
                ChallengeBody::MultipleChoice { correct, .. } => Answer::Choice(*correct),
                ChallengeBody::FreeText { answer, .. } => Answer::Text(answer.clone()),
                ChallengeBody::MemoryPair { symbol } => Answer::PairFound {
                    symbol: symbol.clone(),
                    moves: 2,
                },
                ChallengeBody::Freeform { .. } => Answer::Drawing { strokes: 3 },
            };
            let index = session.progress().answered;
            session.submit_answer(index, &answer).unwrap();
        }
    }

    #[tokio::test]
    async fn recording_updates_progress_total_and_achievements() {
        let storage = Storage::in_memory();
        let runner = runner(&storage);
        let player = seeded_player(&storage).await;

        let mut session = runner
            .start_session(
                GameKind::MathAdventure,
                Level::new(1).unwrap(),
                SessionConfig::seeded(7),
            )
            .unwrap();
        play_to_completion(&mut session);

        let recorded = runner.record_result(player, &mut session).await.unwrap();
        let result = recorded.expect("first report returns the result");
        assert!(result.completed());

        let rows = storage.progress.list_progress(player).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score(), result.score());

        let profile = storage.players.get_player(player).await.unwrap().unwrap();
        assert_eq!(profile.total_score(), u64::from(result.score()));

        let statuses = storage.achievements.load_statuses(player).await.unwrap();
        assert!(
            statuses
                .iter()
                .any(|s| s.kind == AchievementKind::FirstSteps && s.unlocked)
        );
    }

    #[tokio::test]
    async fn results_are_reported_exactly_once() {
        let storage = Storage::in_memory();
        let runner = runner(&storage);
        let player = seeded_player(&storage).await;

        let mut session = runner
            .start_session(
                GameKind::MemoryPalace,
                Level::new(1).unwrap(),
                SessionConfig::seeded(3),
            )
            .unwrap();
        play_to_completion(&mut session);

        assert!(
            runner
                .record_result(player, &mut session)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            runner
                .record_result(player, &mut session)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn unfinished_sessions_are_not_recorded() {
        let storage = Storage::in_memory();
        let runner = runner(&storage);
        let player = seeded_player(&storage).await;

        let mut session = runner
            .start_session(
                GameKind::WordWizard,
                Level::new(1).unwrap(),
                SessionConfig::seeded(1),
            )
            .unwrap();
        assert!(
            runner
                .record_result(player, &mut session)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .progress
                .list_progress(player)
                .await
                .unwrap()
                .is_empty()
        );
    }
}

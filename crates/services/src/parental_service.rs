use std::sync::Arc;

use play_core::model::{ParentalSettings, PlayerId};
use storage::repository::PlayerRepository;

use crate::error::ParentalError;

/// Whether more play is allowed under today's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaytimeAllowance {
    Allowed { remaining_mins: u32 },
    Exhausted,
}

/// Reads and updates the parental controls stored on a profile.
#[derive(Clone)]
pub struct ParentalService {
    players: Arc<dyn PlayerRepository>,
}

impl ParentalService {
    #[must_use]
    pub fn new(players: Arc<dyn PlayerRepository>) -> Self {
        Self { players }
    }

    /// # Errors
    ///
    /// Returns `ParentalError::UnknownPlayer` for a missing profile.
    pub async fn settings(&self, player: PlayerId) -> Result<ParentalSettings, ParentalError> {
        let profile = self
            .players
            .get_player(player)
            .await?
            .ok_or(ParentalError::UnknownPlayer)?;
        Ok(profile.parental().clone())
    }

    /// Replace the stored settings.
    ///
    /// # Errors
    ///
    /// Returns `ParentalError::UnknownPlayer` for a missing profile.
    pub async fn update_settings(
        &self,
        player: PlayerId,
        settings: ParentalSettings,
    ) -> Result<(), ParentalError> {
        let mut profile = self
            .players
            .get_player(player)
            .await?
            .ok_or(ParentalError::UnknownPlayer)?;
        profile.set_parental(settings);
        self.players.upsert_player(&profile).await?;
        Ok(())
    }

    /// Charge played minutes against today's allowance.
    ///
    /// # Errors
    ///
    /// Returns `ParentalError::UnknownPlayer` for a missing profile.
    pub async fn record_play_time(
        &self,
        player: PlayerId,
        minutes: u32,
    ) -> Result<PlaytimeAllowance, ParentalError> {
        let mut profile = self
            .players
            .get_player(player)
            .await?
            .ok_or(ParentalError::UnknownPlayer)?;
        profile.parental_mut().record_play_time(minutes);
        self.players.upsert_player(&profile).await?;
        Ok(Self::allowance_of(profile.parental()))
    }

    /// Reset today's usage counter.
    ///
    /// # Errors
    ///
    /// Returns `ParentalError::UnknownPlayer` for a missing profile.
    pub async fn reset_daily_usage(&self, player: PlayerId) -> Result<(), ParentalError> {
        let mut profile = self
            .players
            .get_player(player)
            .await?
            .ok_or(ParentalError::UnknownPlayer)?;
        profile.parental_mut().reset_daily_usage();
        self.players.upsert_player(&profile).await?;
        Ok(())
    }

    /// Current allowance without charging any time.
    ///
    /// # Errors
    ///
    /// Returns `ParentalError::UnknownPlayer` for a missing profile.
    pub async fn allowance(&self, player: PlayerId) -> Result<PlaytimeAllowance, ParentalError> {
        let settings = self.settings(player).await?;
        Ok(Self::allowance_of(&settings))
    }

    fn allowance_of(settings: &ParentalSettings) -> PlaytimeAllowance {
        let remaining = settings.remaining_mins();
        if remaining == 0 {
            PlaytimeAllowance::Exhausted
        } else {
            PlaytimeAllowance::Allowed {
                remaining_mins: remaining,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::{ContentFilter, Player};
    use play_core::time::fixed_now;
    use storage::repository::Storage;

    async fn seeded(storage: &Storage) -> PlayerId {
        let player =
            Player::new(PlayerId::random(), "Mina", "mina@example.com", "🌟", fixed_now()).unwrap();
        storage.players.upsert_player(&player).await.unwrap();
        player.id()
    }

    #[tokio::test]
    async fn playtime_counts_down_to_exhausted() {
        let storage = Storage::in_memory();
        let service = ParentalService::new(storage.players.clone());
        let player = seeded(&storage).await;

        // Default limit is 60 minutes.
        let allowance = service.record_play_time(player, 45).await.unwrap();
        assert_eq!(
            allowance,
            PlaytimeAllowance::Allowed { remaining_mins: 15 }
        );
        let allowance = service.record_play_time(player, 30).await.unwrap();
        assert_eq!(allowance, PlaytimeAllowance::Exhausted);

        service.reset_daily_usage(player).await.unwrap();
        assert_eq!(
            service.allowance(player).await.unwrap(),
            PlaytimeAllowance::Allowed { remaining_mins: 60 }
        );
    }

    #[tokio::test]
    async fn settings_survive_an_update() {
        let storage = Storage::in_memory();
        let service = ParentalService::new(storage.players.clone());
        let player = seeded(&storage).await;

        let settings = ParentalSettings::new(90, false, true, ContentFilter::Moderate).unwrap();
        service
            .update_settings(player, settings.clone())
            .await
            .unwrap();
        assert_eq!(service.settings(player).await.unwrap(), settings);
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let storage = Storage::in_memory();
        let service = ParentalService::new(storage.players.clone());
        let err = service.settings(PlayerId::random()).await.unwrap_err();
        assert!(matches!(err, ParentalError::UnknownPlayer));
    }
}

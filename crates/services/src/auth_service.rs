use std::sync::Arc;
use std::time::Duration;

use play_core::Clock;
use play_core::model::{ParentalSettings, Player, PlayerId};
use storage::repository::PlayerRepository;

use crate::error::AuthError;

/// Delay added to auth calls so the flow feels like a round trip.
const SIMULATED_DELAY: Duration = Duration::from_secs(1);

/// Local sign-in and registration against the player repository.
///
/// There is no real credential check: signing in with an unknown email
/// provisions a demo profile on the spot, the way a first-run experience
/// would.
#[derive(Clone)]
pub struct AuthService {
    players: Arc<dyn PlayerRepository>,
    clock: Clock,
    delay: Duration,
}

impl AuthService {
    #[must_use]
    pub fn new(players: Arc<dyn PlayerRepository>, clock: Clock) -> Self {
        Self {
            players,
            clock,
            delay: SIMULATED_DELAY,
        }
    }

    /// Override the simulated network delay; zero for tests.
    #[must_use]
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sign in by email.
    ///
    /// A known email returns the stored profile. An unknown one creates a
    /// demo profile with a head start of points and streak. The password is
    /// only checked for presence; there is no real credential store.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for a blank password, invalid profile fields, or
    /// storage failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<Player, AuthError> {
        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        self.pause().await;
        if let Some(player) = self.players.find_by_email(email).await? {
            return Ok(player);
        }

        let name = email.split('@').next().unwrap_or(email);
        let player = Player::from_persisted(
            PlayerId::random(),
            name,
            email,
            "🦄",
            1250,
            5,
            7,
            self.clock.now(),
            ParentalSettings::default(),
        )?;
        self.players.upsert_player(&player).await?;
        Ok(player)
    }

    /// Create a fresh account with zeroed stats.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` when the email is already registered,
    /// and `AuthError::Player` for invalid name or email.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Player, AuthError> {
        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        self.pause().await;
        if self.players.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken(email.to_owned()));
        }
        let player = Player::new(PlayerId::random(), name, email, "🌟", self.clock.now())?;
        self.players.upsert_player(&player).await?;
        Ok(player)
    }

    /// Change the display name and avatar on a stored profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnknownPlayer` for a missing profile and
    /// `AuthError::Player` for an invalid name.
    pub async fn update_profile(
        &self,
        player: PlayerId,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Player, AuthError> {
        let mut profile = self
            .players
            .get_player(player)
            .await?
            .ok_or(AuthError::UnknownPlayer)?;
        if let Some(name) = name {
            profile.rename(name)?;
        }
        if let Some(avatar) = avatar {
            profile.set_avatar(avatar);
        }
        self.players.upsert_player(&profile).await?;
        Ok(profile)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::time::fixed_clock;
    use storage::repository::Storage;

    fn auth(storage: &Storage) -> AuthService {
        AuthService::new(storage.players.clone(), fixed_clock())
            .with_simulated_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn login_provisions_a_demo_profile() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let player = auth.login("zoe@example.com", "hunter2").await.unwrap();
        assert_eq!(player.name(), "zoe");
        assert_eq!(player.avatar(), "🦄");
        assert_eq!(player.total_score(), 1250);
        assert_eq!(player.level(), 5);
        assert_eq!(player.streak(), 7);

        // Logging in again returns the same stored profile.
        let again = auth.login("zoe@example.com", "hunter2").await.unwrap();
        assert_eq!(again.id(), player.id());
    }

    #[tokio::test]
    async fn register_starts_zeroed_and_rejects_duplicates() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);

        let player = auth.register("Mina", "mina@example.com", "hunter2").await.unwrap();
        assert_eq!(player.total_score(), 0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.avatar(), "🌟");

        let err = auth.register("Other", "mina@example.com", "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn blank_password_is_rejected() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);
        let err = auth.login("zoe@example.com", "  ").await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyPassword));
    }

    #[tokio::test]
    async fn profile_updates_persist() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);
        let player = auth
            .register("Mina", "mina@example.com", "hunter2")
            .await
            .unwrap();

        let updated = auth
            .update_profile(player.id(), Some("Minerva"), Some("🦉"))
            .await
            .unwrap();
        assert_eq!(updated.name(), "Minerva");
        assert_eq!(updated.avatar(), "🦉");

        let stored = storage
            .players
            .get_player(player.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name(), "Minerva");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let storage = Storage::in_memory();
        let auth = auth(&storage);
        let err = auth.register("Mina", "not-an-email", "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::Player(_)));
    }
}

use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::parental_service::ParentalService;
use crate::sessions::SessionRunner;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    auth: Arc<AuthService>,
    parental: Arc<ParentalService>,
    leaderboard: Arc<LeaderboardService>,
    sessions: Arc<SessionRunner>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, clock))
    }

    /// Build services over in-memory storage, for tests and demos.
    #[must_use]
    pub fn new_in_memory(clock: Clock) -> Self {
        Self::with_storage(Storage::in_memory(), clock)
    }

    fn with_storage(storage: Storage, clock: Clock) -> Self {
        let auth = Arc::new(AuthService::new(Arc::clone(&storage.players), clock));
        let parental = Arc::new(ParentalService::new(Arc::clone(&storage.players)));
        let leaderboard = Arc::new(LeaderboardService::new(
            Arc::clone(&storage.players),
            Arc::clone(&storage.progress),
        ));
        let sessions = Arc::new(SessionRunner::new(
            Arc::clone(&storage.players),
            Arc::clone(&storage.progress),
            Arc::clone(&storage.achievements),
        ));
        Self {
            storage,
            auth,
            parental,
            leaderboard,
            sessions,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub fn parental(&self) -> &ParentalService {
        &self.parental
    }

    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRunner {
        &self.sessions
    }
}

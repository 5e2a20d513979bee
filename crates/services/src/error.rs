//! Shared error types for the services crate.

use thiserror::Error;

use play_core::model::{GameError, PlayerError, ResultError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the session engine and runner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no challenges available for this level")]
    Empty,
    #[error("session already finished")]
    Completed,
    #[error("answer targets challenge {submitted} but challenge {current} is active")]
    StaleChallenge { submitted: usize, current: usize },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("an account already exists for {0}")]
    EmailTaken(String),
    #[error("password cannot be empty")]
    EmptyPassword,
    #[error("player not found")]
    UnknownPlayer,
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ParentalService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParentalError {
    #[error("player not found")]
    UnknownPlayer,
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

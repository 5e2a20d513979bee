use thiserror::Error;

use crate::model::{GameError, PlayerError, ResultError};

/// Top-level error for the domain crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Result(#[from] ResultError),
}

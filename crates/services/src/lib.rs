#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod banks;
pub mod error;
pub mod leaderboard_service;
pub mod parental_service;
pub mod sessions;

pub use play_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use banks::{ChallengeBank, bank_for};
pub use error::{
    AppServicesError, AuthError, LeaderboardError, ParentalError, SessionError,
};
pub use leaderboard_service::{LeaderboardEntry, LeaderboardService};
pub use parental_service::{ParentalService, PlaytimeAllowance};
pub use sessions::{GameSession, SessionConfig, SessionProgress, SessionRunner, SubmitOutcome};

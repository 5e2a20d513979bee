//! The level session engine: timed play of one level of one game, and the
//! runner that persists the outcome.

mod engine;
mod progress;
mod runner;

pub use engine::{GameSession, SessionConfig, SubmitOutcome};
pub use progress::SessionProgress;
pub use runner::SessionRunner;

//! Challenge generation, one bank per mini-game.
//!
//! Banks are deterministic given an RNG, so a seeded session replays the
//! exact same challenges.

use play_core::model::{Challenge, GameKind, Level};
use rand::RngCore;
use rand::seq::SliceRandom;

mod drawing;
mod math;
mod memory;
mod patterns;
mod trivia;
mod words;

pub use drawing::DrawingBank;
pub use math::MathBank;
pub use memory::MemoryBank;
pub use patterns::PatternBank;
pub use trivia::TriviaBank;
pub use words::WordBank;

/// Generates the challenge list for one level of one game.
pub trait ChallengeBank: Send + Sync {
    fn game(&self) -> GameKind;

    /// Build the full challenge list for `level`.
    ///
    /// Never returns an empty list for a valid level.
    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge>;
}

/// The bank serving a given game.
#[must_use]
pub fn bank_for(game: GameKind) -> Box<dyn ChallengeBank> {
    match game {
        GameKind::MathAdventure => Box::new(MathBank),
        GameKind::WordWizard => Box::new(WordBank),
        GameKind::ScienceLab => Box::new(TriviaBank::science()),
        GameKind::MemoryPalace => Box::new(MemoryBank),
        GameKind::PatternQuest => Box::new(PatternBank),
        GameKind::GeographyExplorer => Box::new(TriviaBank::geography()),
        GameKind::CreativityCanvas => Box::new(DrawingBank),
    }
}

/// Shuffle the correct option in among its distractors.
///
/// Distractors must be distinct from the correct value, so the returned
/// index is unambiguous.
pub(crate) fn shuffled_options(
    correct: String,
    distractors: Vec<String>,
    rng: &mut dyn RngCore,
) -> (Vec<String>, usize) {
    debug_assert!(distractors.iter().all(|d| *d != correct));
    let mut options = distractors;
    options.push(correct.clone());
    options.shuffle(rng);
    let index = options
        .iter()
        .position(|o| *o == correct)
        .unwrap_or_default();
    (options, index)
}

#[cfg(test)]
pub(crate) fn test_rng() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::ChallengeBody;

    #[test]
    fn every_game_has_a_bank() {
        let mut rng = test_rng();
        for game in GameKind::ALL {
            let bank = bank_for(game);
            assert_eq!(bank.game(), game);
            // One level per content tier.
            for level in [1, 4, 7] {
                let challenges = bank.build(Level::new(level).unwrap(), &mut rng);
                assert!(
                    !challenges.is_empty(),
                    "{game} level {level} produced no challenges"
                );
                for challenge in &challenges {
                    assert!(
                        challenge.max_points() > 0,
                        "{game} level {level} challenge is worth nothing"
                    );
                }
            }
        }
    }

    #[test]
    fn shuffled_options_track_the_correct_index() {
        let mut rng = test_rng();
        for _ in 0..20 {
            let (options, index) = shuffled_options(
                "12".to_owned(),
                vec!["7".to_owned(), "13".to_owned(), "19".to_owned()],
                &mut rng,
            );
            assert_eq!(options.len(), 4);
            assert_eq!(options[index], "12");
        }
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        for game in GameKind::ALL {
            let bank = bank_for(game);
            let level = Level::new(3).unwrap();
            let a = bank.build(level, &mut test_rng());
            let b = bank.build(level, &mut test_rng());
            assert_eq!(a, b, "{game} is not deterministic under a fixed seed");
        }
    }

    #[test]
    fn multiple_choice_options_are_distinct() {
        let mut rng = test_rng();
        for game in [
            GameKind::MathAdventure,
            GameKind::ScienceLab,
            GameKind::PatternQuest,
            GameKind::GeographyExplorer,
        ] {
            for challenge in bank_for(game).build(Level::new(5).unwrap(), &mut rng) {
                if let ChallengeBody::MultipleChoice { options, correct } = challenge.body() {
                    let mut unique = options.clone();
                    unique.sort();
                    unique.dedup();
                    assert_eq!(unique.len(), options.len());
                    assert!(*correct < options.len());
                }
            }
        }
    }
}

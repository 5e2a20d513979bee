use play_core::model::{Challenge, ChallengeBody, GameKind, Level};
use rand::RngCore;
use rand::seq::SliceRandom;

use super::ChallengeBank;

const POINTS_PER_PAIR: u32 = 100;

const EMOJIS: [&str; 16] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵",
    "🐔",
];

/// Matching-pairs bank: one challenge per pair hidden in the grid.
pub struct MemoryBank;

impl MemoryBank {
    /// Square grid side for a level, capped at 6.
    #[must_use]
    pub fn grid_size(level: Level) -> u32 {
        (4 + level.value()).min(6)
    }

    /// Pairs on the board. An odd grid leaves one cell unused.
    #[must_use]
    pub fn pair_count(level: Level) -> u32 {
        let grid = Self::grid_size(level);
        ((grid * grid) / 2).min(EMOJIS.len() as u32)
    }
}

impl ChallengeBank for MemoryBank {
    fn game(&self) -> GameKind {
        GameKind::MemoryPalace
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game().tiers().tier_for(level);
        let pairs = Self::pair_count(level) as usize;

        let mut symbols: Vec<&str> = EMOJIS.to_vec();
        symbols.shuffle(rng);
        symbols
            .into_iter()
            .take(pairs)
            .map(|symbol| {
                Challenge::new(
                    format!("Find the matching pair of {symbol}"),
                    ChallengeBody::MemoryPair {
                        symbol: symbol.to_owned(),
                    },
                    POINTS_PER_PAIR,
                    tier,
                )
            })
            .collect()
    }
}

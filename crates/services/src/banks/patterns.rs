use play_core::model::{Challenge, ChallengeBody, GameKind, Level, Tier};
use rand::{Rng, RngCore};
use rand::seq::{IndexedRandom, SliceRandom};

use super::{ChallengeBank, shuffled_options};

const POINTS: u32 = 120;

const SHAPES: [&str; 6] = ["🔴", "🟡", "🟢", "🔵", "🟣", "🟠"];
const NUMBERS: [&str; 6] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣"];
const SYMBOLS: [&str; 6] = ["⭐", "❤️", "💎", "🌙", "☀️", "⚡"];

/// Complete-the-sequence challenges built from emoji symbol sets.
pub struct PatternBank;

impl ChallengeBank for PatternBank {
    fn game(&self) -> GameKind {
        GameKind::PatternQuest
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game().tiers().tier_for(level);
        let count = 4 + level.value();
        (0..count).map(|_| sequence(tier, rng)).collect()
    }
}

fn sequence(tier: Tier, rng: &mut dyn RngCore) -> Challenge {
    let set: &[&str; 6] = match rng.random_range(0..3u8) {
        0 => &SHAPES,
        1 => &NUMBERS,
        _ => &SYMBOLS,
    };
    // Distinct symbols forming the repeating unit.
    let mut picks: Vec<&str> = set.to_vec();
    picks.shuffle(rng);

    let (unit, shown): (Vec<&str>, usize) = match tier {
        // ABAB...: show four, ask for the fifth.
        Tier::Easy => (picks[..2].to_vec(), 4),
        // ABCABC...: show five, ask for the sixth.
        Tier::Medium => (picks[..3].to_vec(), 5),
        // AABBAABB...: show six, ask for the seventh.
        Tier::Hard => {
            let doubled = vec![picks[0], picks[0], picks[1], picks[1]];
            (doubled, 6)
        }
    };

    let series: Vec<&str> = unit.iter().copied().cycle().take(shown).collect();
    let next = unit[shown % unit.len()];
    let prompt = format!("What comes next? {} ...", series.join(" "));

    let distractors: Vec<String> = set
        .iter()
        .filter(|s| **s != next)
        .map(|s| (*s).to_owned())
        .collect();
    let distractors = distractors
        .choose_multiple(rng, 3)
        .cloned()
        .collect::<Vec<_>>();
    let (options, correct) = shuffled_options(next.to_owned(), distractors, rng);

    Challenge::new(
        prompt,
        ChallengeBody::MultipleChoice { options, correct },
        POINTS,
        tier,
    )
}

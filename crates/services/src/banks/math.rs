use play_core::model::{Challenge, ChallengeBody, GameKind, Level, Tier};
use rand::{Rng, RngCore};

use super::{ChallengeBank, shuffled_options};

const POINTS: u32 = 100;

/// Arithmetic problems that scale with the level tier.
pub struct MathBank;

impl ChallengeBank for MathBank {
    fn game(&self) -> GameKind {
        GameKind::MathAdventure
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game().tiers().tier_for(level);
        let count = 5 + level.value();
        (0..count).map(|_| problem(tier, rng)).collect()
    }
}

fn problem(tier: Tier, rng: &mut dyn RngCore) -> Challenge {
    let (prompt, answer) = match tier {
        Tier::Easy => {
            // Addition and subtraction that never dips below zero.
            let a = rng.random_range(1..=10u32);
            let b = rng.random_range(1..=10u32);
            if rng.random_bool(0.5) {
                (format!("{a} + {b} = ?"), a + b)
            } else {
                let (hi, lo) = (a.max(b), a.min(b));
                (format!("{hi} - {lo} = ?"), hi - lo)
            }
        }
        Tier::Medium => {
            if rng.random_bool(0.5) {
                let a = rng.random_range(2..=9u32);
                let b = rng.random_range(2..=9u32);
                (format!("{a} × {b} = ?"), a * b)
            } else {
                let a = rng.random_range(10..=50u32);
                let b = rng.random_range(10..=50u32);
                (format!("{a} + {b} = ?"), a + b)
            }
        }
        Tier::Hard => {
            if rng.random_bool(0.5) {
                let a = rng.random_range(5..=12u32);
                let b = rng.random_range(5..=12u32);
                (format!("{a} × {b} = ?"), a * b)
            } else {
                // Division with a whole-number quotient.
                let quotient = rng.random_range(3..=12u32);
                let divisor = rng.random_range(2..=9u32);
                (format!("{} ÷ {divisor} = ?", quotient * divisor), quotient)
            }
        }
    };

    let (options, correct) = shuffled_options(answer.to_string(), distractors(answer, rng), rng);
    Challenge::new(
        prompt,
        ChallengeBody::MultipleChoice { options, correct },
        POINTS,
        tier,
    )
}

/// Three wrong answers near the right one, all positive and distinct.
fn distractors(answer: u32, rng: &mut dyn RngCore) -> Vec<String> {
    let mut picked: Vec<u32> = Vec::with_capacity(3);
    while picked.len() < 3 {
        let offset = rng.random_range(-10..=9i64);
        let Ok(candidate) = u32::try_from(i64::from(answer) + offset) else {
            continue;
        };
        if candidate == 0 || candidate == answer || picked.contains(&candidate) {
            continue;
        }
        picked.push(candidate);
    }
    picked.into_iter().map(|v| v.to_string()).collect()
}

use play_core::model::{Challenge, ChallengeBody, GameKind, Level, Tier};
use rand::RngCore;
use rand::seq::SliceRandom;

use super::ChallengeBank;

const POINTS_PER_LETTER: u32 = 10;

/// Word pool per tier, each word with the hint shown to the player.
const EASY: [(&str, &str); 8] = [
    ("CAT", "A furry pet that meows"),
    ("DOG", "A loyal pet that barks"),
    ("SUN", "It shines in the sky during the day"),
    ("HAT", "You wear it on your head"),
    ("FISH", "It swims in the water"),
    ("BIRD", "It flies and sings in the trees"),
    ("CAKE", "A sweet treat for birthdays"),
    ("TREE", "It grows tall with leaves and branches"),
];

const MEDIUM: [(&str, &str); 8] = [
    ("HAPPY", "How you feel on a great day"),
    ("DANCE", "Moving to music"),
    ("MAGIC", "What wizards use"),
    ("SMILE", "What your face does when you are glad"),
    ("GREEN", "The color of grass"),
    ("WATER", "You drink it every day"),
    ("LIGHT", "The opposite of dark"),
    ("MUSIC", "Sounds that make a song"),
];

const HARD: [(&str, &str); 8] = [
    ("RAINBOW", "Colorful arc after the rain"),
    ("FRIENDS", "People you love to play with"),
    ("JOURNEY", "A long trip or adventure"),
    ("PICTURE", "A drawing or a photo"),
    ("AMAZING", "Another word for wonderful"),
    ("SCIENCE", "The study of how things work"),
    ("THUNDER", "The loud rumble in a storm"),
    ("DOLPHIN", "A clever sea animal that clicks"),
];

/// Unscramble-the-word challenges drawn from a tiered vocabulary pool.
pub struct WordBank;

impl ChallengeBank for WordBank {
    fn game(&self) -> GameKind {
        GameKind::WordWizard
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game().tiers().tier_for(level);
        let pool: &[(&str, &str)] = match tier {
            Tier::Easy => &EASY,
            Tier::Medium => &MEDIUM,
            Tier::Hard => &HARD,
        };
        let count = (5 + level.value()).min(8) as usize;

        let mut picks: Vec<(&str, &str)> = pool.to_vec();
        picks.shuffle(rng);
        picks
            .into_iter()
            .take(count)
            .map(|(word, hint)| {
                let scrambled = scramble(word, rng);
                let points = word.len() as u32 * POINTS_PER_LETTER;
                Challenge::new(
                    format!("Unscramble: {scrambled}"),
                    ChallengeBody::FreeText {
                        answer: word.to_owned(),
                        scrambled,
                        hint: hint.to_owned(),
                    },
                    points,
                    tier,
                )
            })
            .collect()
    }
}

/// Shuffle the letters until the order differs from the original.
///
/// Bounded retries; a pathological word is returned as-is after that.
fn scramble(word: &str, rng: &mut dyn RngCore) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    for _ in 0..8 {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
    letters.iter().collect()
}

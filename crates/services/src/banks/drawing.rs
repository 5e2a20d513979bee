use play_core::model::{Challenge, ChallengeBody, GameKind, Level, Tier};
use rand::RngCore;
use rand::seq::SliceRandom;

use super::ChallengeBank;

const BASE_POINTS: u32 = 100;

const EASY_PROMPTS: [&str; 4] = [
    "Draw a happy sun",
    "Draw your favorite animal",
    "Draw a smiling flower",
    "Draw a colorful balloon",
];

const MEDIUM_PROMPTS: [&str; 4] = [
    "Draw a magical castle",
    "Draw an underwater adventure",
    "Draw a friendly dragon",
    "Draw a city in the clouds",
];

const HARD_PROMPTS: [&str; 4] = [
    "Draw your dream treehouse",
    "Draw a journey through space",
    "Draw an invention that helps people",
    "Draw a world inside a raindrop",
];

/// Open-ended drawing prompts; each prompt carries its own time slice.
pub struct DrawingBank;

impl DrawingBank {
    /// Per-prompt drawing time, longer for harder tiers.
    #[must_use]
    pub fn prompt_time_secs(tier: Tier) -> u32 {
        match tier {
            Tier::Easy => 90,
            Tier::Medium => 120,
            Tier::Hard => 180,
        }
    }
}

impl ChallengeBank for DrawingBank {
    fn game(&self) -> GameKind {
        GameKind::CreativityCanvas
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game().tiers().tier_for(level);
        let prompts: &[&str] = match tier {
            Tier::Easy => &EASY_PROMPTS,
            Tier::Medium => &MEDIUM_PROMPTS,
            Tier::Hard => &HARD_PROMPTS,
        };
        let count = ((3 + level.value() / 2) as usize).min(5).min(prompts.len());
        let time_limit_secs = Self::prompt_time_secs(tier);

        let mut picks: Vec<&str> = prompts.to_vec();
        picks.shuffle(rng);
        picks
            .into_iter()
            .take(count)
            .map(|prompt| {
                Challenge::new(
                    prompt,
                    ChallengeBody::Freeform { time_limit_secs },
                    BASE_POINTS,
                    tier,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::test_rng;
    use play_core::model::Answer;

    #[test]
    fn prompt_count_and_time_follow_the_tier() {
        let mut rng = test_rng();
        let easy = DrawingBank.build(Level::new(1).unwrap(), &mut rng);
        assert_eq!(easy.len(), 3);
        for challenge in &easy {
            assert_eq!(
                challenge.body(),
                &ChallengeBody::Freeform {
                    time_limit_secs: 90
                }
            );
        }

        let hard = DrawingBank.build(Level::new(7).unwrap(), &mut rng);
        assert_eq!(hard.len(), 4);
        assert_eq!(
            hard[0].body(),
            &ChallengeBody::Freeform {
                time_limit_secs: 180
            }
        );
    }

    #[test]
    fn any_drawing_is_accepted() {
        let mut rng = test_rng();
        let challenges = DrawingBank.build(Level::new(1).unwrap(), &mut rng);
        let verdict = challenges[0].check(&Answer::Drawing { strokes: 3 }, 0);
        assert!(verdict.accepted);
        assert_eq!(verdict.points, 100);
    }
}

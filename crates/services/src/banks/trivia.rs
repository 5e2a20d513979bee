use play_core::model::{Challenge, ChallengeBody, GameKind, Level, Tier};
use rand::RngCore;
use rand::seq::SliceRandom;

use super::{ChallengeBank, shuffled_options};

/// One quiz question: prompt, right answer, three wrong ones, and a fun
/// fact revealed after answering.
type Item = (&'static str, &'static str, [&'static str; 3], &'static str);

const SCIENCE_EASY: &[Item] = &[
    (
        "What do plants need to make their own food?",
        "Sunlight",
        ["Moonlight", "Darkness", "Wind"],
        "Plants use sunlight in a process called photosynthesis!",
    ),
    (
        "How many legs does an insect have?",
        "Six",
        ["Four", "Eight", "Ten"],
        "All insects have six legs, spiders have eight!",
    ),
    (
        "What do we call water when it freezes?",
        "Ice",
        ["Steam", "Rain", "Snow"],
        "Water freezes at 0 degrees Celsius!",
    ),
    (
        "Which animal is the biggest in the ocean?",
        "Blue whale",
        ["Shark", "Dolphin", "Octopus"],
        "Blue whales are the largest animals that ever lived!",
    ),
    (
        "What do bees collect from flowers?",
        "Nectar",
        ["Leaves", "Seeds", "Bark"],
        "Bees turn nectar into honey back at the hive!",
    ),
];

const SCIENCE_MEDIUM: &[Item] = &[
    (
        "What gas do humans breathe out?",
        "Carbon dioxide",
        ["Oxygen", "Helium", "Nitrogen"],
        "Plants use the carbon dioxide we breathe out!",
    ),
    (
        "Which planet is known as the Red Planet?",
        "Mars",
        ["Venus", "Jupiter", "Mercury"],
        "Mars looks red because of iron rust on its surface!",
    ),
    (
        "What force pulls things toward the ground?",
        "Gravity",
        ["Magnetism", "Friction", "Electricity"],
        "Gravity is why dropped things fall down, not up!",
    ),
    (
        "What is the center of our solar system?",
        "The Sun",
        ["The Earth", "The Moon", "Saturn"],
        "The Sun holds more than 99% of the solar system's mass!",
    ),
    (
        "Which part of the body pumps blood?",
        "The heart",
        ["The lungs", "The brain", "The stomach"],
        "Your heart beats about 100,000 times every day!",
    ),
];

const SCIENCE_HARD: &[Item] = &[
    (
        "What is the smallest unit of matter?",
        "Atom",
        ["Cell", "Molecule", "Electron"],
        "Atoms are so small that millions fit on a pinhead!",
    ),
    (
        "What do we call animals that eat only plants?",
        "Herbivores",
        ["Carnivores", "Omnivores", "Predators"],
        "Elephants are the largest land herbivores!",
    ),
    (
        "How long does Earth take to orbit the Sun?",
        "One year",
        ["One day", "One month", "One week"],
        "That journey is about 940 million kilometers!",
    ),
    (
        "What kind of energy is stored in food?",
        "Chemical energy",
        ["Sound energy", "Light energy", "Wind energy"],
        "Your body turns chemical energy into movement and heat!",
    ),
    (
        "What natural process shapes mountains over time?",
        "Erosion",
        ["Evaporation", "Condensation", "Pollination"],
        "Wind, rain, and ice slowly carve rock over millions of years!",
    ),
];

const GEOGRAPHY_EASY: &[Item] = &[
    (
        "Which is the largest ocean on Earth?",
        "Pacific Ocean",
        ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean"],
        "The Pacific covers a third of the Earth's surface!",
    ),
    (
        "What is the capital of France?",
        "Paris",
        ["London", "Rome", "Madrid"],
        "Paris is called the City of Light!",
    ),
    (
        "On which continent do penguins live in the wild?",
        "Antarctica",
        ["Africa", "Europe", "Asia"],
        "Most wild penguins live in the Southern Hemisphere!",
    ),
    (
        "Which country is shaped like a boot?",
        "Italy",
        ["Spain", "Greece", "Portugal"],
        "You can see Italy's boot shape from space!",
    ),
    (
        "What is the longest river in the world?",
        "The Nile",
        ["The Amazon", "The Mississippi", "The Danube"],
        "The Nile flows over 6,600 kilometers through Africa!",
    ),
];

const GEOGRAPHY_MEDIUM: &[Item] = &[
    (
        "Which is the tallest mountain on Earth?",
        "Mount Everest",
        ["Mount Fuji", "Kilimanjaro", "Mont Blanc"],
        "Everest grows about 4 millimeters taller every year!",
    ),
    (
        "Which desert is the largest hot desert?",
        "The Sahara",
        ["The Gobi", "The Mojave", "The Atacama"],
        "The Sahara is almost as big as the United States!",
    ),
    (
        "What is the capital of Japan?",
        "Tokyo",
        ["Beijing", "Seoul", "Bangkok"],
        "Tokyo is one of the biggest cities in the world!",
    ),
    (
        "Which country has the most people?",
        "India",
        ["Brazil", "Russia", "Canada"],
        "More than 1.4 billion people live in India!",
    ),
    (
        "Which rainforest is the largest in the world?",
        "The Amazon",
        ["The Congo", "The Daintree", "The Black Forest"],
        "The Amazon makes a fifth of the world's oxygen!",
    ),
];

const GEOGRAPHY_HARD: &[Item] = &[
    (
        "Which imaginary line divides Earth into north and south?",
        "The Equator",
        ["The Prime Meridian", "The Tropic of Cancer", "The Arctic Circle"],
        "Countries on the Equator have almost no seasons!",
    ),
    (
        "Which country spans two continents?",
        "Turkey",
        ["Egypt", "Mexico", "Australia"],
        "Istanbul sits in both Europe and Asia!",
    ),
    (
        "What is the smallest country in the world?",
        "Vatican City",
        ["Monaco", "Malta", "Luxembourg"],
        "Vatican City is smaller than many city parks!",
    ),
    (
        "Which waterfall is the tallest on Earth?",
        "Angel Falls",
        ["Niagara Falls", "Victoria Falls", "Iguazu Falls"],
        "Angel Falls drops nearly one kilometer in Venezuela!",
    ),
    (
        "Which ocean surrounds the North Pole?",
        "Arctic Ocean",
        ["Pacific Ocean", "Southern Ocean", "Atlantic Ocean"],
        "The Arctic Ocean is mostly covered by sea ice!",
    ),
];

/// Multiple-choice quiz bank backed by a static, tiered question pool.
///
/// Serves both the science and geography games; only the pool and the
/// per-question points differ.
pub struct TriviaBank {
    game: GameKind,
    points: u32,
    easy: &'static [Item],
    medium: &'static [Item],
    hard: &'static [Item],
}

impl TriviaBank {
    #[must_use]
    pub fn science() -> Self {
        Self {
            game: GameKind::ScienceLab,
            points: 150,
            easy: SCIENCE_EASY,
            medium: SCIENCE_MEDIUM,
            hard: SCIENCE_HARD,
        }
    }

    #[must_use]
    pub fn geography() -> Self {
        Self {
            game: GameKind::GeographyExplorer,
            points: 140,
            easy: GEOGRAPHY_EASY,
            medium: GEOGRAPHY_MEDIUM,
            hard: GEOGRAPHY_HARD,
        }
    }
}

impl ChallengeBank for TriviaBank {
    fn game(&self) -> GameKind {
        self.game
    }

    fn build(&self, level: Level, rng: &mut dyn RngCore) -> Vec<Challenge> {
        let tier = self.game.tiers().tier_for(level);
        let pool = match tier {
            Tier::Easy => self.easy,
            Tier::Medium => self.medium,
            Tier::Hard => self.hard,
        };
        let count = ((4 + level.value()) as usize).min(pool.len());

        let mut picks: Vec<&Item> = pool.iter().collect();
        picks.shuffle(rng);
        picks
            .into_iter()
            .take(count)
            .map(|(prompt, correct, distractors, fact)| {
                let (options, correct) = shuffled_options(
                    (*correct).to_owned(),
                    distractors.iter().map(|d| (*d).to_owned()).collect(),
                    rng,
                );
                Challenge::new(
                    *prompt,
                    ChallengeBody::MultipleChoice { options, correct },
                    self.points,
                    tier,
                )
                .with_fact(*fact)
                .with_topic(self.game.category())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::test_rng;

    #[test]
    fn science_questions_carry_facts() {
        let mut rng = test_rng();
        for challenge in TriviaBank::science().build(Level::new(1).unwrap(), &mut rng) {
            assert!(challenge.fact().is_some());
            assert_eq!(challenge.points(), 150);
            assert_eq!(challenge.topic(), Some("Science"));
        }
    }

    #[test]
    fn geography_pool_is_capped() {
        let mut rng = test_rng();
        let challenges = TriviaBank::geography().build(Level::new(7).unwrap(), &mut rng);
        assert_eq!(challenges.len(), 5);
        for challenge in &challenges {
            assert_eq!(challenge.tier(), Tier::Hard);
            assert_eq!(challenge.points(), 140);
        }
    }
}

use crate::model::Tier;

/// The per-variant payload of a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeBody {
    /// One correct option among distinct distractors, in randomized order.
    MultipleChoice {
        options: Vec<String>,
        correct: usize,
    },
    /// Free-text answer, e.g. the unscrambled word.
    FreeText {
        answer: String,
        scrambled: String,
        hint: String,
    },
    /// One pair of a memory-matching grid.
    MemoryPair { symbol: String },
    /// Freeform task graded on participation, with its own time slice.
    Freeform { time_limit_secs: u32 },
}

/// A player's submission for one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(usize),
    Text(String),
    PairFound { symbol: String, moves: u32 },
    Drawing { strokes: u32 },
}

/// Result of checking one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub points: u32,
}

impl Verdict {
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            accepted: false,
            points: 0,
        }
    }
}

/// One unit of gameplay content, immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    prompt: String,
    body: ChallengeBody,
    points: u32,
    tier: Tier,
    fact: Option<String>,
    topic: Option<String>,
}

impl Challenge {
    #[must_use]
    pub fn new(prompt: impl Into<String>, body: ChallengeBody, points: u32, tier: Tier) -> Self {
        Self {
            prompt: prompt.into(),
            body,
            points,
            tier,
            fact: None,
            topic: None,
        }
    }

    /// Attach an explanatory fact shown after answering.
    #[must_use]
    pub fn with_fact(mut self, fact: impl Into<String>) -> Self {
        self.fact = Some(fact.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn body(&self) -> &ChallengeBody {
        &self.body
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn fact(&self) -> Option<&str> {
        self.fact.as_deref()
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Maximum points a correct answer can earn, time bonus included.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        match self.body {
            // Base points for drawing plus an early-finish bonus capped at
            // the same amount.
            ChallengeBody::Freeform { .. } => self.points * 2,
            _ => self.points,
        }
    }

    /// Check a submission against this challenge.
    ///
    /// `remaining_secs` feeds the early-finish bonus of freeform tasks; the
    /// other variants ignore it. An answer of the wrong shape is rejected.
    #[must_use]
    pub fn check(&self, answer: &Answer, remaining_secs: u32) -> Verdict {
        match (&self.body, answer) {
            (ChallengeBody::MultipleChoice { correct, .. }, Answer::Choice(chosen)) => {
                if chosen == correct {
                    Verdict {
                        accepted: true,
                        points: self.points,
                    }
                } else {
                    Verdict::rejected()
                }
            }
            (ChallengeBody::FreeText { answer: expected, .. }, Answer::Text(given)) => {
                if given.trim().eq_ignore_ascii_case(expected) {
                    Verdict {
                        accepted: true,
                        points: self.points,
                    }
                } else {
                    Verdict::rejected()
                }
            }
            (ChallengeBody::MemoryPair { symbol }, Answer::PairFound { symbol: found, .. }) => {
                if symbol == found {
                    Verdict {
                        accepted: true,
                        points: self.points,
                    }
                } else {
                    Verdict::rejected()
                }
            }
            (ChallengeBody::Freeform { .. }, Answer::Drawing { strokes }) => {
                // Participation is always accepted; an untouched canvas earns
                // half the base points and no bonus counts past the base.
                let base = if *strokes > 0 {
                    self.points
                } else {
                    self.points / 2
                };
                let bonus = (remaining_secs * 2).min(self.points);
                Verdict {
                    accepted: true,
                    points: base + bonus,
                }
            }
            _ => Verdict::rejected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_challenge() -> Challenge {
        Challenge::new(
            "7 + 3 = ?",
            ChallengeBody::MultipleChoice {
                options: vec!["8".into(), "10".into(), "12".into(), "9".into()],
                correct: 1,
            },
            100,
            Tier::Easy,
        )
    }

    #[test]
    fn correct_choice_earns_points() {
        let challenge = choice_challenge();
        assert_eq!(
            challenge.check(&Answer::Choice(1), 30),
            Verdict {
                accepted: true,
                points: 100
            }
        );
        assert_eq!(challenge.check(&Answer::Choice(0), 30), Verdict::rejected());
    }

    #[test]
    fn free_text_ignores_case_and_whitespace() {
        let challenge = Challenge::new(
            "Unscramble: TCA",
            ChallengeBody::FreeText {
                answer: "CAT".into(),
                scrambled: "TCA".into(),
                hint: "A furry pet that meows".into(),
            },
            30,
            Tier::Easy,
        );
        assert!(challenge.check(&Answer::Text("  cat ".into()), 0).accepted);
        assert!(!challenge.check(&Answer::Text("car".into()), 0).accepted);
    }

    #[test]
    fn mismatched_answer_shape_is_rejected() {
        let challenge = choice_challenge();
        assert_eq!(
            challenge.check(&Answer::Text("10".into()), 30),
            Verdict::rejected()
        );
    }

    #[test]
    fn freeform_awards_participation_and_capped_bonus() {
        let challenge = Challenge::new(
            "Draw a happy sun",
            ChallengeBody::Freeform {
                time_limit_secs: 90,
            },
            100,
            Tier::Easy,
        );
        // Drew something with 80s left: 100 base + min(160, 100) bonus.
        let full = challenge.check(&Answer::Drawing { strokes: 12 }, 80);
        assert_eq!(full.points, 200);
        // Blank canvas, no time left: half base only.
        let blank = challenge.check(&Answer::Drawing { strokes: 0 }, 0);
        assert!(blank.accepted);
        assert_eq!(blank.points, 50);
        assert_eq!(challenge.max_points(), 200);
    }
}

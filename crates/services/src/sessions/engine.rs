use play_core::model::{Answer, Challenge, ChallengeBody, GameKind, Level, SessionResult, Verdict};
use play_core::timer::{Countdown, TickOutcome};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::banks::bank_for;
use crate::error::SessionError;

use super::progress::SessionProgress;

/// Knobs for starting a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Fixed RNG seed; `None` draws entropy from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Outcome of answering the active challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub verdict: Verdict,
    /// True when this answer finished the session.
    pub session_over: bool,
}

/// One timed run through the challenges of a single level.
///
/// The session finishes exactly once, either by answering the last
/// challenge, by timer expiry, or by teardown; whichever comes first wins
/// and later events are inert.
pub struct GameSession {
    game: GameKind,
    level: Level,
    challenges: Vec<Challenge>,
    current: usize,
    score: u32,
    timer: Countdown,
    result: Option<SessionResult>,
    reported: bool,
}

impl GameSession {
    /// Start a session: generate challenges and arm the countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank yields no challenges.
    pub fn new(game: GameKind, level: Level, config: SessionConfig) -> Result<Self, SessionError> {
        let mut rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        };
        let challenges = bank_for(game).build(level, rng.as_mut());
        if challenges.is_empty() {
            return Err(SessionError::Empty);
        }
        let budget = session_budget(game, level, &challenges);
        Ok(Self {
            game,
            level,
            challenges,
            current: 0,
            score: 0,
            timer: Countdown::new(budget),
            result: None,
            reported: false,
        })
    }

    #[must_use]
    pub fn game(&self) -> GameKind {
        self.game
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The challenge awaiting an answer, `None` once the session is over.
    #[must_use]
    pub fn current_challenge(&self) -> Option<&Challenge> {
        if self.is_over() {
            None
        } else {
            self.challenges.get(self.current)
        }
    }

    /// Highest score this session's challenge list can yield.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.challenges.iter().map(Challenge::max_points).sum()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Seconds consumed from the session budget so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    /// Answer the challenge at `index`.
    ///
    /// The index pins the submission to the challenge the caller saw, so an
    /// answer raced by an advance is rejected instead of scoring the wrong
    /// challenge.
    ///
    /// # Errors
    ///
    /// `SessionError::Completed` after the session finished,
    /// `SessionError::StaleChallenge` when `index` is not the active one.
    pub fn submit_answer(
        &mut self,
        index: usize,
        answer: &Answer,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.is_over() {
            return Err(SessionError::Completed);
        }
        if index != self.current {
            return Err(SessionError::StaleChallenge {
                submitted: index,
                current: self.current,
            });
        }

        let challenge = &self.challenges[self.current];
        let verdict = challenge.check(answer, self.timer.remaining_secs());
        if verdict.accepted {
            self.score += verdict.points;
        }
        self.current += 1;

        let session_over = self.current == self.challenges.len();
        if session_over {
            self.finish(true);
        }
        Ok(SubmitOutcome {
            verdict,
            session_over,
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Expiry finishes the session as incomplete. Once the session is over
    /// the timer is inert and further ticks report nothing.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();
        if outcome == TickOutcome::Expired {
            self.finish(false);
        }
        outcome
    }

    /// Abandon the session, cancelling the countdown.
    ///
    /// The run is recorded as incomplete with whatever score it earned.
    /// Harmless after the session already finished.
    pub fn teardown(&mut self) {
        if self.is_over() {
            return;
        }
        self.timer.cancel();
        self.finish(false);
    }

    /// The final result, `None` while the session is still running.
    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Whether the result has been handed to a reporter already.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Mark the result as delivered so it is never double-counted.
    pub fn mark_reported(&mut self) {
        debug_assert!(self.is_over());
        self.reported = true;
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            game: self.game,
            level: self.level,
            answered: self.current.min(self.challenges.len()),
            total: self.challenges.len(),
            score: self.score,
            max_score: self.max_score(),
            remaining_secs: self.timer.remaining_secs(),
            finished: self.is_over(),
        }
    }

    fn finish(&mut self, completed: bool) {
        if self.result.is_some() {
            return;
        }
        self.timer.cancel();
        self.result = Some(SessionResult::rate(
            self.game,
            self.level,
            self.score,
            self.max_score(),
            &self.game.thresholds(),
            completed,
            self.timer.elapsed_secs(),
        ));
    }
}

/// Total session time. Drawing sessions budget per prompt, the rest use the
/// game's level formula.
fn session_budget(game: GameKind, level: Level, challenges: &[Challenge]) -> u32 {
    let per_prompt: u32 = challenges
        .iter()
        .filter_map(|c| match c.body() {
            ChallengeBody::Freeform { time_limit_secs } => Some(*time_limit_secs),
            _ => None,
        })
        .sum();
    if per_prompt > 0 {
        per_prompt
    } else {
        game.time_budget_secs(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(game: GameKind) -> GameSession {
        GameSession::new(game, Level::new(1).unwrap(), SessionConfig::seeded(7)).unwrap()
    }

    fn correct_answer(challenge: &Challenge) -> Answer {
        match challenge.body() {
            ChallengeBody::MultipleChoice { correct, .. } => Answer::Choice(*correct),
            ChallengeBody::FreeText { answer, .. } => Answer::Text(answer.clone()),
            ChallengeBody::MemoryPair { symbol } => Answer::PairFound {
                symbol: symbol.clone(),
                moves: 2,
            },
            ChallengeBody::Freeform { .. } => Answer::Drawing { strokes: 5 },
        }
    }

    #[test]
    fn answering_everything_completes_the_session() {
        let mut session = session(GameKind::MathAdventure);
        let total = session.progress().total;
        for i in 0..total {
            let answer = correct_answer(session.current_challenge().unwrap());
            let outcome = session.submit_answer(i, &answer).unwrap();
            assert_eq!(outcome.session_over, i + 1 == total);
        }
        let result = session.result().unwrap();
        assert!(result.completed());
        assert_eq!(result.stars(), 3);
        assert_eq!(result.score(), session.max_score());
    }

    #[test]
    fn expiry_finishes_as_incomplete() {
        let mut session = session(GameKind::MathAdventure);
        // Level 1 math budget is 60 seconds.
        for _ in 0..59 {
            assert!(matches!(session.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(session.tick(), TickOutcome::Expired);
        let result = session.result().unwrap();
        assert!(!result.completed());
        assert_eq!(result.time_spent_secs(), 60);
        // No answers were submitted, so the run earns the floor rating.
        assert_eq!(result.score(), 0);
        assert_eq!(result.stars(), 1);
        // Ticks after expiry are inert, never a second expiry.
        assert_eq!(session.tick(), TickOutcome::Inert);
    }

    #[test]
    fn stale_submission_is_rejected() {
        let mut session = session(GameKind::MathAdventure);
        let answer = correct_answer(session.current_challenge().unwrap());
        session.submit_answer(0, &answer).unwrap();
        let err = session.submit_answer(0, &answer).unwrap_err();
        assert!(matches!(
            err,
            SessionError::StaleChallenge {
                submitted: 0,
                current: 1
            }
        ));
    }

    #[test]
    fn submissions_after_finish_are_rejected() {
        let mut session = session(GameKind::MathAdventure);
        session.teardown();
        let err = session
            .submit_answer(0, &Answer::Choice(0))
            .unwrap_err();
        assert!(matches!(err, SessionError::Completed));
        assert!(!session.result().unwrap().completed());
    }

    #[test]
    fn wrong_answers_score_nothing_but_advance() {
        let mut session = session(GameKind::MathAdventure);
        let challenge = session.current_challenge().unwrap();
        let ChallengeBody::MultipleChoice { correct, .. } = challenge.body() else {
            panic!("expected a multiple choice challenge");
        };
        let wrong = (correct + 1) % 4;
        let outcome = session.submit_answer(0, &Answer::Choice(wrong)).unwrap();
        assert!(!outcome.verdict.accepted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn drawing_budget_is_the_sum_of_prompt_slices() {
        let session = session(GameKind::CreativityCanvas);
        // Three easy prompts at 90 seconds each.
        assert_eq!(session.progress().remaining_secs, 270);
    }

    #[test]
    fn teardown_after_finish_is_harmless() {
        let mut session = session(GameKind::MathAdventure);
        let total = session.progress().total;
        for i in 0..total {
            let answer = correct_answer(session.current_challenge().unwrap());
            session.submit_answer(i, &answer).unwrap();
        }
        let completed = session.result().unwrap().completed();
        session.teardown();
        assert_eq!(session.result().unwrap().completed(), completed);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let a = session(GameKind::PatternQuest);
        let b = session(GameKind::PatternQuest);
        let prompts_a: Vec<_> = (0..a.progress().total)
            .filter_map(|i| a.challenges.get(i).map(Challenge::prompt))
            .collect();
        let prompts_b: Vec<_> = (0..b.progress().total)
            .filter_map(|i| b.challenges.get(i).map(Challenge::prompt))
            .collect();
        assert_eq!(prompts_a, prompts_b);
    }
}

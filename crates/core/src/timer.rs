//! Countdown clock for one timed game session.
//!
//! The countdown is cooperative: the host feeds it one `tick` per elapsed
//! second. It fires expiry at most once per construction, and a cancelled or
//! expired countdown ignores every further tick, so a stray late tick can
//! never mutate a torn-down session.

/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down; the wrapped value is the remaining seconds.
    Running { remaining_secs: u32 },
    /// The countdown just reached zero. Fired at most once.
    Expired,
    /// The countdown was already expired or cancelled; nothing happened.
    Inert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Expired,
    Cancelled,
}

/// One-shot second-granularity countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    state: State,
}

impl Countdown {
    /// Arm a countdown for the given number of seconds.
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: State::Running,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whole seconds consumed so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Advance the countdown by one second.
    ///
    /// Remaining time is decremented by a fixed step rather than recomputed
    /// from wall-clock deltas, so a missed tick costs accuracy, not
    /// correctness.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != State::Running {
            return TickOutcome::Inert;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = State::Expired;
            return TickOutcome::Expired;
        }

        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Stop the countdown without firing expiry. Idempotent; a countdown that
    /// already expired stays expired.
    pub fn cancel(&mut self) {
        if self.state == State::Running {
            self.state = State::Cancelled;
        }
    }
}

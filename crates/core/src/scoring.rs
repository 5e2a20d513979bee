//! Star-rating policy: converts a raw session score into a 1-3 star summary.

/// Percentage cutoffs for the two- and three-star ratings.
///
/// Every game uses the standard 90/70 policy except Creativity Canvas, which
/// grades participation rather than correctness and keeps its relaxed 80/60
/// cutoffs. The floor is always one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarThresholds {
    three_at: u8,
    two_at: u8,
}

impl StarThresholds {
    /// Standard policy: 90% for three stars, 70% for two.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            three_at: 90,
            two_at: 70,
        }
    }

    /// Relaxed policy for participation-scored games: 80% / 60%.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            three_at: 80,
            two_at: 60,
        }
    }

    #[must_use]
    pub fn three_at(&self) -> u8 {
        self.three_at
    }

    #[must_use]
    pub fn two_at(&self) -> u8 {
        self.two_at
    }

    /// Rate a score against the maximum achievable score.
    ///
    /// Monotone in the percentage: a higher percentage never yields fewer
    /// stars. An unreachable maximum of zero rates the floor of one star.
    #[must_use]
    pub fn stars_for(&self, score: u32, max_score: u32) -> u8 {
        if max_score == 0 {
            return 1;
        }
        let percentage = f64::from(score) / f64::from(max_score) * 100.0;
        if percentage >= f64::from(self.three_at) {
            3
        } else if percentage >= f64::from(self.two_at) {
            2
        } else {
            1
        }
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

use serde::{Deserialize, Serialize};

/// Win/loss/draw tallies for one competitor
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32
}

impl OutcomeRecord {
    /// `(wins + draws / 2) / matches_played * 100`, or 0 without any matches
    pub fn win_percentage(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }

        (self.wins as f64 + 0.5 * self.draws as f64) / self.matches_played as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::OutcomeRecord;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_win_percentage_no_matches() {
        assert_eq!(OutcomeRecord::default().win_percentage(), 0.0);
    }

    #[test]
    fn test_win_percentage_counts_half_draws() {
        let record = OutcomeRecord {
            wins: 2,
            losses: 1,
            draws: 1,
            matches_played: 4
        };

        assert_abs_diff_eq!(record.win_percentage(), 62.5);
    }
}

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::Display;

/// Result of a match from the red alliance's point of view
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MatchOutcome {
    RedWin,
    BlueWin,
    Draw
}

impl MatchOutcome {
    /// Only the sign of the score difference matters, never its magnitude.
    pub fn from_scores(red_score: u32, blue_score: u32) -> MatchOutcome {
        match red_score.cmp(&blue_score) {
            Ordering::Greater => MatchOutcome::RedWin,
            Ordering::Less => MatchOutcome::BlueWin,
            Ordering::Equal => MatchOutcome::Draw
        }
    }

    pub fn is_draw(&self) -> bool {
        *self == MatchOutcome::Draw
    }
}

use serde::{Deserialize, Serialize};

use super::match_outcome::MatchOutcome;

/// A completed 2-vs-2 match. Alliances are ordered pairs of competitor ids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub red: [String; 2],
    pub blue: [String; 2],
    pub red_score: u32,
    pub blue_score: u32
}

impl Match {
    pub fn new(red: [&str; 2], blue: [&str; 2], red_score: u32, blue_score: u32) -> Match {
        Match {
            red: red.map(str::to_string),
            blue: blue.map(str::to_string),
            red_score,
            blue_score
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.red_score, self.blue_score)
    }

    /// All four competitor ids, red alliance first
    pub fn competitors(&self) -> impl Iterator<Item = &str> {
        self.red.iter().chain(self.blue.iter()).map(String::as_str)
    }

    /// A match is usable when all four ids are present and distinct.
    pub fn is_valid(&self) -> bool {
        let ids: Vec<&str> = self.competitors().collect();
        if ids.iter().any(|id| id.trim().is_empty()) {
            return false;
        }

        (0..ids.len()).all(|i| ids[i + 1..].iter().all(|other| *other != ids[i]))
    }

    /// The same match seen from the other side of the field
    pub fn mirrored(&self) -> Match {
        Match {
            red: self.blue.clone(),
            blue: self.red.clone(),
            red_score: self.blue_score,
            blue_score: self.red_score
        }
    }
}

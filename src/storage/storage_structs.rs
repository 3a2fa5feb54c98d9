use serde::{Deserialize, Serialize};

use crate::model::structures::leaderboard_entry::LeaderboardEntry;

/// Columns every match log must carry
pub const REQUIRED_COLUMNS: [&str; 6] = ["red1", "red2", "blue1", "blue2", "red_score", "blue_score"];
pub const SEASON_COLUMN: &str = "season";
pub const TIME_COLUMN: &str = "time";

/// One row of the match log as written. Every cell is optional so that a
/// bad row can be reported and skipped instead of failing the whole read.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MatchRow {
    pub red1: Option<String>,
    pub red2: Option<String>,
    pub blue1: Option<String>,
    pub blue2: Option<String>,
    pub red_score: Option<String>,
    pub blue_score: Option<String>,
    pub season: Option<String>,
    pub time: Option<String>
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Mu")]
    pub mu: f64,
    #[serde(rename = "Sigma")]
    pub sigma: f64,
    #[serde(rename = "Conservative Score")]
    pub conservative: f64,
    #[serde(rename = "OPR")]
    pub opr: f64,
    #[serde(rename = "DPR")]
    pub dpr: f64,
    #[serde(rename = "CCVM")]
    pub ccvm: f64,
    #[serde(rename = "Win Percentage")]
    pub win_percentage: f64
}

impl From<&LeaderboardEntry> for LeaderboardRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        LeaderboardRow {
            rank: entry.rank,
            team: entry.id.clone(),
            mu: round2(entry.mu),
            sigma: round2(entry.sigma),
            conservative: round2(entry.conservative),
            opr: round2(entry.opr),
            dpr: round2(entry.dpr),
            ccvm: round2(entry.ccvm),
            win_percentage: round2(entry.win_percentage)
        }
    }
}

/// Backup record keyed by team id in the ratings JSON
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RatingBackup {
    pub mu: f64,
    pub sigma: f64,
    pub conservative: f64
}

impl From<&LeaderboardEntry> for RatingBackup {
    fn from(entry: &LeaderboardEntry) -> Self {
        RatingBackup {
            mu: round2(entry.mu),
            sigma: round2(entry.sigma),
            conservative: round2(entry.conservative)
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub id: String,
    pub mu: f64,
    pub sigma: f64,
    pub conservative: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub matches_played: u32,
    pub win_percentage: f64,
    pub opr: f64,
    pub dpr: f64,
    pub ccvm: f64,
    /// Set when the contribution solve did not converge
    pub provisional: bool
}

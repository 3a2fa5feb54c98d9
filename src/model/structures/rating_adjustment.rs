use serde::{Deserialize, Serialize};

/// Change applied to one competitor's belief by one processed match
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RatingAdjustment {
    /// Position of the match in processing order
    pub match_index: usize,
    pub mu_before: f64,
    pub mu_after: f64,
    pub sigma_before: f64,
    pub sigma_after: f64
}

impl RatingAdjustment {
    pub fn mu_delta(&self) -> f64 {
        self.mu_after - self.mu_before
    }

    pub fn sigma_delta(&self) -> f64 {
        self.sigma_after - self.sigma_before
    }
}

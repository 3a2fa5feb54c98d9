use serde::{Deserialize, Serialize};

use crate::model::constants::CONSERVATIVE_SIGMA_MULTIPLIER;

/// A competitor's skill estimate, modeled as a Gaussian `N(mu, sigma²)`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Belief {
    pub mu: f64,
    pub sigma: f64
}

impl Belief {
    pub fn new(mu: f64, sigma: f64) -> Belief {
        Belief { mu, sigma }
    }

    /// Lower confidence bound used for ranking: `mu - 3 * sigma`
    pub fn conservative(&self) -> f64 {
        self.mu - CONSERVATIVE_SIGMA_MULTIPLIER * self.sigma
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }
}

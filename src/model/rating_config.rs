use serde::{Deserialize, Serialize};

use crate::{
    error::{ProcessorError, Result},
    model::{
        constants::{BETA, DRAW_PROBABILITY, MU, SIGMA, SOLVER_TOLERANCE, TAU},
        gaussian::ppf,
        structures::belief::Belief
    }
};

/// Parameters of the skill model
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RatingConfig {
    /// Prior mean of every new competitor
    pub mu: f64,
    /// Prior standard deviation of every new competitor
    pub sigma: f64,
    /// Performance spread around skill
    pub beta: f64,
    /// Additive dynamics applied to sigma before each update
    pub tau: f64,
    /// Probability that a match between equals ends level
    pub draw_probability: f64
}

impl Default for RatingConfig {
    fn default() -> Self {
        RatingConfig {
            mu: MU,
            sigma: SIGMA,
            beta: BETA,
            tau: TAU,
            draw_probability: DRAW_PROBABILITY
        }
    }
}

impl RatingConfig {
    /// Derives the remaining parameters from the prior mean:
    /// `sigma = mu / 3`, `beta = sigma / 2`, `tau = sigma / 100`.
    pub fn from_mu(mu: f64) -> RatingConfig {
        let sigma = mu / 3.0;

        RatingConfig {
            mu,
            sigma,
            beta: sigma / 2.0,
            tau: sigma / 100.0,
            draw_probability: DRAW_PROBABILITY
        }
    }

    pub fn prior(&self) -> Belief {
        Belief::new(self.mu, self.sigma)
    }

    /// `ε = √2 · β · Φ⁻¹(0.5 + p_draw / 2)`
    pub fn draw_margin(&self) -> f64 {
        std::f64::consts::SQRT_2 * self.beta * ppf(0.5 + self.draw_probability / 2.0)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.mu.is_finite(), "mu must be finite"),
            (self.sigma.is_finite() && self.sigma > 0.0, "sigma must be positive"),
            (self.beta.is_finite() && self.beta > 0.0, "beta must be positive"),
            (self.tau.is_finite() && self.tau >= 0.0, "tau must not be negative"),
            (
                (0.0..1.0).contains(&self.draw_probability),
                "draw probability must be in [0, 1)"
            )
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(ProcessorError::InvalidConfig(reason.to_string())),
            None => Ok(())
        }
    }
}

/// Stopping rules for the sparse least-squares solve
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Relative tolerance for both the residual and the normal-equation tests
    pub tolerance: f64,
    /// Iteration cap. `None` uses twice the number of unknowns.
    pub max_iterations: Option<usize>
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: SOLVER_TOLERANCE,
            max_iterations: None
        }
    }
}

impl SolverConfig {
    pub fn iteration_cap(&self, columns: usize) -> usize {
        self.max_iterations.unwrap_or(2 * columns)
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Offensive and defensive contribution of one competitor
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Contribution {
    pub opr: f64,
    pub dpr: f64
}

impl Contribution {
    /// Calculated contribution to victory margin
    pub fn ccvm(&self) -> f64 {
        self.opr - self.dpr
    }
}

/// Result of the global contribution solve
#[derive(Debug, Clone)]
pub struct ContributionEstimate {
    pub contributions: IndexMap<String, Contribution>,
    pub iterations: usize,
    pub converged: bool,
    /// `‖Ax - b‖` at the returned solution
    pub residual_norm: f64
}

/// An empty, trivially converged estimate
impl Default for ContributionEstimate {
    fn default() -> Self {
        ContributionEstimate {
            contributions: IndexMap::new(),
            iterations: 0,
            converged: true,
            residual_norm: 0.0
        }
    }
}

impl ContributionEstimate {
    pub fn get(&self, id: &str) -> Option<&Contribution> {
        self.contributions.get(id)
    }

    /// Values are approximate when the solver stopped on its iteration cap.
    pub fn is_provisional(&self) -> bool {
        !self.converged
    }
}

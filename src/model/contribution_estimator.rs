use indexmap::IndexMap;
use nalgebra::DVector;
use tracing::{info, warn};

use crate::model::{
    lsqr::lsqr,
    rating_config::SolverConfig,
    sparse::SparseMatrix,
    structures::{
        alliance_match::Match,
        contribution::{Contribution, ContributionEstimate}
    }
};

/// Linear system decomposing alliance scores into per-competitor contributions.
///
/// Unknowns are laid out as `[opr_0 .. opr_n, dpr_0 .. dpr_n]` with competitors indexed by
/// first appearance. Each match contributes two rows:
///
/// ```text
/// opr(r1) + opr(r2) - dpr(b1) - dpr(b2) = red_score
/// opr(b1) + opr(b2) - dpr(r1) - dpr(r2) = blue_score
/// ```
pub struct ContributionSystem {
    pub competitors: IndexMap<String, usize>,
    pub matrix: SparseMatrix,
    pub scores: DVector<f64>
}

impl ContributionSystem {
    pub fn build(matches: &[Match]) -> ContributionSystem {
        let mut competitors: IndexMap<String, usize> = IndexMap::new();
        let valid: Vec<&Match> = matches
            .iter()
            .filter(|m| {
                let ok = m.is_valid();
                if !ok {
                    warn!(match_ = ?m, "Skipping match with missing or repeated competitor ids");
                }
                ok
            })
            .collect();

        for m in &valid {
            for id in m.competitors() {
                if !competitors.contains_key(id) {
                    competitors.insert(id.to_owned(), competitors.len());
                }
            }
        }

        let n = competitors.len();
        let mut triplets = Vec::with_capacity(valid.len() * 8);
        let mut scores = Vec::with_capacity(valid.len() * 2);

        for m in &valid {
            let index = |id: &String| competitors[id.as_str()];
            let red = m.red.each_ref().map(index);
            let blue = m.blue.each_ref().map(index);

            for (offense, defense, score) in [(red, blue, m.red_score), (blue, red, m.blue_score)] {
                let row = scores.len();
                for i in offense {
                    triplets.push((row, i, 1.0));
                }
                for i in defense {
                    triplets.push((row, n + i, -1.0));
                }
                scores.push(score as f64);
            }
        }

        ContributionSystem {
            matrix: SparseMatrix::from_triplets(scores.len(), 2 * n, &triplets),
            competitors,
            scores: DVector::from_vec(scores)
        }
    }

    pub fn solve(&self, config: &SolverConfig) -> ContributionEstimate {
        let n = self.competitors.len();
        if n == 0 {
            info!("No matches to estimate contributions from");
            return ContributionEstimate::default();
        }

        let solution = lsqr(&self.matrix, &self.scores, config);

        if solution.converged() {
            info!(
                iterations = solution.iterations,
                residual = solution.residual_norm,
                reason = ?solution.stop_reason,
                "Contribution solve converged"
            );
        } else {
            warn!(
                iterations = solution.iterations,
                residual = solution.residual_norm,
                "Contribution solve hit its iteration cap, values are provisional"
            );
        }

        let contributions = self
            .competitors
            .iter()
            .map(|(id, &i)| {
                (
                    id.clone(),
                    Contribution {
                        opr: solution.x[i],
                        dpr: solution.x[n + i]
                    }
                )
            })
            .collect();

        ContributionEstimate {
            contributions,
            iterations: solution.iterations,
            converged: solution.converged(),
            residual_norm: solution.residual_norm
        }
    }
}

/// Builds the system for the whole match list and solves it once.
pub fn estimate(matches: &[Match], config: &SolverConfig) -> ContributionEstimate {
    let system = ContributionSystem::build(matches);
    info!(
        rows = system.matrix.rows(),
        columns = system.matrix.cols(),
        entries = system.matrix.nnz(),
        "Contribution system built"
    );

    system.solve(config)
}

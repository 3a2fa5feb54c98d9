//! LSQR (Paige & Saunders, 1982) for sparse least-squares problems `min ‖Ax - b‖₂`.
//!
//! Starting from `x = 0`, the iterates stay in the row space of `A`, so for a
//! rank-deficient system the method converges to the minimum-norm least-squares solution.

use nalgebra::DVector;

use crate::model::{constants::SOLVER_CONDITION_LIMIT, rating_config::SolverConfig, sparse::SparseMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `b = 0`, or `Aᵀb = 0`: `x = 0` is the answer
    TrivialSolution,
    /// `Ax = b` is solved to within tolerance
    Compatible,
    /// The normal equations `AᵀAx = Aᵀb` are solved to within tolerance
    LeastSquares,
    /// The estimated condition number exceeded the limit
    IllConditioned,
    /// The iteration cap was reached first
    IterationLimit
}

#[derive(Debug, Clone)]
pub struct LsqrSolution {
    pub x: DVector<f64>,
    pub iterations: usize,
    pub stop_reason: StopReason,
    /// `‖b - Ax‖`
    pub residual_norm: f64
}

impl LsqrSolution {
    pub fn converged(&self) -> bool {
        self.stop_reason != StopReason::IterationLimit
    }
}

pub fn lsqr(a: &SparseMatrix, b: &DVector<f64>, config: &SolverConfig) -> LsqrSolution {
    let n = a.cols();
    let tolerance = config.tolerance;
    let max_iterations = config.iteration_cap(n);
    let condition_tolerance = 1.0 / SOLVER_CONDITION_LIMIT;

    let mut x = DVector::zeros(n);

    // Golub-Kahan bidiagonalization start: beta·u = b, alpha·v = Aᵀu
    let mut u = b.clone();
    let mut beta = u.norm();
    let mut v = DVector::zeros(n);
    let mut alpha = 0.0;

    if beta > 0.0 {
        u /= beta;
        v = a.transpose_multiply(&u);
        alpha = v.norm();
    }
    if alpha > 0.0 {
        v /= alpha;
    }

    let b_norm = beta;
    if alpha * beta == 0.0 {
        return LsqrSolution {
            x,
            iterations: 0,
            stop_reason: StopReason::TrivialSolution,
            residual_norm: b_norm
        };
    }

    let mut w = v.clone();
    let mut rho_bar = alpha;
    let mut phi_bar = beta;
    let mut a_norm: f64 = 0.0;
    let mut dd_norm = 0.0;
    let mut r_norm = beta;
    let mut stop_reason = StopReason::IterationLimit;
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;

        // Continue the bidiagonalization
        u = a.multiply(&v) - &u * alpha;
        beta = u.norm();

        if beta > 0.0 {
            u /= beta;
            a_norm = (a_norm.powi(2) + alpha.powi(2) + beta.powi(2)).sqrt();

            v = a.transpose_multiply(&u) - &v * beta;
            alpha = v.norm();
            if alpha > 0.0 {
                v /= alpha;
            }
        }

        // Plane rotation eliminating the subdiagonal beta
        let rho = rho_bar.hypot(beta);
        let cs = rho_bar / rho;
        let sn = beta / rho;
        let theta = sn * alpha;
        rho_bar = -cs * alpha;
        let phi = cs * phi_bar;
        phi_bar *= sn;
        let tau = sn * phi;

        // Update x and the search direction w
        dd_norm += w.norm_squared() / (rho * rho);
        x += &w * (phi / rho);
        w = &v - &w * (theta / rho);

        // Convergence tests
        let a_cond = a_norm * dd_norm.sqrt();
        let x_norm = x.norm();
        r_norm = phi_bar;
        let ar_norm = alpha * tau.abs();

        let test1 = r_norm / b_norm;
        let test2 = ar_norm / (a_norm * r_norm + f64::EPSILON);
        let test3 = 1.0 / a_cond;
        let relative = test1 / (1.0 + a_norm * x_norm / b_norm);
        let r_tolerance = tolerance + tolerance * a_norm * x_norm / b_norm;

        if test1 <= r_tolerance || 1.0 + relative <= 1.0 {
            stop_reason = StopReason::Compatible;
            break;
        }
        if test2 <= tolerance || 1.0 + test2 <= 1.0 {
            stop_reason = StopReason::LeastSquares;
            break;
        }
        if test3 <= condition_tolerance || 1.0 + test3 <= 1.0 {
            stop_reason = StopReason::IllConditioned;
            break;
        }
    }

    LsqrSolution {
        x,
        iterations,
        stop_reason,
        residual_norm: r_norm
    }
}

#[cfg(test)]
mod tests {
    use super::{lsqr, StopReason};
    use crate::model::{rating_config::SolverConfig, sparse::SparseMatrix};
    use approx::assert_abs_diff_eq;
    use nalgebra::{dvector, DVector};

    fn tight() -> SolverConfig {
        SolverConfig {
            tolerance: 1e-12,
            max_iterations: Some(100)
        }
    }

    fn residual(a: &SparseMatrix, x: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
        b - a.multiply(x)
    }

    #[test]
    fn test_square_system() {
        // [4 1 0] [1]   [6]
        // [1 3 1] [2] = [10]
        // [0 1 2] [3]   [8]
        let a = SparseMatrix::from_triplets(
            3,
            3,
            &[(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0), (1, 2, 1.0), (2, 1, 1.0), (2, 2, 2.0)]
        );
        let solution = lsqr(&a, &dvector![6.0, 10.0, 8.0], &tight());

        assert!(solution.converged());
        assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.x[1], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.x[2], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_overdetermined_consistent_system() {
        // Four equations, two unknowns, exact solution (2, -1)
        let a = SparseMatrix::from_triplets(
            4,
            2,
            &[(0, 0, 1.0), (1, 1, 1.0), (2, 0, 1.0), (2, 1, 1.0), (3, 0, 1.0), (3, 1, -1.0)]
        );
        let solution = lsqr(&a, &dvector![2.0, -1.0, 1.0, 3.0], &tight());

        assert_eq!(solution.stop_reason, StopReason::Compatible);
        assert_abs_diff_eq!(solution.x[0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.x[1], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.residual_norm, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inconsistent_system_satisfies_normal_equations() {
        // Fit a constant to 1, 2, 6: least squares answer is the mean
        let a = SparseMatrix::from_triplets(3, 1, &[(0, 0, 1.0), (1, 0, 1.0), (2, 0, 1.0)]);
        let b = dvector![1.0, 2.0, 6.0];
        let solution = lsqr(&a, &b, &tight());

        assert!(solution.converged());
        assert_abs_diff_eq!(solution.x[0], 3.0, epsilon = 1e-6);

        let r = residual(&a, &solution.x, &b);
        assert_abs_diff_eq!(a.transpose_multiply(&r)[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.residual_norm, 14.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_rank_deficient_returns_minimum_norm() {
        // x + y = 2 has infinitely many solutions; the shortest is (1, 1)
        let a = SparseMatrix::from_triplets(1, 2, &[(0, 0, 1.0), (0, 1, 1.0)]);
        let solution = lsqr(&a, &dvector![2.0], &tight());

        assert_abs_diff_eq!(solution.x[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.x[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_untouched_column_stays_zero() {
        let a = SparseMatrix::from_triplets(2, 3, &[(0, 0, 1.0), (1, 1, 2.0)]);
        let solution = lsqr(&a, &dvector![3.0, 4.0], &tight());

        assert_abs_diff_eq!(solution.x[0], 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.x[1], 2.0, epsilon = 1e-9);
        assert_eq!(solution.x[2], 0.0);
    }

    #[test]
    fn test_zero_rhs() {
        let a = SparseMatrix::from_triplets(2, 2, &[(0, 0, 1.0), (1, 1, 1.0)]);
        let solution = lsqr(&a, &dvector![0.0, 0.0], &tight());

        assert_eq!(solution.stop_reason, StopReason::TrivialSolution);
        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.x, DVector::zeros(2));
    }

    #[test]
    fn test_iteration_limit_returns_best_iterate() {
        let a = SparseMatrix::from_triplets(
            3,
            3,
            &[(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0), (1, 2, 1.0), (2, 1, 1.0), (2, 2, 2.0)]
        );
        let b = dvector![6.0, 10.0, 8.0];
        let config = SolverConfig {
            tolerance: 1e-12,
            max_iterations: Some(1)
        };
        let solution = lsqr(&a, &b, &config);

        assert_eq!(solution.stop_reason, StopReason::IterationLimit);
        assert!(!solution.converged());
        assert_eq!(solution.iterations, 1);

        // One step already improves on x = 0
        let r_norm = residual(&a, &solution.x, &b).norm();
        assert!(r_norm < 200.0_f64.sqrt());
        assert_abs_diff_eq!(solution.residual_norm, r_norm, epsilon = 1e-9);
    }
}

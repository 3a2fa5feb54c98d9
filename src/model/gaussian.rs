//! Truncated-Gaussian moment corrections used by the skill update.
//!
//! `t` is the normalized mean performance difference between the winning and losing
//! alliance, `e` the normalized draw margin. The `v` functions return the additive mean
//! correction and the `w` functions the multiplicative variance correction obtained by
//! moment matching a Gaussian against a one-sided (win) or two-sided (draw) truncation.

use statrs::{
    consts::SQRT_2PI,
    function::erf::{erfc, erfc_inv}
};
use std::f64::consts::SQRT_2;

/// Below this value the cumulative density is treated as zero and the asymptotic
/// form of the win correction is used instead of the ratio.
const MIN_CDF: f64 = 2.222758749e-162;

/// Standard normal density `φ(x)`
pub fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

/// Standard normal cumulative distribution `Φ(x)`
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse of the standard normal cumulative distribution `Φ⁻¹(p)` for `p` in `(0, 1)`
pub fn ppf(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Mean correction for a win/loss factor: `φ(t - e) / Φ(t - e)`
pub fn v_win(t: f64, e: f64) -> f64 {
    let x = t - e;
    let denom = cdf(x);
    if denom < MIN_CDF {
        // φ(x) / Φ(x) → -x as x → -∞
        return -x;
    }

    pdf(x) / denom
}

/// Variance correction for a win/loss factor: `v · (v + t - e)`
pub fn w_win(t: f64, e: f64) -> f64 {
    let x = t - e;
    if cdf(x) < MIN_CDF {
        // Only reachable deep in the lower tail, where w → 1
        return 1.0;
    }

    let v = v_win(t, e);
    v * (v + x)
}

/// Mean correction for a draw factor, truncating to `[-e - t, e - t]`.
/// Returns 0 when the truncated interval carries no probability mass.
pub fn v_draw(t: f64, e: f64) -> f64 {
    let (a, b) = draw_bounds(t, e);
    let denom = cdf(b) - cdf(a);
    if denom == 0.0 {
        return 0.0;
    }

    (pdf(a) - pdf(b)) / denom
}

/// Variance correction for a draw factor.
/// Returns 0 when the truncated interval carries no probability mass.
pub fn w_draw(t: f64, e: f64) -> f64 {
    let (a, b) = draw_bounds(t, e);
    let denom = cdf(b) - cdf(a);
    if denom == 0.0 {
        return 0.0;
    }

    let pdf_a = pdf(a);
    let pdf_b = pdf(b);
    let v = (pdf_a - pdf_b) / denom;

    v * v - (a * pdf_a - b * pdf_b) / denom
}

fn draw_bounds(t: f64, e: f64) -> (f64, f64) {
    (-e - t, e - t)
}

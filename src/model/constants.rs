// Model constants
pub const MU: f64 = 25.0;
pub const SIGMA: f64 = MU / 3.0;
pub const BETA: f64 = SIGMA / 2.0;
pub const TAU: f64 = SIGMA / 100.0;
pub const DRAW_PROBABILITY: f64 = 0.1;

/// Lower bound on the multiplicative variance factor applied during an update.
/// Keeps sigma strictly positive no matter how confident the model becomes.
pub const VARIANCE_FLOOR: f64 = 1e-9;

/// Multiplier applied to sigma when computing the conservative score (`mu - k * sigma`).
pub const CONSERVATIVE_SIGMA_MULTIPLIER: f64 = 3.0;

// Contribution solver defaults
pub const SOLVER_TOLERANCE: f64 = 1e-8;
pub const SOLVER_CONDITION_LIMIT: f64 = 1e8;

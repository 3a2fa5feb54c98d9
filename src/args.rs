use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::Result,
    model::{
        constants::{DRAW_PROBABILITY, MU, SOLVER_TOLERANCE},
        rating_config::{RatingConfig, SolverConfig}
    },
    storage::match_log::LoadOptions
};

#[derive(Parser, Debug, Clone)]
#[command(
    display_name = "Alliance Rating",
    long_about = "Ranks 2-vs-2 alliance competitors from a log of match results"
)]
pub struct Args {
    /// CSV with columns red1, red2, blue1, blue2, red_score, blue_score and
    /// optionally season and time
    #[arg(short, long, env = "MATCHES_PATH", help = "Match log to process")]
    pub matches: PathBuf,

    /// Example: "2025-2026.*Push Back"
    #[arg(short, long, env = "SEASON", help = "Only use matches whose season matches this regex")]
    pub season: Option<String>,

    /// Competitors listed here are ranked with the prior rating when they
    /// played no in-scope match
    #[arg(short, long, env = "ROSTER_PATH", help = "File of known competitor ids, one per line")]
    pub roster: Option<PathBuf>,

    #[arg(short, long, env = "OUTPUT_PATH", default_value = "leaderboard.csv", help = "Leaderboard CSV to write")]
    pub output: PathBuf,

    #[arg(long, env = "RATINGS_JSON_PATH", help = "Optional JSON backup of every rating")]
    pub ratings_json: Option<PathBuf>,

    #[arg(long, env = "MU", default_value_t = MU, help = "Prior mean skill")]
    pub mu: f64,

    /// Defaults to mu / 3
    #[arg(long, env = "SIGMA", help = "Prior skill standard deviation")]
    pub sigma: Option<f64>,

    /// Defaults to sigma / 2
    #[arg(long, env = "BETA", help = "Performance spread around skill")]
    pub beta: Option<f64>,

    /// Defaults to sigma / 100
    #[arg(long, env = "TAU", help = "Skill drift added before every match")]
    pub tau: Option<f64>,

    #[arg(long, env = "DRAW_PROBABILITY", default_value_t = DRAW_PROBABILITY)]
    pub draw_probability: f64,

    #[arg(long, env = "SOLVER_TOLERANCE", default_value_t = SOLVER_TOLERANCE)]
    pub tolerance: f64,

    /// Defaults to twice the number of unknowns
    #[arg(long, env = "SOLVER_MAX_ITERATIONS")]
    pub max_iterations: Option<usize>,

    /// Matches without a usable time keep file order after timed ones
    #[arg(long, env = "SORT_BY_TIME", action = clap::ArgAction::SetTrue, help = "Order matches by the time column")]
    pub sort_by_time: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    /// Fills unset parameters from the mu family and validates the result.
    pub fn rating_config(&self) -> Result<RatingConfig> {
        let derived = RatingConfig::from_mu(self.mu);
        let sigma = self.sigma.unwrap_or(derived.sigma);

        let config = RatingConfig {
            mu: self.mu,
            sigma,
            beta: self.beta.unwrap_or(sigma / 2.0),
            tau: self.tau.unwrap_or(sigma / 100.0),
            draw_probability: self.draw_probability
        };
        config.validate()?;

        Ok(config)
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            season: self.season.clone(),
            sort_by_time: self.sort_by_time
        }
    }
}

use indexmap::IndexMap;
use tracing::info;

use self::{
    contribution_estimator::estimate,
    leaderboard::apply_roster_defaults,
    outcome_aggregator::OutcomeAggregator,
    rating_config::{RatingConfig, SolverConfig},
    skill_model::SkillModel,
    structures::{
        alliance_match::Match,
        belief::Belief,
        contribution::ContributionEstimate,
        leaderboard_entry::LeaderboardEntry,
        outcome_record::OutcomeRecord
    }
};

pub mod constants;
pub mod contribution_estimator;
pub mod gaussian;
pub mod leaderboard;
pub mod lsqr;
pub mod outcome_aggregator;
pub mod rating_config;
pub mod rating_tracker;
pub mod skill_model;
pub mod sparse;
pub mod structures;

pub use leaderboard::rank;

/// Runs the sequential skill update over `matches` in the given order.
pub fn update_ratings(matches: &[Match], config: &RatingConfig) -> IndexMap<String, Belief> {
    let mut model = SkillModel::new(*config);
    model.process(matches);

    model.rating_tracker.into_ratings()
}

pub fn aggregate_outcomes(matches: &[Match]) -> IndexMap<String, OutcomeRecord> {
    let mut aggregator = OutcomeAggregator::new();
    aggregator.process(matches);

    aggregator.into_records()
}

pub fn estimate_contributions(matches: &[Match], config: &SolverConfig) -> ContributionEstimate {
    estimate(matches, config)
}

/// # Leaderboard calculation
///
/// The three passes share nothing but the immutable match list, so they run as independent
/// tasks and are joined before ranking:
/// 1. Sequential skill update (order-dependent)
/// 2. Outcome counting
/// 3. Global contribution solve
///
/// `roster` lists competitors that should appear even without an in-scope match; they are
/// ranked with the prior belief. Without at least one valid match nothing is in scope and
/// the leaderboard is empty, roster or not.
pub fn calculate_leaderboard(
    matches: &[Match],
    rating_config: &RatingConfig,
    solver_config: &SolverConfig,
    roster: &[String]
) -> Vec<LeaderboardEntry> {
    if !matches.iter().any(Match::is_valid) {
        info!(matches = matches.len(), "No valid matches in scope, nothing to rank");
        return Vec::new();
    }

    let (mut beliefs, (outcomes, contributions)) = rayon::join(
        || update_ratings(matches, rating_config),
        || {
            rayon::join(
                || aggregate_outcomes(matches),
                || estimate_contributions(matches, solver_config)
            )
        }
    );

    apply_roster_defaults(&mut beliefs, roster, rating_config.prior());

    rank(&beliefs, &outcomes, &contributions)
}

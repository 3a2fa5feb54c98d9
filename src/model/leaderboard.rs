use std::cmp::Ordering;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::info;

use crate::model::structures::{
    belief::Belief,
    contribution::ContributionEstimate,
    leaderboard_entry::LeaderboardEntry,
    outcome_record::OutcomeRecord
};

/// Merges the three passes into a ranked leaderboard.
///
/// Every competitor with a belief gets an entry. Missing outcome records count as zero
/// matches, missing contributions as zero. Entries are ordered by conservative score,
/// descending, with equal scores broken by competitor id ascending so that the order never
/// depends on map iteration order.
pub fn rank(
    beliefs: &IndexMap<String, Belief>,
    outcomes: &IndexMap<String, OutcomeRecord>,
    contributions: &ContributionEstimate
) -> Vec<LeaderboardEntry> {
    let provisional = contributions.is_provisional();

    let entries = beliefs
        .iter()
        .map(|(id, belief)| {
            let record = outcomes.get(id).copied().unwrap_or_default();
            let contribution = contributions.get(id).copied().unwrap_or_default();

            LeaderboardEntry {
                rank: 0,
                id: id.clone(),
                mu: belief.mu,
                sigma: belief.sigma,
                conservative: belief.conservative(),
                wins: record.wins,
                losses: record.losses,
                draws: record.draws,
                matches_played: record.matches_played,
                win_percentage: record.win_percentage(),
                opr: contribution.opr,
                dpr: contribution.dpr,
                ccvm: contribution.ccvm(),
                provisional
            }
        })
        .sorted_by(compare_entries)
        .enumerate()
        .map(|(i, entry)| LeaderboardEntry { rank: i + 1, ..entry })
        .collect_vec();

    info!(entries = entries.len(), provisional, "Leaderboard ranked");
    entries
}

/// Adds the prior belief for every roster competitor that did not play an in-scope match.
/// Returns how many competitors were added.
pub fn apply_roster_defaults(beliefs: &mut IndexMap<String, Belief>, roster: &[String], prior: Belief) -> usize {
    let mut added = 0;
    for id in roster {
        if !beliefs.contains_key(id) {
            beliefs.insert(id.clone(), prior);
            added += 1;
        }
    }

    if added > 0 {
        info!(added, conservative = prior.conservative(), "Added roster competitors without matches");
    }

    added
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.conservative
        .total_cmp(&a.conservative)
        .then_with(|| a.id.cmp(&b.id))
}

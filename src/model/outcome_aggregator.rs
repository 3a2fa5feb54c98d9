use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    model::structures::{alliance_match::Match, match_outcome::MatchOutcome, outcome_record::OutcomeRecord},
    utils::progress_utils::progress_bar
};

/// Tallies wins, losses and draws per competitor. Pure counting, independent of the
/// skill model and of match order.
#[derive(Default)]
pub struct OutcomeAggregator {
    records: IndexMap<String, OutcomeRecord>
}

impl OutcomeAggregator {
    pub fn new() -> OutcomeAggregator {
        OutcomeAggregator::default()
    }

    pub fn process(&mut self, matches: &[Match]) {
        let progress_bar = progress_bar(matches.len() as u64, "Counting match outcomes".to_string());
        for m in matches {
            self.record_match(m);

            if let Some(bar) = &progress_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }

        info!(competitors = self.records.len(), "Match outcomes counted");
    }

    pub fn record_match(&mut self, match_: &Match) {
        if !match_.is_valid() {
            warn!(?match_, "Skipping match with missing or repeated competitor ids");
            return;
        }

        let outcome = match_.outcome();
        for id in match_.red.iter() {
            self.record(id, outcome, true);
        }
        for id in match_.blue.iter() {
            self.record(id, outcome, false);
        }
    }

    fn record(&mut self, id: &str, outcome: MatchOutcome, is_red: bool) {
        let record = self.records.entry(id.to_owned()).or_default();
        record.matches_played += 1;

        match (outcome, is_red) {
            (MatchOutcome::Draw, _) => record.draws += 1,
            (MatchOutcome::RedWin, true) | (MatchOutcome::BlueWin, false) => record.wins += 1,
            (MatchOutcome::RedWin, false) | (MatchOutcome::BlueWin, true) => record.losses += 1
        }
    }

    pub fn get_record(&self, id: &str) -> Option<&OutcomeRecord> {
        self.records.get(id)
    }

    pub fn into_records(self) -> IndexMap<String, OutcomeRecord> {
        self.records
    }
}

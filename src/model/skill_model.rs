use tracing::{debug, info, warn};

use crate::{
    model::{
        constants::VARIANCE_FLOOR,
        gaussian::{v_draw, v_win, w_draw, w_win},
        rating_config::RatingConfig,
        rating_tracker::RatingTracker,
        structures::{alliance_match::Match, belief::Belief, match_outcome::MatchOutcome}
    },
    utils::progress_utils::progress_bar
};

/// Sequential Bayesian skill filter for 2-vs-2 matches.
///
/// Every match updates the four competitors involved, starting from whatever the previous
/// matches left behind. The order in which matches are fed in therefore matters and must be
/// kept fixed by the caller.
pub struct SkillModel {
    pub config: RatingConfig,
    pub rating_tracker: RatingTracker,
    draw_margin: f64,
    processed: usize,
    skipped: usize
}

impl SkillModel {
    pub fn new(config: RatingConfig) -> SkillModel {
        SkillModel::with_tracker(config, RatingTracker::new(config.prior()))
    }

    /// Like [`SkillModel::new`], but every belief change is kept as a
    /// [`RatingAdjustment`](crate::model::structures::rating_adjustment::RatingAdjustment).
    pub fn with_history(config: RatingConfig) -> SkillModel {
        SkillModel::with_tracker(config, RatingTracker::with_history(config.prior()))
    }

    fn with_tracker(config: RatingConfig, rating_tracker: RatingTracker) -> SkillModel {
        SkillModel {
            rating_tracker,
            draw_margin: config.draw_margin(),
            config,
            processed: 0,
            skipped: 0
        }
    }

    pub fn process(&mut self, matches: &[Match]) {
        let progress_bar = progress_bar(matches.len() as u64, "Updating skill ratings".to_string());
        for m in matches {
            self.process_match(m);

            if let Some(bar) = &progress_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }

        info!(
            processed = self.processed,
            skipped = self.skipped,
            competitors = self.rating_tracker.len(),
            "Skill ratings updated"
        );
    }

    /// # Match update
    ///
    /// 1. Resolve (or create) the four competitors' beliefs.
    /// 2. Orient the match so that "team 1" is the winner. Draws keep the red/blue order.
    /// 3. Compute the joint performance spread `c` and the normalized mean difference `t`
    ///     and margin `e`.
    /// 4. Apply the win or draw corrections: team 1 moves up by `(var / c) · v`, team 2
    ///     moves down by the same factor, and every sigma shrinks by `(var / c²) · w`.
    ///
    /// Invalid matches (missing or repeated ids) are skipped without touching any state.
    pub fn process_match(&mut self, match_: &Match) {
        if !match_.is_valid() {
            warn!(?match_, "Skipping match with missing or repeated competitor ids");
            self.skipped += 1;
            return;
        }

        let red = [
            self.rating_tracker.get_or_insert(&match_.red[0]),
            self.rating_tracker.get_or_insert(&match_.red[1])
        ];
        let blue = [
            self.rating_tracker.get_or_insert(&match_.blue[0]),
            self.rating_tracker.get_or_insert(&match_.blue[1])
        ];

        let outcome = match_.outcome();
        let (winner_ids, loser_ids, winners, losers) = match outcome {
            MatchOutcome::BlueWin => (&match_.blue, &match_.red, blue, red),
            MatchOutcome::RedWin | MatchOutcome::Draw => (&match_.red, &match_.blue, red, blue)
        };

        let (new_winners, new_losers) = self.rate(winners, losers, outcome.is_draw());

        debug!(
            match_index = self.processed,
            %outcome,
            winner_mu = new_winners[0].mu,
            loser_mu = new_losers[0].mu,
            "Rated match"
        );

        for (id, belief) in winner_ids.iter().zip(new_winners) {
            self.rating_tracker.update(id, belief, self.processed);
        }
        for (id, belief) in loser_ids.iter().zip(new_losers) {
            self.rating_tracker.update(id, belief, self.processed);
        }

        self.processed += 1;
    }

    /// Rates one match given the nominal winners (team 1) and losers (team 2).
    /// Returns the new beliefs in the same order; nothing is written to the tracker.
    fn rate(&self, winners: [Belief; 2], losers: [Belief; 2], draw: bool) -> ([Belief; 2], [Belief; 2]) {
        let c = self.performance_spread(&winners, &losers);

        let delta_mu = team_mu(&winners) - team_mu(&losers);
        let margin = if draw { self.draw_margin } else { 0.0 };

        let t = delta_mu / c;
        let e = margin / c;

        let (v, w) = if draw {
            (v_draw(t, e), w_draw(t, e))
        } else {
            (v_win(t, e), w_win(t, e))
        };

        (
            winners.map(|b| self.update_belief(b, c, v, w, 1.0)),
            losers.map(|b| self.update_belief(b, c, v, w, -1.0))
        )
    }

    /// `c = sqrt(Σ sigma² + 4 · beta²)` over the four competitors
    fn performance_spread(&self, winners: &[Belief; 2], losers: &[Belief; 2]) -> f64 {
        let variance: f64 = winners.iter().chain(losers.iter()).map(Belief::variance).sum();

        (variance + 4.0 * self.config.beta.powi(2)).sqrt()
    }

    fn update_belief(&self, belief: Belief, c: f64, v: f64, w: f64, sign: f64) -> Belief {
        let variance = belief.variance() + self.config.tau.powi(2);
        let mu = belief.mu + sign * (variance / c) * v;
        let sigma = (variance * (1.0 - (variance / (c * c)) * w).max(VARIANCE_FLOOR)).sqrt();

        Belief::new(mu, sigma)
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn team_mu(team: &[Belief; 2]) -> f64 {
    team.iter().map(|b| b.mu).sum()
}

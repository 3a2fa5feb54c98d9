use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::structures::{belief::Belief, rating_adjustment::RatingAdjustment};

/// Holds the current belief of every competitor seen so far.
///
/// Competitors are created with the prior belief the first time a match references them
/// and are never removed. Iteration follows first-appearance order.
///
/// Per-competitor adjustment history is only kept when the tracker is built with
/// [`RatingTracker::with_history`].
pub struct RatingTracker {
    prior: Belief,
    ratings: IndexMap<String, Belief>,
    adjustments: Option<HashMap<String, Vec<RatingAdjustment>>>
}

impl RatingTracker {
    pub fn new(prior: Belief) -> RatingTracker {
        RatingTracker {
            prior,
            ratings: IndexMap::new(),
            adjustments: None
        }
    }

    pub fn with_history(prior: Belief) -> RatingTracker {
        RatingTracker {
            adjustments: Some(HashMap::new()),
            ..RatingTracker::new(prior)
        }
    }

    /// Returns the current belief for the competitor, creating it from the prior if needed.
    pub fn get_or_insert(&mut self, id: &str) -> Belief {
        if let Some(belief) = self.ratings.get(id) {
            return *belief;
        }

        self.ratings.insert(id.to_owned(), self.prior);
        self.prior
    }

    /// Replaces the competitor's belief, recording the adjustment when history is kept.
    pub fn update(&mut self, id: &str, belief: Belief, match_index: usize) {
        let previous = self.get_or_insert(id);

        if let Some(adjustments) = &mut self.adjustments {
            adjustments
                .entry(id.to_owned())
                .or_default()
                .push(RatingAdjustment {
                    match_index,
                    mu_before: previous.mu,
                    mu_after: belief.mu,
                    sigma_before: previous.sigma,
                    sigma_after: belief.sigma
                });
        }

        self.ratings.insert(id.to_owned(), belief);
    }

    pub fn get_rating(&self, id: &str) -> Option<&Belief> {
        self.ratings.get(id)
    }

    /// `None` when the competitor has no recorded adjustment or history is off
    pub fn get_rating_adjustments(&self, id: &str) -> Option<&Vec<RatingAdjustment>> {
        self.adjustments.as_ref()?.get(id)
    }

    pub fn ratings(&self) -> &IndexMap<String, Belief> {
        &self.ratings
    }

    pub fn into_ratings(self) -> IndexMap<String, Belief> {
        self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

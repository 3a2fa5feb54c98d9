pub mod alliance_match;
pub mod belief;
pub mod contribution;
pub mod leaderboard_entry;
pub mod match_outcome;
pub mod outcome_record;
pub mod rating_adjustment;

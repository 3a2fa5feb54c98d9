use crate::model::structures::alliance_match::Match;
use itertools::Itertools;
use rand::{seq::index::sample, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Competitor ids in the style of a team registry: `1A`, `2A`, ...
pub fn generate_competitor_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{}A", i)).collect()
}

pub fn generate_match(red: [&str; 2], blue: [&str; 2], red_score: u32, blue_score: u32) -> Match {
    Match::new(red, blue, red_score, blue_score)
}

/// Generates `n` matches between random, disjoint alliances drawn from `competitor_ids`.
/// Scores are random in `0..=100`, so roughly 1% of matches are draws.
///
/// Seeded, so repeated calls with the same input produce the same matches.
pub fn generate_matches(n: usize, competitor_ids: &[String]) -> Vec<Match> {
    if competitor_ids.len() < 4 {
        panic!("At least 4 competitors are needed to build a 2v2 match");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut matches = Vec::with_capacity(n);

    for _ in 0..n {
        let picked = sample(&mut rng, competitor_ids.len(), 4)
            .into_iter()
            .map(|i| competitor_ids[i].as_str())
            .collect_vec();

        matches.push(generate_match(
            [picked[0], picked[1]],
            [picked[2], picked[3]],
            rng.random_range(0..=100),
            rng.random_range(0..=100)
        ));
    }

    matches
}

/// Every pairing of two disjoint alliances among `competitor_ids`, scored by the linear
/// model `score = opr(a) + opr(b) - dpr(c) - dpr(d)` from the given true values.
/// Negative model scores are clamped to 0.
pub fn generate_round_robin(competitor_ids: &[String], opr: &[f64], dpr: &[f64]) -> Vec<Match> {
    let n = competitor_ids.len();
    let score = |a: usize, b: usize, c: usize, d: usize| -> u32 {
        let raw = opr[a] + opr[b] - dpr[c] - dpr[d];
        raw.round().max(0.0) as u32
    };

    let mut matches = Vec::new();
    for (a, b) in (0..n).tuple_combinations() {
        for (c, d) in (0..n).filter(|i| *i != a && *i != b).tuple_combinations() {
            // Each unordered pairing once
            if a > c {
                continue;
            }

            matches.push(generate_match(
                [competitor_ids[a].as_str(), competitor_ids[b].as_str()],
                [competitor_ids[c].as_str(), competitor_ids[d].as_str()],
                score(a, b, c, d),
                score(c, d, a, b)
            ));
        }
    }

    matches
}

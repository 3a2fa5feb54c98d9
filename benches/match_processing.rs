use alliance_rating::{
    model::{
        calculate_leaderboard, estimate_contributions,
        rating_config::{RatingConfig, SolverConfig},
        skill_model::SkillModel
    },
    utils::test_utils::{generate_competitor_ids, generate_matches}
};
use criterion::{criterion_group, criterion_main, Criterion};

fn process_matches(count_competitors: usize, count_matches: usize) {
    let ids = generate_competitor_ids(count_competitors);
    let matches = generate_matches(count_matches, &ids);

    let mut model = SkillModel::new(RatingConfig::default());
    model.process(&matches);
}

fn solve_contributions(count_competitors: usize, count_matches: usize) {
    let ids = generate_competitor_ids(count_competitors);
    let matches = generate_matches(count_matches, &ids);

    estimate_contributions(&matches, &SolverConfig::default());
}

fn full_leaderboard(count_competitors: usize, count_matches: usize) {
    let ids = generate_competitor_ids(count_competitors);
    let matches = generate_matches(count_matches, &ids);

    calculate_leaderboard(&matches, &RatingConfig::default(), &SolverConfig::default(), &ids);
}

fn group_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("match-processing");
    group.sample_size(25);
    group.bench_function("process: t=50,m=500", |b| b.iter(|| process_matches(50, 500)));
    group.bench_function("process: t=500,m=5000", |b| b.iter(|| process_matches(500, 5000)));
    group.bench_function("contributions: t=50,m=500", |b| b.iter(|| solve_contributions(50, 500)));
    group.bench_function("contributions: t=500,m=5000", |b| {
        b.iter(|| solve_contributions(500, 5000))
    });
    group.bench_function("leaderboard: t=500,m=5000", |b| b.iter(|| full_leaderboard(500, 5000)));
    group.finish();
}

criterion_group!(benches, group_call);
criterion_main!(benches);

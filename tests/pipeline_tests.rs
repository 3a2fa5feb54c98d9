mod common;

use std::fs;

use alliance_rating::{
    model::{
        calculate_leaderboard,
        rating_config::{RatingConfig, SolverConfig}
    },
    storage::{
        export::{write_leaderboard, write_ratings_json},
        match_log::{load_matches, LoadOptions},
        roster::load_roster,
        storage_structs::RatingBackup
    }
};
use approx::assert_abs_diff_eq;
use indexmap::IndexMap;

const MATCH_LOG: &str = "\
red1,red2,blue1,blue2,red_score,blue_score,season
1A,2A,3A,4A,40,22,2025-2026 Push Back
1A,3A,2A,4A,31,31,2025-2026 Push Back
,2A,3A,4A,10,0,2025-2026 Push Back
5A,6A,7A,8A,12,90,2024-2025 High Stakes
";

const ROSTER: &str = "\
# teams registered this season
1A
2A
3A
4A
9A
";

#[test]
fn test_match_log_to_leaderboard_files() {
    common::init_test_env();

    let dir = tempfile::tempdir().unwrap();
    let matches_path = dir.path().join("matches.csv");
    let roster_path = dir.path().join("roster.txt");
    let output_path = dir.path().join("leaderboard.csv");
    let json_path = dir.path().join("ratings.json");
    fs::write(&matches_path, MATCH_LOG).unwrap();
    fs::write(&roster_path, ROSTER).unwrap();

    let options = LoadOptions {
        season: Some("2025-2026.*Push Back".to_string()),
        sort_by_time: false
    };
    let (matches, report) = load_matches(&matches_path, &options).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(report.skipped_invalid, 1);
    assert_eq!(report.filtered_out, 1);

    let roster = load_roster(&roster_path).unwrap();
    let leaderboard = calculate_leaderboard(&matches, &RatingConfig::default(), &SolverConfig::default(), &roster);

    // Four competitors plus the roster-only team; the off-season teams never appear
    assert_eq!(leaderboard.len(), 5);
    assert!(leaderboard.iter().all(|e| !e.id.starts_with('5')));
    assert_eq!(leaderboard[0].id, "1A");
    assert_eq!(leaderboard[0].wins, 1);
    assert_eq!(leaderboard[0].draws, 1);
    assert_abs_diff_eq!(leaderboard[0].win_percentage, 75.0);

    let absent = leaderboard.iter().find(|e| e.id == "9A").unwrap();
    assert_eq!(absent.matches_played, 0);
    assert_abs_diff_eq!(absent.conservative, 0.0, epsilon = 1e-9);
    assert_eq!(absent.ccvm, 0.0);

    for (i, entry) in leaderboard.iter().enumerate() {
        assert_eq!(entry.rank, i + 1);
        assert!(entry.sigma > 0.0);
        assert!(!entry.provisional);
    }

    write_leaderboard(&output_path, &leaderboard).unwrap();
    write_ratings_json(&json_path, &leaderboard).unwrap();

    let csv = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Rank,Team,Mu,Sigma,Conservative Score,OPR,DPR,CCVM,Win Percentage");
    assert!(lines[1].starts_with("1,1A,"));

    let json: IndexMap<String, RatingBackup> = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.len(), 5);
    assert_eq!(json.keys().next().map(String::as_str), Some("1A"));
}

#[test]
fn test_empty_season_yields_nothing() {
    common::init_test_env();

    let dir = tempfile::tempdir().unwrap();
    let matches_path = dir.path().join("matches.csv");
    fs::write(&matches_path, MATCH_LOG).unwrap();

    let options = LoadOptions {
        season: Some("2030".to_string()),
        sort_by_time: false
    };
    let (matches, _) = load_matches(&matches_path, &options).unwrap();

    assert!(matches.is_empty());
    assert!(calculate_leaderboard(&matches, &RatingConfig::default(), &SolverConfig::default(), &[]).is_empty());
}

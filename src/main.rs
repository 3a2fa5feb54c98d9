use std::{error::Error, process::ExitCode};

use alliance_rating::{
    args::Args,
    error::Result,
    model::calculate_leaderboard,
    storage::{
        export::{write_leaderboard, write_ratings_json},
        match_log::load_matches,
        roster::load_roster
    }
};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let rating_config = args.rating_config()?;
    let solver_config = args.solver_config();
    info!(?rating_config, ?solver_config, "Starting alliance rating");

    let (matches, report) = load_matches(&args.matches, &args.load_options())?;
    if report.skipped_invalid > 0 {
        warn!(skipped = report.skipped_invalid, "Some match rows were invalid and ignored");
    }
    if matches.is_empty() {
        info!("No matches in scope, nothing to do");
        return Ok(());
    }

    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => Vec::new()
    };

    let leaderboard = calculate_leaderboard(&matches, &rating_config, &solver_config, &roster);
    if leaderboard.iter().any(|e| e.provisional) {
        warn!("Contribution solve did not converge, OPR, DPR and CCVM are provisional");
    }

    write_leaderboard(&args.output, &leaderboard)?;
    if let Some(path) = &args.ratings_json {
        write_ratings_json(path, &leaderboard)?;
    }

    for entry in leaderboard.iter().take(10) {
        info!(
            "{:>3}. {:<10} {:>7.2} (mu {:.2}, sigma {:.2}, ccvm {:.2})",
            entry.rank, entry.id, entry.conservative, entry.mu, entry.sigma, entry.ccvm
        );
    }

    Ok(())
}

use std::{fs::File, io::Write, path::Path};

use indexmap::IndexMap;
use tracing::info;

use crate::{
    error::{ProcessorError, Result},
    model::structures::leaderboard_entry::LeaderboardEntry,
    storage::storage_structs::{LeaderboardRow, RatingBackup}
};

pub fn write_leaderboard(path: impl AsRef<Path>, entries: &[LeaderboardEntry]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ProcessorError::io(path, e))?;
    write_leaderboard_to(file, entries)?;

    info!(path = %path.display(), entries = entries.len(), "Leaderboard written");
    Ok(())
}

/// Writes the leaderboard as CSV, one row per entry in rank order, values rounded to 2 decimals
pub fn write_leaderboard_to<W: Write>(writer: W, entries: &[LeaderboardEntry]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(LeaderboardRow::from(entry))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

pub fn write_ratings_json(path: impl AsRef<Path>, entries: &[LeaderboardEntry]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ProcessorError::io(path, e))?;
    write_ratings_json_to(file, entries)?;

    info!(path = %path.display(), entries = entries.len(), "Ratings backup written");
    Ok(())
}

/// `{ "<id>": { "mu": .., "sigma": .., "conservative": .. } }` in rank order
pub fn write_ratings_json_to<W: Write>(writer: W, entries: &[LeaderboardEntry]) -> Result<()> {
    let backup: IndexMap<&str, RatingBackup> = entries
        .iter()
        .map(|entry| (entry.id.as_str(), RatingBackup::from(entry)))
        .collect();

    serde_json::to_writer_pretty(writer, &backup)?;
    Ok(())
}

use std::{fs, path::Path};

use itertools::Itertools;
use tracing::info;

use crate::error::{ProcessorError, Result};

/// Reads a roster of known competitor ids, one per line.
/// Blank lines and lines starting with `#` are ignored; repeated ids are kept once.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ProcessorError::io(path, e))?;
    let roster = parse_roster(&contents);

    info!(path = %path.display(), competitors = roster.len(), "Roster read");
    Ok(roster)
}

pub fn parse_roster(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .unique()
        .map(str::to_string)
        .collect_vec()
}

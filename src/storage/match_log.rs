use std::{fs::File, io::Read, path::Path};

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    error::{ProcessorError, Result},
    model::structures::alliance_match::Match,
    storage::storage_structs::{MatchRow, REQUIRED_COLUMNS, SEASON_COLUMN, TIME_COLUMN}
};

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Regex searched for in the `season` column
    pub season: Option<String>,
    /// Order matches by the `time` column instead of file order
    pub sort_by_time: bool
}

/// Counts for one read of a match log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub loaded: usize,
    pub skipped_invalid: usize,
    pub filtered_out: usize,
    /// Loaded matches without a usable time, only counted when sorting by time
    pub untimed: usize
}

pub fn parse_season_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ProcessorError::InvalidSeasonPattern {
        pattern: pattern.to_string(),
        source
    })
}

pub fn load_matches(path: impl AsRef<Path>, options: &LoadOptions) -> Result<(Vec<Match>, LoadReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ProcessorError::io(path, e))?;

    info!(path = %path.display(), "Reading match log");
    read_matches(file, options)
}

/// Reads a CSV match log.
///
/// Rows missing a competitor id, repeating one within the match, or carrying a score that is
/// not a non-negative whole number are skipped with a warning. Structural problems (a missing
/// required column, malformed CSV) fail the read.
pub fn read_matches<R: Read>(reader: R, options: &LoadOptions) -> Result<(Vec<Match>, LoadReport)> {
    let season = options.season.as_deref().map(parse_season_pattern).transpose()?;

    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ProcessorError::MissingColumn(column.to_string()));
        }
    }
    if season.is_some() && !headers.iter().any(|h| h == SEASON_COLUMN) {
        return Err(ProcessorError::MissingColumn(SEASON_COLUMN.to_string()));
    }

    let sort_by_time = options.sort_by_time && headers.iter().any(|h| h == TIME_COLUMN);
    if options.sort_by_time && !sort_by_time {
        warn!("Match log has no time column, keeping file order");
    }

    let mut report = LoadReport::default();
    let mut timed: Vec<(Option<DateTime<FixedOffset>>, Match)> = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: MatchRow = record.deserialize(Some(&headers))?;
        report.rows += 1;

        if let Some(season) = &season {
            let in_season = non_blank(&row.season).is_some_and(|s| season.is_match(s));
            if !in_season {
                report.filtered_out += 1;
                continue;
            }
        }

        let m = match to_match(&row, line) {
            Ok(Some(m)) => m,
            Ok(None) => {
                warn!(line, "Skipping match with missing or repeated competitor ids");
                report.skipped_invalid += 1;
                continue;
            }
            Err(e) => {
                warn!(line, "Skipping match: {}", e);
                report.skipped_invalid += 1;
                continue;
            }
        };

        let time = if sort_by_time {
            let time = non_blank(&row.time).and_then(|t| DateTime::parse_from_rfc3339(t).ok());
            if time.is_none() {
                debug!(line, "Match has no usable time");
                report.untimed += 1;
            }
            time
        } else {
            None
        };

        timed.push((time, m));
    }

    if sort_by_time {
        // Stable: equal times and untimed matches keep file order, untimed go last
        timed.sort_by_key(|(time, _)| (time.is_none(), *time));
    }

    let matches: Vec<Match> = timed.into_iter().map(|(_, m)| m).collect();
    report.loaded = matches.len();

    info!(
        rows = report.rows,
        loaded = report.loaded,
        skipped = report.skipped_invalid,
        filtered = report.filtered_out,
        "Match log read"
    );

    Ok((matches, report))
}

fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn to_match(row: &MatchRow, line: u64) -> Result<Option<Match>> {
    let ids = [&row.red1, &row.red2, &row.blue1, &row.blue2].map(non_blank);
    let [Some(r1), Some(r2), Some(b1), Some(b2)] = ids else {
        return Ok(None);
    };

    let red_score = parse_score(row.red_score.as_deref().unwrap_or_default(), line)?;
    let blue_score = parse_score(row.blue_score.as_deref().unwrap_or_default(), line)?;

    let m = Match::new([r1, r2], [b1, b2], red_score, blue_score);
    Ok(m.is_valid().then_some(m))
}

/// Accepts `12` and the `12.0` spreadsheets tend to export
pub fn parse_score(value: &str, line: u64) -> Result<u32> {
    let invalid = || ProcessorError::InvalidScore {
        value: value.to_string(),
        line
    };

    let value = value.trim();
    if let Ok(score) = value.parse::<u32>() {
        return Ok(score);
    }

    let score: f64 = value.parse().map_err(|_| invalid())?;
    if !score.is_finite() || score < 0.0 || score.fract() != 0.0 || score > u32::MAX as f64 {
        return Err(invalid());
    }

    Ok(score as u32)
}

#[cfg(test)]
mod tests {
    use super::{parse_score, read_matches, LoadOptions, LoadReport};
    use crate::{error::ProcessorError, model::structures::alliance_match::Match};

    const LOG: &str = "\
red1,red2,blue1,blue2,red_score,blue_score,season,time
A,B,C,D,12,4,2025-2026 Push Back,2025-10-02T10:00:00Z
A,C,B,D,7,7,2025-2026 Push Back,2025-10-01T10:00:00Z
A,,C,D,3,1,2025-2026 Push Back,2025-10-03T10:00:00Z
E,F,G,H,5,2,2024-2025 High Stakes,2025-03-01T10:00:00Z
E,F,A,B,9.0,10,2025-2026 Push Back,
";

    fn read(options: &LoadOptions) -> (Vec<Match>, LoadReport) {
        read_matches(LOG.as_bytes(), options).unwrap()
    }

    #[test]
    fn test_reads_all_valid_rows_in_file_order() {
        let (matches, report) = read(&LoadOptions::default());

        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0], Match::new(["A", "B"], ["C", "D"], 12, 4));
        assert_eq!(matches[3], Match::new(["E", "F"], ["A", "B"], 9, 10));
        assert_eq!(report.rows, 5);
        assert_eq!(report.skipped_invalid, 1);
        assert_eq!(report.filtered_out, 0);
    }

    #[test]
    fn test_season_filter() {
        let options = LoadOptions {
            season: Some("2025-2026.*Push Back".to_string()),
            ..LoadOptions::default()
        };
        let (matches, report) = read(&options);

        assert_eq!(matches.len(), 3);
        assert_eq!(report.filtered_out, 1);
        assert!(matches.iter().all(|m| m.red[0] != "E" || m.blue[0] == "A"));
    }

    #[test]
    fn test_sort_by_time_puts_untimed_last() {
        let options = LoadOptions {
            sort_by_time: true,
            ..LoadOptions::default()
        };
        let (matches, report) = read(&options);

        assert_eq!(matches[0].red, ["E".to_string(), "F".to_string()]);
        assert_eq!(matches[0].blue, ["G".to_string(), "H".to_string()]);
        assert_eq!(matches[1], Match::new(["A", "C"], ["B", "D"], 7, 7));
        assert_eq!(matches[2], Match::new(["A", "B"], ["C", "D"], 12, 4));
        assert_eq!(matches[3], Match::new(["E", "F"], ["A", "B"], 9, 10));
        assert_eq!(report.untimed, 1);
    }

    #[test]
    fn test_missing_column() {
        let log = "red1,red2,blue1,blue2,red_score\nA,B,C,D,1\n";
        let result = read_matches(log.as_bytes(), &LoadOptions::default());

        assert!(matches!(result, Err(ProcessorError::MissingColumn(c)) if c == "blue_score"));
    }

    #[test]
    fn test_invalid_season_pattern() {
        let options = LoadOptions {
            season: Some("(".to_string()),
            ..LoadOptions::default()
        };
        let result = read_matches(LOG.as_bytes(), &options);

        assert!(matches!(result, Err(ProcessorError::InvalidSeasonPattern { .. })));
    }

    #[test]
    fn test_bad_scores_and_repeated_ids_are_skipped() {
        let log = "\
red1,red2,blue1,blue2,red_score,blue_score
A,B,C,D,ten,4
A,B,C,D,-1,4
A,B,C,D,2.5,4
A,B,A,D,3,4
A,B,C,D,,4
A,B,C,D,3,4
";
        let (matches, report) = read_matches(log.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(matches, vec![Match::new(["A", "B"], ["C", "D"], 3, 4)]);
        assert_eq!(report.skipped_invalid, 5);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("12", 1).unwrap(), 12);
        assert_eq!(parse_score(" 12.0 ", 1).unwrap(), 12);
        assert!(matches!(
            parse_score("abc", 7),
            Err(ProcessorError::InvalidScore { line: 7, .. })
        ));
        assert!(parse_score("NaN", 1).is_err());
    }

    #[test]
    fn test_empty_log() {
        let log = "red1,red2,blue1,blue2,red_score,blue_score\n";
        let (matches, report) = read_matches(log.as_bytes(), &LoadOptions::default()).unwrap();

        assert!(matches.is_empty());
        assert_eq!(report, LoadReport::default());
    }
}

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("Failed to read or write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize ratings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid season pattern {pattern:?}: {source}")]
    InvalidSeasonPattern {
        pattern: String,
        #[source]
        source: regex::Error
    },

    #[error("Match log is missing required column {0:?}")]
    MissingColumn(String),

    #[error("Invalid score {value:?} on line {line}")]
    InvalidScore { value: String, line: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String)
}

impl ProcessorError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> ProcessorError {
        ProcessorError::Io {
            path: path.into(),
            source
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;

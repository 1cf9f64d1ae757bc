//! Error types for the deduplication pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum SubuniqError {
    #[error("Error opening input file {path:?}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error creating output file {path:?}")]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported format '{0}'. Use plain, json, or csv.")]
    InvalidFormat(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Error writing output: {0}")]
    EncodingFailure(String),
}

impl From<io::Error> for SubuniqError {
    fn from(e: io::Error) -> Self {
        Self::EncodingFailure(e.to_string())
    }
}

impl From<csv::Error> for SubuniqError {
    fn from(e: csv::Error) -> Self {
        Self::EncodingFailure(format!("CSV: {}", e))
    }
}

impl From<serde_json::Error> for SubuniqError {
    fn from(e: serde_json::Error) -> Self {
        Self::EncodingFailure(format!("JSON: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, SubuniqError>;

//! Errors for a single scrape run.
//!
//! Every variant aborts the run before anything is delivered to a sink.

use std::path::PathBuf;

use crate::grid::GridError;
use crate::time::TimeError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("{path} is not a schedule document: {source}")]
    InvalidSchedule {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A required table is not in the page
    #[error("required table {selector:?} not found in the document")]
    MissingTable { selector: String },

    #[error("time grid has {rows} rows but there are {stations} stations")]
    StationCountMismatch { stations: usize, rows: usize },

    #[error("malformed time grid: {0}")]
    Shape(#[from] GridError),

    #[error("malformed cell {value:?} at station {station}, train {train}: {source}")]
    MalformedCell {
        station: usize,
        train: usize,
        value: String,
        source: TimeError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

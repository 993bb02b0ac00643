use std::path::PathBuf;

use thiserror::Error;

/// Why a route segment was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    #[error("segment has no points")]
    Empty,
    #[error("timestamps decrease at index {index}: {prev} then {next}")]
    OutOfOrder { index: usize, prev: f64, next: f64 },
}

/// A config which cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("time_step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
}

/// Failure to load an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

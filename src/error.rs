use std::path::PathBuf;
use thiserror::Error;

use crate::geom::BoundsError;
use crate::validation::ValidationReport;

/// The main error type for tilematch operations.
#[derive(Debug, Error)]
pub enum TilematchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tile specs from {path}: {source}")]
    TileSpecParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse feature specs from {path}: {source}")]
    FeatureSpecParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse engine config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tile {index} ({image_url}) has invalid bounds: {source}")]
    InvalidTileBounds {
        index: usize,
        image_url: String,
        #[source]
        source: BoundsError,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

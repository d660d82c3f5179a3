//! JSON reading and writing for tile-specification and feature files.
//!
//! Both file kinds are plain JSON arrays of objects. The shapes (and the
//! `(from_x, to_x, from_y, to_y)` bbox order inside them) match the persisted
//! files the acquisition pipeline produces, so these readers work on
//! existing data unchanged.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::{FeatureSpec, TileSpec};
use crate::error::TilematchError;

/// Reads a tile-specification file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed. Inconsistent
/// bounds inside a tile do *not* fail the read; they surface later from
/// validation or selection.
pub fn read_tiles_json(path: &Path) -> Result<Vec<TileSpec>, TilematchError> {
    let file = File::open(path).map_err(TilematchError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TilematchError::TileSpecParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a tile-specification file.
pub fn write_tiles_json(path: &Path, tiles: &[TileSpec]) -> Result<(), TilematchError> {
    let file = File::create(path).map_err(TilematchError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, tiles).map_err(|source| TilematchError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a feature file, keeping only the identity URLs.
pub fn read_features_json(path: &Path) -> Result<Vec<FeatureSpec>, TilematchError> {
    let file = File::open(path).map_err(TilematchError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| TilematchError::FeatureSpecParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads tile specifications from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Vec<TileSpec>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes tile specifications to a JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string(tiles: &[TileSpec]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tiles)
}

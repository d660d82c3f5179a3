//! Tile-specification model for tilematch.
//!
//! This module defines the in-memory form of persisted tile specifications
//! and feature-set references. The shapes mirror the JSON files produced by
//! the acquisition pipeline (`mipmapLevels` keyed by level, `bbox` as a
//! 4-number array in `(from_x, to_x, from_y, to_y)` order), so readers and
//! writers stay byte-compatible with existing data.
//!
//! # Design Principles
//!
//! 1. **Permissive Construction**: wire bounds are stored raw
//!    ([`RawBounds`]), so malformed values can be represented, reported by
//!    validation, and skipped on request, rather than making the parser
//!    reject whole files.
//!
//! 2. **Validated Core**: anything that actually computes overlap goes
//!    through [`TileSpec::bounds`], which resolves the raw values into a
//!    validated [`BoundingBox`](crate::geom::BoundingBox).

pub mod io_json;
mod model;

pub use model::{
    feature_index_by_url, FeatureSpec, MipmapLevel, RawBounds, TileSpec, FULL_RES_LEVEL,
};

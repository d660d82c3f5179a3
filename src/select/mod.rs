//! Candidate-pair selection over tile bounding boxes.
//!
//! Given the tiles of a mosaic section, this module decides which unordered
//! pairs are worth handing to the matching engine: exactly those whose
//! bounding boxes overlap. Selection is a pure function of the input
//! snapshot: no state is held across invocations and nothing is mutated.
//!
//! Two interchangeable algorithms are provided. The exhaustive scan is the
//! correctness oracle; the grid index is the scalable default and is
//! required to produce the identical pair set.

mod grid;
mod report;

pub use grid::GridIndex;
pub use report::{PairRecord, SelectionReport, SkipRecord};

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TilematchError;
use crate::geom::{BoundingBox, BoundsError};
use crate::tiles::TileSpec;

/// An unordered pair of tile indices whose bounding boxes overlap.
///
/// Always normalized to `a < b`, so each pair is representable (and
/// reported) exactly once.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
}

impl CandidatePair {
    /// Creates a normalized pair from two distinct indices.
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert_ne!(i, j, "a tile never pairs with itself");
        if i < j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

/// Pair-search algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// O(N²) scan over all pairs. Reference semantics; fine for small N.
    Exhaustive,
    /// Uniform grid over box extents; same result set, less work for
    /// spatially sparse tile sets.
    #[default]
    Grid,
}

/// What to do with a tile whose raw bounds fail validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidBoundsPolicy {
    /// Fail the whole batch on the first invalid tile.
    #[default]
    Fail,
    /// Exclude invalid tiles from all pairs and report them as skipped.
    Skip,
}

/// Options for [`select_tile_pairs`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectOptions {
    pub strategy: Strategy,
    pub on_invalid: InvalidBoundsPolicy,
}

/// A tile excluded from selection under [`InvalidBoundsPolicy::Skip`].
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedTile {
    /// Index of the tile in the input sequence.
    pub index: usize,
    /// Identity URL, when the tile has one.
    pub image_url: Option<String>,
    /// Why the tile's bounds failed validation.
    pub reason: BoundsError,
}

/// The result of selecting pairs from a tile sequence.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Overlapping pairs, indexed by position in the *input* sequence.
    pub pairs: BTreeSet<CandidatePair>,
    /// Tiles excluded under skip mode; empty under fail mode.
    pub skipped: Vec<SkippedTile>,
}

/// Exhaustive pairwise scan: the reference algorithm.
///
/// Each pair evaluation is independent, so the outer loop is distributed
/// across the rayon pool; the collected set is deterministic regardless.
///
/// ```
/// use tilematch::geom::BoundingBox;
/// use tilematch::select::{select_pairs, CandidatePair};
///
/// let boxes = vec![
///     BoundingBox::new(0.0, 10.0, 0.0, 10.0)?,
///     BoundingBox::new(5.0, 15.0, 5.0, 15.0)?,
///     BoundingBox::new(20.0, 30.0, 20.0, 30.0)?,
/// ];
/// let pairs = select_pairs(&boxes);
/// assert_eq!(pairs.into_iter().collect::<Vec<_>>(), vec![CandidatePair::new(0, 1)]);
/// # Ok::<(), tilematch::geom::BoundsError>(())
/// ```
pub fn select_pairs(boxes: &[BoundingBox]) -> BTreeSet<CandidatePair> {
    if boxes.len() < 2 {
        return BTreeSet::new();
    }

    (0..boxes.len() - 1)
        .into_par_iter()
        .flat_map_iter(|i| {
            ((i + 1)..boxes.len())
                .filter(move |&j| boxes[i].overlaps(&boxes[j]))
                .map(move |j| CandidatePair::new(i, j))
        })
        .collect()
}

/// Grid-indexed selection. Produces exactly the same set as
/// [`select_pairs`]; see [`GridIndex`] for the data structure.
pub fn select_pairs_indexed(boxes: &[BoundingBox]) -> BTreeSet<CandidatePair> {
    GridIndex::build(boxes).pairs(boxes)
}

/// Runs the chosen strategy over a box slice.
pub fn select_with(strategy: Strategy, boxes: &[BoundingBox]) -> BTreeSet<CandidatePair> {
    match strategy {
        Strategy::Exhaustive => select_pairs(boxes),
        Strategy::Grid => select_pairs_indexed(boxes),
    }
}

/// Selects candidate pairs from tile specifications.
///
/// Resolves each tile's raw wire bounds, applies the invalid-bounds policy,
/// and reports pairs under the tiles' original input indices (skipped tiles
/// leave gaps, they never shift later tiles' indices).
///
/// # Errors
/// Under [`InvalidBoundsPolicy::Fail`], the first tile with invalid bounds
/// aborts the batch with [`TilematchError::InvalidTileBounds`].
pub fn select_tile_pairs(
    tiles: &[TileSpec],
    opts: &SelectOptions,
) -> Result<Selection, TilematchError> {
    let mut boxes = Vec::with_capacity(tiles.len());
    let mut kept = Vec::with_capacity(tiles.len());
    let mut skipped = Vec::new();

    for (index, tile) in tiles.iter().enumerate() {
        match tile.bounds() {
            Ok(bbox) => {
                kept.push(index);
                boxes.push(bbox);
            }
            Err(source) => match opts.on_invalid {
                InvalidBoundsPolicy::Fail => {
                    return Err(TilematchError::InvalidTileBounds {
                        index,
                        image_url: tile.image_url().unwrap_or("<unknown>").to_string(),
                        source,
                    });
                }
                InvalidBoundsPolicy::Skip => {
                    tracing::debug!(index, %source, "skipping tile with invalid bounds");
                    skipped.push(SkippedTile {
                        index,
                        image_url: tile.image_url().map(str::to_string),
                        reason: source,
                    });
                }
            },
        }
    }

    let pairs = select_with(opts.strategy, &boxes)
        .into_iter()
        .map(|pair| CandidatePair::new(kept[pair.a], kept[pair.b]))
        .collect();

    Ok(Selection { pairs, skipped })
}

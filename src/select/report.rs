//! Selection report: the machine- and human-readable output of `pairs`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{Selection, SkippedTile};
use crate::tiles::TileSpec;

/// One reported candidate pair.
#[derive(Clone, Debug, Serialize)]
pub struct PairRecord {
    /// Input index of the first tile (`a < b`).
    pub a: usize,
    /// Input index of the second tile.
    pub b: usize,
    /// Identity URL of tile `a`, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    /// Identity URL of tile `b`, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    /// Feature-set index for tile `a`, when a feature file was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_a: Option<usize>,
    /// Feature-set index for tile `b`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_b: Option<usize>,
}

/// One skipped tile, with the reason rendered for output.
#[derive(Clone, Debug, Serialize)]
pub struct SkipRecord {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub reason: String,
}

impl From<&SkippedTile> for SkipRecord {
    fn from(skipped: &SkippedTile) -> Self {
        Self {
            index: skipped.index,
            image_url: skipped.image_url.clone(),
            reason: skipped.reason.to_string(),
        }
    }
}

/// The full result of a `pairs` run.
#[derive(Clone, Debug, Serialize)]
pub struct SelectionReport {
    pub tile_count: usize,
    pub pair_count: usize,
    pub pairs: Vec<PairRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkipRecord>,
}

impl SelectionReport {
    /// Assembles the report from a selection over `tiles`.
    ///
    /// With a feature index (identity URL → feature-set position), each pair
    /// is additionally labelled with the two feature-set indices the
    /// matching engine should be pointed at.
    pub fn build(
        tiles: &[TileSpec],
        selection: &Selection,
        feature_index: Option<&BTreeMap<String, usize>>,
    ) -> Self {
        let lookup = |url: Option<&str>| -> Option<usize> {
            let index = feature_index?;
            index.get(url?).copied()
        };

        let pairs: Vec<PairRecord> = selection
            .pairs
            .iter()
            .map(|pair| {
                let left = tiles[pair.a].image_url();
                let right = tiles[pair.b].image_url();
                PairRecord {
                    a: pair.a,
                    b: pair.b,
                    left: left.map(str::to_string),
                    right: right.map(str::to_string),
                    feature_a: lookup(left),
                    feature_b: lookup(right),
                }
            })
            .collect();

        Self {
            tile_count: tiles.len(),
            pair_count: pairs.len(),
            pairs,
            skipped: selection.skipped.iter().map(SkipRecord::from).collect(),
        }
    }
}

// Display is the text output of the CLI; kept line-oriented so it greps
// well in pipeline logs.
impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Selected {} candidate pair(s) from {} tile(s)",
            self.pair_count, self.tile_count
        )?;

        for pair in &self.pairs {
            write!(f, "  {} <-> {}", pair.a, pair.b)?;
            if let (Some(left), Some(right)) = (&pair.left, &pair.right) {
                write!(f, "  {} {}", left, right)?;
            }
            if let (Some(fa), Some(fb)) = (pair.feature_a, pair.feature_b) {
                write!(f, "  features {}:{}", fa, fb)?;
            }
            writeln!(f)?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped {} invalid tile(s):", self.skipped.len())?;
            for skip in &self.skipped {
                match &skip.image_url {
                    Some(url) => {
                        writeln!(f, "  tile {} ({}): {}", skip.index, url, skip.reason)?
                    }
                    None => writeln!(f, "  tile {}: {}", skip.index, skip.reason)?,
                }
            }
        }

        Ok(())
    }
}

//! Uniform grid index over bounding-box extents.
//!
//! The scaling answer to the exhaustive scan: boxes are binned into every
//! grid cell their extent covers, and pairs are only tested within a cell.
//! Any two overlapping boxes share the cell containing a point of their
//! intersection, so the per-cell scan sees every true pair; the final exact
//! `overlaps` test and the set-based dedup make the result identical to the
//! exhaustive scan.

use std::collections::BTreeSet;

use super::CandidatePair;
use crate::geom::BoundingBox;

/// A spatial index over a fixed snapshot of boxes.
///
/// Construction is a single upfront pass; queries afterwards are read-only.
pub struct GridIndex {
    origin_x: f64,
    origin_y: f64,
    cell_w: f64,
    cell_h: f64,
    nx: usize,
    ny: usize,
    cells: Vec<Vec<usize>>,
}

impl GridIndex {
    /// Builds an index over the given boxes.
    ///
    /// The grid covers the finite extent of the input with roughly
    /// `sqrt(N) x sqrt(N)` cells; infinite bounds clamp to the populated
    /// area and therefore land in every cell along their axis.
    pub fn build(boxes: &[BoundingBox]) -> Self {
        let (min_x, max_x) = finite_extent(boxes.iter().flat_map(|b| [b.from_x(), b.to_x()]));
        let (min_y, max_y) = finite_extent(boxes.iter().flat_map(|b| [b.from_y(), b.to_y()]));

        let per_axis = (boxes.len() as f64).sqrt().ceil().max(1.0) as usize;
        let nx = per_axis;
        let ny = per_axis;

        let cell_w = positive_cell_size(max_x - min_x, nx);
        let cell_h = positive_cell_size(max_y - min_y, ny);

        let mut index = Self {
            origin_x: min_x,
            origin_y: min_y,
            cell_w,
            cell_h,
            nx,
            ny,
            cells: vec![Vec::new(); nx * ny],
        };

        for (i, bbox) in boxes.iter().enumerate() {
            let (cx0, cx1) = index.col_span(bbox.from_x(), bbox.to_x());
            let (cy0, cy1) = index.row_span(bbox.from_y(), bbox.to_y());
            for cy in cy0..=cy1 {
                for cx in cx0..=cx1 {
                    index.cells[cy * index.nx + cx].push(i);
                }
            }
        }

        tracing::debug!(
            boxes = boxes.len(),
            nx = index.nx,
            ny = index.ny,
            "built grid index"
        );

        index
    }

    /// Emits all overlapping pairs for the snapshot the index was built on.
    ///
    /// `boxes` must be the same slice that was passed to [`GridIndex::build`].
    pub fn pairs(&self, boxes: &[BoundingBox]) -> BTreeSet<CandidatePair> {
        let mut pairs = BTreeSet::new();
        for cell in &self.cells {
            for (k, &i) in cell.iter().enumerate() {
                for &j in &cell[k + 1..] {
                    if boxes[i].overlaps(&boxes[j]) {
                        pairs.insert(CandidatePair::new(i, j));
                    }
                }
            }
        }
        pairs
    }

    fn col_span(&self, from: f64, to: f64) -> (usize, usize) {
        (
            cell_of(from, self.origin_x, self.cell_w, self.nx),
            cell_of(to, self.origin_x, self.cell_w, self.nx),
        )
    }

    fn row_span(&self, from: f64, to: f64) -> (usize, usize) {
        (
            cell_of(from, self.origin_y, self.cell_h, self.ny),
            cell_of(to, self.origin_y, self.cell_h, self.ny),
        )
    }
}

/// Min/max over the finite values of an axis; (0, 0) when none exist.
fn finite_extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn positive_cell_size(span: f64, cells: usize) -> f64 {
    if span > 0.0 {
        span / cells as f64
    } else {
        1.0
    }
}

fn cell_of(value: f64, origin: f64, cell_size: f64, cells: usize) -> usize {
    // Clamp first: infinite extents snap to the grid edges.
    let top = origin + cell_size * cells as f64;
    let clamped = value.clamp(origin, top);
    let cell = ((clamped - origin) / cell_size).floor() as usize;
    cell.min(cells - 1)
}

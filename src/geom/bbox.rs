//! Axis-aligned bounding boxes in global mosaic coordinates.
//!
//! A [`BoundingBox`] is a validated value: `from_x <= to_x` and
//! `from_y <= to_y` hold for every live box, so the fields are private and
//! construction is fallible. The wire representation (both the 4-element
//! array and the whitespace-delimited string) uses the order
//! `(from_x, to_x, from_y, to_y)`, per-axis rather than min-corner/max-corner.
//! Persisted tile specifications depend on that order, so it is a
//! compatibility contract and must not be "corrected".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two coordinate axes, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Error for bounds that cannot form a valid box.
///
/// Raised at construction time; an invalid box is never allowed to exist,
/// not even transiently.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BoundsError {
    /// An axis has `from > to`.
    #[error("inverted {axis} axis: from {from} > to {to}")]
    InvertedAxis { axis: Axis, from: f64, to: f64 },

    /// An axis bound is NaN and cannot be ordered at all.
    #[error("{axis} axis bound is not a number")]
    NotANumber { axis: Axis },
}

/// Error for a malformed serialized bounding-box representation.
#[derive(Debug, Error)]
pub enum ParseBoundsError {
    /// The string did not split into exactly four tokens.
    #[error("expected 4 whitespace-delimited values, found {found}")]
    TokenCount { found: usize },

    /// A token failed to parse as a floating-point number.
    #[error("value {position} ('{token}') is not a number: {source}")]
    InvalidNumber {
        position: usize,
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The four numbers parsed but describe an invalid box.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// An axis-aligned rectangle given by min/max extents on two axes.
///
/// # Example
/// ```
/// use tilematch::geom::BoundingBox;
///
/// let a = BoundingBox::new(0.0, 10.0, 0.0, 10.0)?;
/// let b = BoundingBox::new(5.0, 15.0, 5.0, 15.0)?;
/// assert!(a.overlaps(&b));
/// # Ok::<(), tilematch::geom::BoundsError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    from_x: f64,
    to_x: f64,
    from_y: f64,
    to_y: f64,
}

impl BoundingBox {
    /// Creates a box from explicit per-axis bounds.
    ///
    /// # Errors
    /// Fails with [`BoundsError`] if an axis is inverted (`from > to`) or a
    /// bound is NaN. Infinities are allowed: they are the unbounded sentinel
    /// used by [`BoundingBox::unbounded`].
    pub fn new(from_x: f64, to_x: f64, from_y: f64, to_y: f64) -> Result<Self, BoundsError> {
        check_axis(Axis::X, from_x, to_x)?;
        check_axis(Axis::Y, from_y, to_y)?;
        Ok(Self {
            from_x,
            to_x,
            from_y,
            to_y,
        })
    }

    /// The box spanning the full representable range on both axes.
    ///
    /// Overlaps every non-degenerate box; extending any box by it yields
    /// the unbounded box again.
    pub fn unbounded() -> Self {
        Self {
            from_x: f64::NEG_INFINITY,
            to_x: f64::INFINITY,
            from_y: f64::NEG_INFINITY,
            to_y: f64::INFINITY,
        }
    }

    /// Creates a box from values in wire order `(from_x, to_x, from_y, to_y)`.
    pub fn from_ordered(values: [f64; 4]) -> Result<Self, BoundsError> {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Serializes to wire order `(from_x, to_x, from_y, to_y)`.
    pub fn to_ordered(&self) -> [f64; 4] {
        [self.from_x, self.to_x, self.from_y, self.to_y]
    }

    /// Returns the minimum x extent.
    #[inline]
    pub fn from_x(&self) -> f64 {
        self.from_x
    }

    /// Returns the maximum x extent.
    #[inline]
    pub fn to_x(&self) -> f64 {
        self.to_x
    }

    /// Returns the minimum y extent.
    #[inline]
    pub fn from_y(&self) -> f64 {
        self.from_y
    }

    /// Returns the maximum y extent.
    #[inline]
    pub fn to_y(&self) -> f64 {
        self.to_y
    }

    /// Returns the width of the box (never negative).
    #[inline]
    pub fn width(&self) -> f64 {
        self.to_x - self.from_x
    }

    /// Returns the height of the box (never negative).
    #[inline]
    pub fn height(&self) -> f64 {
        self.to_y - self.from_y
    }

    /// Returns true if the box has zero extent on either axis.
    ///
    /// Degenerate boxes satisfy no strict-inequality overlap with themselves
    /// and never overlap boxes they merely touch.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.from_x == self.to_x || self.from_y == self.to_y
    }

    /// Returns true iff the open intervals on both axes intersect.
    ///
    /// All four comparisons are strict, so boxes sharing only an edge (a
    /// zero-width intersection) do not overlap. Full containment is covered
    /// as a special case of intersection; there is no separate containment
    /// branch. The predicate is symmetric.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from_x < other.to_x
            && self.to_x > other.from_x
            && self.from_y < other.to_y
            && self.to_y > other.from_y
    }

    /// Extends this box in place to the smallest box containing both `self`
    /// and `other`.
    ///
    /// A no-op when `other` is already contained. The union of two valid
    /// boxes is always valid.
    pub fn extend(&mut self, other: &Self) {
        self.from_x = self.from_x.min(other.from_x);
        self.from_y = self.from_y.min(other.from_y);
        self.to_x = self.to_x.max(other.to_x);
        self.to_y = self.to_y.max(other.to_y);
    }

    /// Non-mutating counterpart of [`BoundingBox::extend`].
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.extend(other);
        out
    }
}

fn check_axis(axis: Axis, from: f64, to: f64) -> Result<(), BoundsError> {
    if from.is_nan() || to.is_nan() {
        return Err(BoundsError::NotANumber { axis });
    }
    if from > to {
        return Err(BoundsError::InvertedAxis { axis, from, to });
    }
    Ok(())
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = BoundsError;

    fn try_from(values: [f64; 4]) -> Result<Self, Self::Error> {
        Self::from_ordered(values)
    }
}

/// Formats in wire order; `to_string` round-trips exactly through `parse`
/// for any box (Rust float formatting is shortest-exact).
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.from_x, self.to_x, self.from_y, self.to_y
        )
    }
}

impl FromStr for BoundingBox {
    type Err = ParseBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(ParseBoundsError::TokenCount {
                found: tokens.len(),
            });
        }

        let mut values = [0.0f64; 4];
        for (position, token) in tokens.iter().enumerate() {
            values[position] =
                token
                    .parse()
                    .map_err(|source| ParseBoundsError::InvalidNumber {
                        position,
                        token: (*token).to_string(),
                        source,
                    })?;
        }

        Ok(Self::from_ordered(values)?)
    }
}

// Custom serde implementations: the wire form is a bare 4-number array in
// (from_x, to_x, from_y, to_y) order, and deserialization must uphold the
// ordering invariant.
impl Serialize for BoundingBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_ordered().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = <[f64; 4]>::deserialize(deserializer)?;
        Self::from_ordered(values).map_err(serde::de::Error::custom)
    }
}

//! Geometry primitives for mosaic-space tiles.
//!
//! The only primitive the selector needs is an axis-aligned bounding box in
//! global mosaic coordinates, together with its validation and parse errors.

mod bbox;

pub use bbox::{Axis, BoundingBox, BoundsError, ParseBoundsError};

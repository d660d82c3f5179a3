//! Tile-set validation for tilematch.
//!
//! Checks tile specifications before selection:
//! - Geometric validity (finite, ordered bounds; degenerate-extent warnings)
//! - Identity integrity (a full-resolution URL exists and is unique)

mod report;

pub use report::{IssueCode, Severity, TileIssue, ValidationReport};

use std::collections::HashMap;

use crate::geom::BoundsError;
use crate::tiles::TileSpec;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a tile set and returns a report of all issues found.
pub fn validate_tiles(tiles: &[TileSpec], _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen_urls: HashMap<&str, usize> = HashMap::new();

    for (index, tile) in tiles.iter().enumerate() {
        validate_identity(tile, index, &mut seen_urls, &mut report);
        validate_bounds(tile, index, &mut report);
    }

    report
}

fn validate_identity<'a>(
    tile: &'a TileSpec,
    index: usize,
    seen_urls: &mut HashMap<&'a str, usize>,
    report: &mut ValidationReport,
) {
    match tile.image_url() {
        None => {
            report.add(TileIssue::error(
                IssueCode::MissingImageUrl,
                "no full-resolution mipmap entry",
                index,
            ));
        }
        Some("") => {
            report.add(TileIssue::warning(
                IssueCode::EmptyImageUrl,
                "empty image URL",
                index,
            ));
        }
        Some(url) => {
            if let Some(first_index) = seen_urls.get(url) {
                report.add(
                    TileIssue::error(
                        IssueCode::DuplicateImageUrl,
                        format!("duplicate image URL (first seen at tile {})", first_index),
                        index,
                    )
                    .with_url(url),
                );
            } else {
                seen_urls.insert(url, index);
            }
        }
    }
}

fn validate_bounds(tile: &TileSpec, index: usize, report: &mut ValidationReport) {
    let issue = match tile.bounds() {
        Err(source @ BoundsError::NotANumber { .. }) => {
            TileIssue::error(IssueCode::BoundsNotFinite, source.to_string(), index)
        }
        Err(source @ BoundsError::InvertedAxis { .. }) => {
            TileIssue::error(IssueCode::InvertedBounds, source.to_string(), index)
        }
        Ok(bbox) if bbox.is_degenerate() => TileIssue::warning(
            IssueCode::DegenerateBounds,
            "zero extent on an axis; tile can never pair",
            index,
        ),
        Ok(_) => return,
    };

    let issue = match tile.image_url() {
        Some(url) if !url.is_empty() => issue.with_url(url),
        _ => issue,
    };
    report.add(issue);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BoundingBox;
    use crate::tiles::RawBounds;

    fn valid_tiles() -> Vec<TileSpec> {
        vec![
            TileSpec::new(
                "file://tiles/a.png",
                BoundingBox::new(0.0, 10.0, 0.0, 10.0).unwrap(),
            ),
            TileSpec::new(
                "file://tiles/b.png",
                BoundingBox::new(5.0, 15.0, 5.0, 15.0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_valid_tiles_are_clean() {
        let report = validate_tiles(&valid_tiles(), &ValidateOptions::default());
        assert!(report.is_clean(), "expected no issues, got: {:?}", report.issues);
    }

    #[test]
    fn test_inverted_bounds() {
        let mut tiles = valid_tiles();
        tiles[1].bbox = RawBounds([15.0, 5.0, 5.0, 15.0]);

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::InvertedBounds && i.index == 1));
    }

    #[test]
    fn test_nan_bounds() {
        let mut tiles = valid_tiles();
        tiles[0].bbox = RawBounds([f64::NAN, 10.0, 0.0, 10.0]);

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::BoundsNotFinite));
    }

    #[test]
    fn test_degenerate_bounds_is_warning() {
        let mut tiles = valid_tiles();
        tiles[0].bbox = RawBounds([3.0, 3.0, 0.0, 10.0]);

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::DegenerateBounds));
    }

    #[test]
    fn test_duplicate_image_url() {
        let mut tiles = valid_tiles();
        tiles.push(tiles[0].clone());

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::DuplicateImageUrl && i.index == 2));
    }

    #[test]
    fn test_missing_image_url() {
        let mut tiles = valid_tiles();
        tiles[0].mipmap_levels.clear();

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::MissingImageUrl));
    }

    #[test]
    fn test_empty_image_url_is_warning() {
        let mut tiles = valid_tiles();
        tiles[0].mipmap_levels.get_mut("0").unwrap().image_url = String::new();

        let report = validate_tiles(&tiles, &ValidateOptions::default());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::EmptyImageUrl));
    }
}

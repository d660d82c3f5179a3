//! Core tile and feature-set model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{BoundingBox, BoundsError};

/// The mipmap level that carries a tile's identity URL.
pub const FULL_RES_LEVEL: &str = "0";

/// One mipmap level of a tile: a resolution-specific image URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MipmapLevel {
    /// URL of the image at this level.
    #[serde(rename = "imageUrl")]
    pub image_url: String,

    /// Optional mask image URL.
    #[serde(rename = "maskUrl", default, skip_serializing_if = "Option::is_none")]
    pub mask_url: Option<String>,
}

impl MipmapLevel {
    /// Creates a level with the given image URL and no mask.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            mask_url: None,
        }
    }
}

/// Raw wire bounds in `(from_x, to_x, from_y, to_y)` order.
///
/// Deliberately unvalidated so that tile files with inconsistent bounds can
/// still be loaded, reported, and optionally skipped. Resolve to a checked
/// box with [`RawBounds::resolve`] before any geometric use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBounds(pub [f64; 4]);

impl RawBounds {
    /// Validates the raw values into a [`BoundingBox`].
    pub fn resolve(&self) -> Result<BoundingBox, BoundsError> {
        BoundingBox::from_ordered(self.0)
    }
}

impl From<BoundingBox> for RawBounds {
    fn from(bbox: BoundingBox) -> Self {
        Self(bbox.to_ordered())
    }
}

/// A tile of the mosaic: identity, mipmap image URLs, and a bounding box in
/// global mosaic coordinates.
///
/// The core only reads the identity and the bounds; feature data associated
/// with a tile lives in a separate feature file and is referenced by the
/// identity URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    /// Image URLs keyed by mipmap level; level `"0"` is the identity.
    #[serde(rename = "mipmapLevels")]
    pub mipmap_levels: BTreeMap<String, MipmapLevel>,

    /// Bounding box in `(from_x, to_x, from_y, to_y)` wire order.
    pub bbox: RawBounds,

    /// Optional section/layer index within the stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,
}

impl TileSpec {
    /// Creates a tile with a single full-resolution level and validated
    /// bounds.
    pub fn new(image_url: impl Into<String>, bbox: BoundingBox) -> Self {
        let mut mipmap_levels = BTreeMap::new();
        mipmap_levels.insert(FULL_RES_LEVEL.to_string(), MipmapLevel::new(image_url));
        Self {
            mipmap_levels,
            bbox: bbox.into(),
            layer: None,
        }
    }

    /// The tile's identity: the full-resolution image URL, if present.
    pub fn image_url(&self) -> Option<&str> {
        self.mipmap_levels
            .get(FULL_RES_LEVEL)
            .map(|level| level.image_url.as_str())
    }

    /// Resolves the raw wire bounds into a validated box.
    pub fn bounds(&self) -> Result<BoundingBox, BoundsError> {
        self.bbox.resolve()
    }
}

/// A feature-set reference from a feature file.
///
/// Feature files carry per-tile descriptor data; the core only needs each
/// entry's identity URL to map candidate pairs onto feature-set indices.
/// Unknown fields (the descriptors themselves) are ignored on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Image URLs keyed by mipmap level, same shape as [`TileSpec`].
    #[serde(rename = "mipmapLevels")]
    pub mipmap_levels: BTreeMap<String, MipmapLevel>,
}

impl FeatureSpec {
    /// The identity URL of the tile this feature set belongs to.
    pub fn image_url(&self) -> Option<&str> {
        self.mipmap_levels
            .get(FULL_RES_LEVEL)
            .map(|level| level.image_url.as_str())
    }
}

/// Builds the identity-URL → feature-set-index lookup for a feature file.
///
/// When the same URL appears twice, the first entry wins.
pub fn feature_index_by_url(features: &[FeatureSpec]) -> BTreeMap<String, usize> {
    let mut index = BTreeMap::new();
    for (position, feature) in features.iter().enumerate() {
        if let Some(url) = feature.image_url() {
            index.entry(url.to_string()).or_insert(position);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(url: &str, bounds: [f64; 4]) -> TileSpec {
        TileSpec {
            mipmap_levels: BTreeMap::from([(
                FULL_RES_LEVEL.to_string(),
                MipmapLevel::new(url),
            )]),
            bbox: RawBounds(bounds),
            layer: None,
        }
    }

    #[test]
    fn test_image_url_reads_level_zero() {
        let t = tile("file://tiles/a.png", [0.0, 10.0, 0.0, 10.0]);
        assert_eq!(t.image_url(), Some("file://tiles/a.png"));

        let no_levels = TileSpec {
            mipmap_levels: BTreeMap::new(),
            bbox: RawBounds([0.0, 1.0, 0.0, 1.0]),
            layer: None,
        };
        assert_eq!(no_levels.image_url(), None);
    }

    #[test]
    fn test_bounds_resolution() {
        let ok = tile("file://a.png", [0.0, 10.0, 0.0, 10.0]);
        assert!(ok.bounds().is_ok());

        let inverted = tile("file://b.png", [5.0, 2.0, 0.0, 1.0]);
        assert!(inverted.bounds().is_err());
    }

    #[test]
    fn test_serde_wire_shape() {
        let t = tile("file://tiles/a.png", [0.0, 10.0, 0.0, 10.0]);
        let json = serde_json::to_string(&t).unwrap();

        // Key spellings and bbox order are the compatibility contract.
        assert!(json.contains("\"mipmapLevels\""));
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"bbox\":[0.0,10.0,0.0,10.0]"));

        let restored: TileSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }

    #[test]
    fn test_feature_index_by_url() {
        let features = vec![
            FeatureSpec {
                mipmap_levels: BTreeMap::from([(
                    FULL_RES_LEVEL.to_string(),
                    MipmapLevel::new("file://b.png"),
                )]),
            },
            FeatureSpec {
                mipmap_levels: BTreeMap::from([(
                    FULL_RES_LEVEL.to_string(),
                    MipmapLevel::new("file://a.png"),
                )]),
            },
        ];

        let index = feature_index_by_url(&features);
        assert_eq!(index.get("file://b.png"), Some(&0));
        assert_eq!(index.get("file://a.png"), Some(&1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_feature_file_extra_fields_ignored() {
        let json = r#"{
            "mipmapLevels": {"0": {"imageUrl": "file://a.png"}},
            "featureList": [[1.0, 2.0], [3.0, 4.0]],
            "featureCount": 2
        }"#;
        let feature: FeatureSpec = serde_json::from_str(json).unwrap();
        assert_eq!(feature.image_url(), Some("file://a.png"));
    }
}

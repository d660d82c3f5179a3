#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use tilematch::geom::BoundingBox;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A finite valid box with strictly positive extent on both axes.
pub fn arb_nondegenerate_bbox() -> BoxedStrategy<BoundingBox> {
    (
        -1.0e6..1.0e6f64,
        0.001..500.0f64,
        -1.0e6..1.0e6f64,
        0.001..500.0f64,
    )
        .prop_map(|(from_x, width, from_y, height)| {
            BoundingBox::new(from_x, from_x + width, from_y, from_y + height)
                .expect("valid by construction")
        })
        .boxed()
}

/// A finite valid box with zero extent on one axis.
pub fn arb_degenerate_bbox() -> BoxedStrategy<BoundingBox> {
    (
        -1.0e6..1.0e6f64,
        -1.0e6..1.0e6f64,
        0.0..500.0f64,
        any::<bool>(),
    )
        .prop_map(|(x, y, span, zero_width)| {
            if zero_width {
                BoundingBox::new(x, x, y, y + span)
            } else {
                BoundingBox::new(x, x + span, y, y)
            }
            .expect("valid by construction")
        })
        .boxed()
}

/// Any finite valid box, degenerate shapes included.
pub fn arb_bbox() -> BoxedStrategy<BoundingBox> {
    prop_oneof![
        8 => arb_nondegenerate_bbox(),
        1 => arb_degenerate_bbox(),
    ]
    .boxed()
}

/// A vector of boxes for selector tests.
pub fn arb_boxes(max_len: usize) -> BoxedStrategy<Vec<BoundingBox>> {
    proptest::collection::vec(arb_bbox(), 0..=max_len).boxed()
}

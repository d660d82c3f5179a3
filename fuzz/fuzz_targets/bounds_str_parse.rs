//! Fuzz target for delimited bounds-string parsing.
//!
//! This fuzzer feeds arbitrary UTF-8 strings to the bounding-box parser,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tilematch::geom::BoundingBox;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = text.parse::<BoundingBox>();
});

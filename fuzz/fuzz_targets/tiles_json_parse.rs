//! Fuzz target for tile-specification JSON parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tilematch::tiles::io_json::from_json_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(tiles) = from_json_str(text) {
        // Resolution of permissively-parsed bounds must never panic either.
        for tile in &tiles {
            let _ = tile.bounds();
            let _ = tile.image_url();
        }
    }
});

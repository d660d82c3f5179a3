use std::path::Path;

use tilematch::tiles::io_json::{read_tiles_json, write_tiles_json};

#[test]
fn fixture_preserves_wire_order() {
    let tiles =
        read_tiles_json(Path::new("tests/fixtures/sample_valid.tiles.json")).unwrap();
    assert_eq!(tiles.len(), 3);

    // bbox arrays are (from_x, to_x, from_y, to_y): the second value is the
    // x maximum, not the y minimum.
    let bbox = tiles[1].bounds().unwrap();
    assert_eq!(bbox.from_x(), 5.0);
    assert_eq!(bbox.to_x(), 15.0);
    assert_eq!(bbox.from_y(), 5.0);
    assert_eq!(bbox.to_y(), 15.0);

    assert_eq!(tiles[0].image_url(), Some("file://tiles/col0_row0.png"));
    assert_eq!(tiles[0].layer, Some(1));
}

#[test]
fn write_read_roundtrip() {
    let tiles =
        read_tiles_json(Path::new("tests/fixtures/sample_valid.tiles.json")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiles.json");
    write_tiles_json(&path, &tiles).unwrap();

    let restored = read_tiles_json(&path).unwrap();
    assert_eq!(tiles, restored);
}

#[test]
fn invalid_fixture_loads_permissively() {
    // Inconsistent bounds are a selection/validation concern, not a parse
    // failure.
    let tiles =
        read_tiles_json(Path::new("tests/fixtures/sample_invalid.tiles.json")).unwrap();
    assert_eq!(tiles.len(), 4);
    assert!(tiles[1].bounds().is_err());
    assert!(tiles[0].bounds().is_ok());
}

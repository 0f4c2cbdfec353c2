//! Fixture loading for the ingestion behaviour tests.
//!
//! Fixtures are checked in as base64 so the PBF bytes survive text-only
//! tooling; each test materialises its own temporary `.osm.pbf` copy.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::{fs, path::PathBuf};
use tempfile::TempPath;

/// Directory holding the `*.osm.pbf.b64` fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Write the decoded `<stem>.osm.pbf.b64` fixture to a temporary file.
pub fn decode_fixture(stem: &str) -> TempPath {
    let source = fixtures_dir().join(format!("{stem}.osm.pbf.b64"));
    let text = fs::read_to_string(&source)
        .unwrap_or_else(|err| panic!("cannot read fixture {source:?}: {err}"));
    let compact: String = text.split_whitespace().collect();
    let bytes = STANDARD
        .decode(compact)
        .unwrap_or_else(|err| panic!("fixture {source:?} is not base64: {err}"));
    let target = tempfile::Builder::new()
        .prefix(stem)
        .suffix(".osm.pbf")
        .tempfile()
        .unwrap_or_else(|err| panic!("cannot create a temporary {stem} fixture: {err}"))
        .into_temp_path();
    fs::write(&target, bytes).unwrap_or_else(|err| panic!("cannot write {target:?}: {err}"));
    target
}

/// Assert two coordinates in degrees agree to within a nanodegree.
pub fn assert_degrees(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected} degrees, found {actual}"
    );
}

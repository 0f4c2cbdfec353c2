//! Behavioural tests for tile addressing.

use boundline_core::{Tile, TileError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs, path::PathBuf};

/// How the scenario asks for a tile.
#[derive(Debug, Clone)]
enum TileRequest {
    QuadTree(String),
    Position { lat: f64, lon: f64, zoom: u8 },
}

#[fixture]
fn request() -> RefCell<Option<TileRequest>> {
    RefCell::new(None)
}

#[fixture]
fn resolved() -> RefCell<Option<Result<Tile, TileError>>> {
    RefCell::new(None)
}

fn expect_tile(resolved: &RefCell<Option<Result<Tile, TileError>>>) -> Tile {
    match resolved.borrow().as_ref().expect("tile was resolved") {
        Ok(tile) => *tile,
        Err(err) => panic!("expected a tile, got {err}"),
    }
}

#[given("the QuadTree key \"120\"")]
fn valid_key(#[from(request)] request: &RefCell<Option<TileRequest>>) {
    *request.borrow_mut() = Some(TileRequest::QuadTree("120".to_owned()));
}

#[given("the QuadTree key \"1204\"")]
fn malformed_key(#[from(request)] request: &RefCell<Option<TileRequest>>) {
    *request.borrow_mut() = Some(TileRequest::QuadTree("1204".to_owned()));
}

#[given("the position at latitude {lat} and longitude {lon} on zoom {zoom}")]
fn position(lat: f64, lon: f64, zoom: u8, #[from(request)] request: &RefCell<Option<TileRequest>>) {
    *request.borrow_mut() = Some(TileRequest::Position { lat, lon, zoom });
}

#[when("the tile is resolved")]
fn resolve(
    #[from(request)] request: &RefCell<Option<TileRequest>>,
    #[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>,
) {
    let outcome = match request.borrow().clone().expect("request prepared") {
        TileRequest::QuadTree(key) => key.parse::<Tile>(),
        TileRequest::Position { lat, lon, zoom } => Tile::for_lat_lon(lat, lon, zoom),
    };
    *resolved.borrow_mut() = Some(outcome);
}

#[then("the tile is at zoom {zoom}")]
fn tile_zoom(zoom: u8, #[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>) {
    assert_eq!(expect_tile(resolved).zoom(), zoom);
}

#[then("the Google coordinates are {x} and {y}")]
fn google_coordinates(
    x: u32,
    y: u32,
    #[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>,
) {
    assert_eq!(expect_tile(resolved).to_google(), (x, y));
}

#[then("the TMS row is {row}")]
fn tms_row(row: u32, #[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>) {
    assert_eq!(expect_tile(resolved).to_tms().1, row);
}

#[then("the tile bounds touch the origin")]
fn bounds_touch_origin(#[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>) {
    let bounds = expect_tile(resolved).bounds();
    // The origin sits on a tile corner and resolves to the north-west tile.
    assert!(bounds.south_west.latitude.abs() < 1e-9, "{bounds:?}");
    assert!(bounds.north_east.longitude.abs() < 1e-9, "{bounds:?}");
    assert_eq!(bounds.south_west.longitude, -180.0);
    assert!(bounds.north_east.latitude > 85.0);
}

#[then("an invalid digit error is reported at position {position}")]
fn invalid_digit(
    position: usize,
    #[from(resolved)] resolved: &RefCell<Option<Result<Tile, TileError>>>,
) {
    let borrowed = resolved.borrow();
    match borrowed.as_ref().expect("tile was resolved") {
        Err(TileError::InvalidQuadTreeDigit { digit, position: at }) => {
            assert_eq!(*digit, '4');
            assert_eq!(*at, position);
        }
        other => panic!("expected an invalid digit error, got {other:?}"),
    }
}

#[test]
fn scenario_indices_follow_feature_order() {
    let feature =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/features/tile_addressing.feature");
    let contents = fs::read_to_string(&feature).unwrap_or_else(|err| {
        panic!("failed to read feature file {feature:?}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles,
        [
            "decoding a QuadTree key",
            "locating the tile under a coordinate",
            "rejecting a malformed QuadTree key",
        ],
        "scenario order changed in feature file"
    );
}

#[scenario(path = "tests/features/tile_addressing.feature", index = 0)]
fn decoding_a_quad_tree_key(
    request: RefCell<Option<TileRequest>>,
    resolved: RefCell<Option<Result<Tile, TileError>>>,
) {
    let _ = (request, resolved);
}

#[scenario(path = "tests/features/tile_addressing.feature", index = 1)]
fn locating_a_coordinate(
    request: RefCell<Option<TileRequest>>,
    resolved: RefCell<Option<Result<Tile, TileError>>>,
) {
    let _ = (request, resolved);
}

#[scenario(path = "tests/features/tile_addressing.feature", index = 2)]
fn rejecting_a_malformed_key(
    request: RefCell<Option<TileRequest>>,
    resolved: RefCell<Option<Result<Tile, TileError>>>,
) {
    let _ = (request, resolved);
}

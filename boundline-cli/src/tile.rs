//! Tile command implementation for the boundline CLI.

use std::io::Write;

use boundline_core::{Tile, TileBounds};
use clap::{ArgGroup, Args};
use serde::Serialize;

use crate::{ARG_QUAD_KEY, CliError};

/// CLI arguments for the `tile` subcommand.
#[derive(Debug, Clone, Args, Default)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["quad_key", "lat"])
))]
pub(crate) struct TileArgs {
    /// Microsoft QuadTree key, for example `120`.
    #[arg(long = ARG_QUAD_KEY, value_name = "key")]
    pub(crate) quad_key: Option<String>,
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true, requires_all = ["lon", "zoom"])]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub(crate) lon: Option<f64>,
    /// Zoom level of the tile containing the position.
    #[arg(long, requires = "lat")]
    pub(crate) zoom: Option<u8>,
}

/// Column and row of a tile in one addressing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct TileXy {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

impl From<(u32, u32)> for TileXy {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// JSON document printed by `boundline tile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TileReport {
    pub(crate) zoom: u8,
    pub(crate) tms: TileXy,
    pub(crate) google: TileXy,
    pub(crate) quad_tree: String,
    pub(crate) bounds: TileBounds,
}

impl From<Tile> for TileReport {
    fn from(tile: Tile) -> Self {
        Self {
            zoom: tile.zoom(),
            tms: tile.to_tms().into(),
            google: tile.to_google().into(),
            quad_tree: tile.to_quad_tree(),
            bounds: tile.bounds(),
        }
    }
}

pub(crate) fn resolve_tile(args: &TileArgs) -> Result<Tile, CliError> {
    if let Some(key) = &args.quad_key {
        return Ok(Tile::from_quad_tree(key)?);
    }
    let (Some(lat), Some(lon), Some(zoom)) = (args.lat, args.lon, args.zoom) else {
        return Err(CliError::MissingTileTarget);
    };
    Ok(Tile::for_lat_lon(lat, lon, zoom)?)
}

pub(crate) fn run_tile(args: &TileArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_tile_with(args, &mut stdout)
}

pub(crate) fn run_tile_with(args: &TileArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let report = TileReport::from(resolve_tile(args)?);
    let payload =
        serde_json::to_string_pretty(&report).map_err(CliError::SerialiseTileReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

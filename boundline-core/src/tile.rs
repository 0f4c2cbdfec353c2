//! Tile addressing in the TMS, Google and QuadTree schemes.
//!
//! A [`Tile`] is stored in TMS order (row 0 at the south edge). Google/slippy
//! rows count from the north edge instead, and QuadTree keys interleave the
//! column and Google row bits into one base-4 digit per zoom level.
//!
//! # Examples
//! ```
//! use boundline_core::Tile;
//!
//! # fn main() -> Result<(), boundline_core::TileError> {
//! let tile = Tile::from_quad_tree("120")?;
//! assert_eq!(tile.zoom(), 3);
//! assert_eq!(tile.to_google(), (4, 2));
//! assert_eq!(tile.to_tms(), (4, 5));
//! assert_eq!(tile.to_quad_tree(), "120");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Rect};
use thiserror::Error;

use crate::projection::{GeoPoint, TILE_SIZE};

/// Deepest zoom level addressable with `u32` tile coordinates.
pub const MAX_ZOOM: u8 = 30;

/// Coordinate axis named in [`TileError::CoordinateOutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Column.
    X,
    /// Row.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Invalid arguments passed to a tile constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// A QuadTree key contained a character other than `0`-`3`.
    #[error("invalid QuadTree digit {digit:?} at position {position}")]
    InvalidQuadTreeDigit {
        /// Offending character.
        digit: char,
        /// Zero-based character index.
        position: usize,
    },
    /// The zoom level is deeper than [`MAX_ZOOM`].
    #[error("zoom level {zoom} exceeds the supported maximum {max}")]
    ZoomOutOfRange {
        /// Requested zoom level.
        zoom: usize,
        /// Deepest supported zoom level.
        max: u8,
    },
    /// A tile coordinate lies outside `[0, 2^zoom - 1]`.
    #[error("tile {axis} {value} is outside 0..={max} at zoom {zoom}")]
    CoordinateOutOfRange {
        /// Axis of the offending coordinate.
        axis: Axis,
        /// Supplied coordinate.
        value: u32,
        /// Largest valid coordinate at this zoom.
        max: u32,
        /// Zoom level of the request.
        zoom: u8,
    },
}

/// A tile in the global pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tile {
    zoom: u8,
    tms_x: u32,
    tms_y: u32,
}

/// Geographic corners of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileBounds {
    /// Most southern and western corner.
    pub south_west: GeoPoint,
    /// Most northern and eastern corner.
    pub north_east: GeoPoint,
}

impl TileBounds {
    /// Rectangle with `x = longitude` and `y = latitude`.
    #[must_use]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord::from(self.south_west),
            Coord::from(self.north_east),
        )
    }
}

fn check_zoom(zoom: usize) -> Result<u8, TileError> {
    u8::try_from(zoom)
        .ok()
        .filter(|z| *z <= MAX_ZOOM)
        .ok_or(TileError::ZoomOutOfRange {
            zoom,
            max: MAX_ZOOM,
        })
}

/// Largest row or column index at `zoom`. `zoom` must not exceed [`MAX_ZOOM`].
const fn max_index(zoom: u8) -> u32 {
    (1_u32 << zoom) - 1
}

fn check_coordinate(axis: Axis, value: u32, zoom: u8) -> Result<u32, TileError> {
    let max = max_index(zoom);
    if value <= max {
        Ok(value)
    } else {
        Err(TileError::CoordinateOutOfRange {
            axis,
            value,
            max,
            zoom,
        })
    }
}

/// Map a fractional global pixel coordinate onto a tile index.
///
/// Uses `ceil(pixel / T) - 1`, clamped into the valid range so pixels on the
/// world's west or north edge land in the first tile.
fn pixel_to_index(pixel: f64, zoom: u8) -> u32 {
    let index = (pixel / f64::from(TILE_SIZE)).ceil() - 1.0;
    index.clamp(0.0, f64::from(max_index(zoom))) as u32
}

impl Tile {
    /// Decode a Microsoft QuadTree key. The key length is the zoom level.
    pub fn from_quad_tree(quad_tree: &str) -> Result<Self, TileError> {
        let zoom = check_zoom(quad_tree.chars().count())?;
        let mut google_x = 0_u32;
        let mut google_y = 0_u32;
        for (position, digit) in quad_tree.chars().enumerate() {
            let mask = 1_u32 << (usize::from(zoom) - 1 - position);
            match digit {
                '0' => {}
                '1' => google_x |= mask,
                '2' => google_y |= mask,
                '3' => {
                    google_x |= mask;
                    google_y |= mask;
                }
                _ => return Err(TileError::InvalidQuadTreeDigit { digit, position }),
            }
        }
        Ok(Self {
            zoom,
            tms_x: google_x,
            tms_y: max_index(zoom) - google_y,
        })
    }

    /// Build a tile from TMS column and row (row 0 at the south edge).
    pub fn from_tms(tms_x: u32, tms_y: u32, zoom: u8) -> Result<Self, TileError> {
        let zoom = check_zoom(usize::from(zoom))?;
        Ok(Self {
            zoom,
            tms_x: check_coordinate(Axis::X, tms_x, zoom)?,
            tms_y: check_coordinate(Axis::Y, tms_y, zoom)?,
        })
    }

    /// Build a tile from Google column and row (row 0 at the north edge).
    pub fn from_google(google_x: u32, google_y: u32, zoom: u8) -> Result<Self, TileError> {
        let zoom = check_zoom(usize::from(zoom))?;
        let tms_x = check_coordinate(Axis::X, google_x, zoom)?;
        let google_y = check_coordinate(Axis::Y, google_y, zoom)?;
        Ok(Self {
            zoom,
            tms_x,
            tms_y: max_index(zoom) - google_y,
        })
    }

    /// Tile containing the given global pixel coordinates.
    pub fn for_pixels(pixel_x: f64, pixel_y: f64, zoom: u8) -> Result<Self, TileError> {
        let zoom = check_zoom(usize::from(zoom))?;
        let google_y = pixel_to_index(pixel_y, zoom);
        Ok(Self {
            zoom,
            tms_x: pixel_to_index(pixel_x, zoom),
            tms_y: max_index(zoom) - google_y,
        })
    }

    /// Tile containing a geographic point.
    pub fn for_point(point: GeoPoint, zoom: u8) -> Result<Self, TileError> {
        let zoom = check_zoom(usize::from(zoom))?;
        let pixels = point.pixels(zoom);
        Self::for_pixels(pixels.x, pixels.y, zoom)
    }

    /// Tile containing the given latitude and longitude.
    pub fn for_lat_lon(latitude: f64, longitude: f64, zoom: u8) -> Result<Self, TileError> {
        Self::for_point(GeoPoint::from_lat_lon(latitude, longitude), zoom)
    }

    /// Tile containing the given Web-Mercator meters.
    pub fn for_meters(meter_x: f64, meter_y: f64, zoom: u8) -> Result<Self, TileError> {
        Self::for_point(GeoPoint::from_meters(meter_x, meter_y), zoom)
    }

    /// Zoom level.
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// TMS `(x, y)`.
    #[must_use]
    pub const fn to_tms(&self) -> (u32, u32) {
        (self.tms_x, self.tms_y)
    }

    /// Google `(x, y)`.
    #[must_use]
    pub const fn to_google(&self) -> (u32, u32) {
        (self.tms_x, max_index(self.zoom) - self.tms_y)
    }

    /// Encode as a Microsoft QuadTree key.
    ///
    /// Each level combines the column bit and the TMS row bit, then remaps the
    /// pair through `{0↦2, 1↦3, 2↦0, 3↦1}` to land on QuadTree digits.
    #[must_use]
    pub fn to_quad_tree(&self) -> String {
        (0..self.zoom)
            .rev()
            .map(|bit| {
                let mask = 1_u32 << bit;
                let x_bit = u8::from(self.tms_x & mask != 0);
                let y_bit = u8::from(self.tms_y & mask != 0);
                match x_bit + 2 * y_bit {
                    0 => '2',
                    1 => '3',
                    2 => '0',
                    _ => '1',
                }
            })
            .collect()
    }

    /// Geographic corners of the tile.
    #[must_use]
    pub fn bounds(&self) -> TileBounds {
        let (col, row) = self.to_google();
        let size = f64::from(TILE_SIZE);
        let west = f64::from(col) * size;
        let north = f64::from(row) * size;
        let east = (f64::from(col) + 1.0) * size;
        let south = (f64::from(row) + 1.0) * size;
        TileBounds {
            south_west: GeoPoint::from_pixels(west, south, self.zoom),
            north_east: GeoPoint::from_pixels(east, north, self.zoom),
        }
    }

    /// Bounding rectangle with `x = longitude` and `y = latitude`.
    #[must_use]
    pub fn bounding_box(&self) -> Rect<f64> {
        self.bounds().to_rect()
    }
}

impl fmt::Display for Tile {
    /// Formats as `zoom/x/y` in Google order, the slippy-map convention.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_google();
        write!(f, "{}/{x}/{y}", self.zoom)
    }
}

impl FromStr for Tile {
    type Err = TileError;

    /// Parses a QuadTree key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_quad_tree(s)
    }
}

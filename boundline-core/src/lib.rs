//! Geometry assembly and projection for the boundline renderer.
//!
//! Responsibilities:
//! - Hold ingested points, fragments and boundaries ([`EntityStore`]).
//! - Stitch each boundary's fragments into ordered paths ([`stitch`]).
//! - Project degrees into Web-Mercator pixels and meters ([`projection`]).
//! - Address tiles in the TMS, Google and QuadTree schemes ([`tile`]).
//! - Fit finished paths into an output frame ([`normalize`]).
//!
//! Invariants:
//! - No I/O and no global mutable state.
//! - Dangling references and malformed weights are skipped, never fatal.
//! - Invalid tile arguments are reported through [`TileError`].

pub mod assembler;
pub mod entity;
pub mod normalize;
pub mod projection;
pub mod stitch;
pub mod store;
pub mod tile;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use assembler::{Assembler, Projection, WeightedPath};
pub use entity::{Entity, Member, MemberKind};
pub use normalize::{Fit, WeightScale, extent_of};
pub use projection::{EARTH_RADIUS, GeoPoint, MAX_LATITUDE, ORIGIN_SHIFT, TILE_SIZE, pixels_per_world};
pub use stitch::{BoundaryPath, Join, RunBuilder, Stitcher, stitch_runs};
pub use store::{Boundary, EntityStore, IngestStats, StoreCapacity, WeightTag, parse_weight};
pub use tile::{Axis, MAX_ZOOM, Tile, TileBounds, TileError};

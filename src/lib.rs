//! Facade crate for the boundline boundary renderer.
//!
//! This crate re-exports the core stitching, projection and tile types and
//! exposes OSM PBF ingestion behind the `osm-pbf` feature flag.

#![forbid(unsafe_code)]

pub use boundline_core::{
    Assembler, Axis, Boundary, BoundaryPath, EARTH_RADIUS, Entity, EntityStore, Fit, GeoPoint,
    IngestStats, Join, MAX_LATITUDE, MAX_ZOOM, Member, MemberKind, ORIGIN_SHIFT, Projection,
    RunBuilder, Stitcher, StoreCapacity, TILE_SIZE, Tile, TileBounds, TileError, WeightScale,
    WeightTag, WeightedPath, extent_of, parse_weight, pixels_per_world, stitch_runs,
};

#[cfg(feature = "osm-pbf")]
pub use boundline_data::{
    DEFAULT_WEIGHT_TAG, IngestOptions, OsmIngestError, OsmIngestReport, OsmIngestSummary,
    ingest_osm_pbf,
};

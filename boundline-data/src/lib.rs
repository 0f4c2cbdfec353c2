//! OSM PBF ingestion for the boundline renderer.
//!
//! Responsibilities:
//! - Decode OSM PBF files with `osmpbf`.
//! - Translate nodes, ways and relations into `boundline-core` entities.
//! - Summarise what was read.
//!
//! Boundaries:
//! - Do not encode stitching or projection rules (live in `boundline-core`).
//!
//! Invariants:
//! - No global mutable state.

mod ingest;

pub use ingest::{
    DEFAULT_WEIGHT_TAG, IngestOptions, OsmIngestError, OsmIngestReport, OsmIngestSummary,
    ingest_osm_pbf,
};

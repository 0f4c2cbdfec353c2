use std::path::{Path, PathBuf};

use boundline_core::Assembler;
use geo::{Coord, Rect};
use log::{info, warn};
use osmpbf::ElementReader;
use thiserror::Error;

mod accumulator;
mod tags;

use accumulator::OsmBoundaryAccumulator;

/// Tag key read from relations when no other key is configured.
pub const DEFAULT_WEIGHT_TAG: &str = "gsg:amount";

/// Summary of raw OSM elements discovered during ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmIngestSummary {
    /// Number of nodes discovered, including dense-node entries.
    pub nodes: u64,
    /// Nodes dropped because their coordinates were not finite WGS84 degrees.
    pub invalid_nodes: u64,
    /// Number of ways discovered.
    pub ways: u64,
    /// Number of relations discovered.
    pub relations: u64,
    /// Bounding box covering all valid node coordinates, if any.
    /// Coordinates are WGS84 with `x = longitude`, `y = latitude`.
    pub bounds: Option<Rect<f64>>,
}

impl OsmIngestSummary {
    fn include_coordinate(&mut self, coordinate: Coord<f64>) {
        match &mut self.bounds {
            Some(existing) => {
                let min = Coord {
                    x: existing.min().x.min(coordinate.x),
                    y: existing.min().y.min(coordinate.y),
                };
                let max = Coord {
                    x: existing.max().x.max(coordinate.x),
                    y: existing.max().y.max(coordinate.y),
                };
                *existing = Rect::new(min, max);
            }
            None => self.bounds = Some(Rect::new(coordinate, coordinate)),
        }
    }

    /// Count a node; returns whether its coordinates are usable.
    fn record_node(&mut self, lon: f64, lat: f64) -> bool {
        self.nodes += 1;
        match validated_coord(lon, lat) {
            Some(coordinate) => {
                self.include_coordinate(coordinate);
                true
            }
            None => {
                self.invalid_nodes += 1;
                false
            }
        }
    }

    fn record_way(&mut self) {
        self.ways += 1;
    }

    fn record_relation(&mut self) {
        self.relations += 1;
    }
}

fn validated_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    (lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat))
    .then_some(Coord { x: lon, y: lat })
}

/// Options controlling how OSM elements become boundline entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Relation tag whose value is parsed as the boundary weight.
    pub weight_tag: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            weight_tag: DEFAULT_WEIGHT_TAG.to_owned(),
        }
    }
}

/// Result of an OSM ingestion run.
///
/// The assembler holds every point, fragment and boundary read from the file
/// and is ready to be finalized.
#[derive(Debug)]
pub struct OsmIngestReport {
    /// Element counts and bounding box information.
    pub summary: OsmIngestSummary,
    /// Populated assembler.
    pub assembler: Assembler,
}

/// Errors returned when ingesting an OSM PBF file.
#[derive(Debug, Error)]
pub enum OsmIngestError {
    #[error("failed to open OSM PBF file at {path:?}")]
    Open {
        #[source]
        source: osmpbf::Error,
        path: PathBuf,
    },
    #[error("failed to decode OSM PBF data at {path:?}")]
    Decode {
        #[source]
        source: osmpbf::Error,
        path: PathBuf,
    },
}

/// Read an OSM PBF file into an [`Assembler`].
///
/// Nodes become points, ways become fragments and relations become
/// boundaries weighted by [`IngestOptions::weight_tag`]. Elements are decoded
/// sequentially in file order.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use boundline_core::Projection;
/// use boundline_data::{IngestOptions, ingest_osm_pbf};
///
/// # fn main() -> Result<(), boundline_data::OsmIngestError> {
/// let report = ingest_osm_pbf(Path::new("regions.osm.pbf"), &IngestOptions::default())?;
/// println!("Relations: {}", report.summary.relations);
/// let paths = report.assembler.finalize(Projection::Mercator);
/// println!("Paths: {}", paths.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_osm_pbf(
    path: &Path,
    options: &IngestOptions,
) -> Result<OsmIngestReport, OsmIngestError> {
    let reader = ElementReader::from_path(path).map_err(|source| OsmIngestError::Open {
        source,
        path: path.to_path_buf(),
    })?;

    let mut accumulator = OsmBoundaryAccumulator::new(options);
    reader
        .for_each(|element| accumulator.process_element(element))
        .map_err(|source| OsmIngestError::Decode {
            source,
            path: path.to_path_buf(),
        })?;

    let report = accumulator.into_report();
    if report.summary.invalid_nodes > 0 {
        warn!(
            "Skipped {} nodes with invalid coordinates in {}",
            report.summary.invalid_nodes,
            path.display()
        );
    }
    info!(
        "Read {} nodes, {} ways and {} relations from {}",
        report.summary.nodes,
        report.summary.ways,
        report.summary.relations,
        path.display()
    );
    Ok(report)
}

//! Error types emitted by the boundline CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use boundline_core::TileError;
use boundline_data::OsmIngestError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the boundline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An output dimension was zero.
    #[error("{field} must be a positive number of pixels")]
    InvalidDimension { field: &'static str },
    /// OSM ingestion failed.
    #[error("failed to ingest OSM data: {0}")]
    OsmIngest(#[from] OsmIngestError),
    /// Writing the rendered SVG failed.
    #[error("failed to write SVG to {path:?}: {source}")]
    WriteSvg {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Neither a QuadTree key nor a full position was given.
    #[error("provide --quad-key or all of --lat, --lon and --zoom")]
    MissingTileTarget,
    /// The requested tile address was invalid.
    #[error("invalid tile request: {0}")]
    Tile(#[from] TileError),
    /// Serialising the tile report failed.
    #[error("failed to serialise tile report: {0}")]
    SerialiseTileReport(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

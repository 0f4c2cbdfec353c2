//! Render command implementation for the boundline CLI.

use boundline_core::{Projection, WeightedPath};
use boundline_data::{DEFAULT_WEIGHT_TAG, IngestOptions, ingest_osm_pbf};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use geo::Coord;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::drawing::{Canvas, render_svg};
use crate::{
    ARG_HEIGHT, ARG_OSM_PBF, ARG_OUTPUT, ARG_PROJECTION, ARG_WEIGHT_TAG, ARG_WIDTH, CliError,
    ENV_OSM_PBF,
};

/// File written when no output path is configured.
pub(crate) const DEFAULT_OUTPUT: &str = "output.svg";
/// Canvas edge length used when no size is configured.
pub(crate) const DEFAULT_SIZE: u32 = 1024;

/// Coordinate space used before fitting paths into the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ProjectionChoice {
    /// Spherical Web-Mercator meters.
    #[default]
    Mercator,
    /// Plain longitude and latitude.
    Geographic,
}

impl From<ProjectionChoice> for Projection {
    fn from(choice: ProjectionChoice) -> Self {
        match choice {
            ProjectionChoice::Mercator => Self::Mercator,
            ProjectionChoice::Geographic => Self::Geographic,
        }
    }
}

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Stitch the ways of every relation in an OSM PBF extract \
                 into paths and draw them as an SVG, coloured by each \
                 relation's weight tag. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Render weighted OSM boundaries to SVG"
)]
#[ortho_config(prefix = "BOUNDLINE")]
pub(crate) struct RenderArgs {
    /// Path to the OpenStreetMap PBF file.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
    /// Destination SVG file (defaults to `output.svg`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Canvas width in pixels.
    #[arg(long = ARG_WIDTH, value_name = "px")]
    #[serde(default)]
    pub(crate) width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long = ARG_HEIGHT, value_name = "px")]
    #[serde(default)]
    pub(crate) height: Option<u32>,
    /// Relation tag holding the boundary weight.
    #[arg(long = ARG_WEIGHT_TAG, value_name = "key")]
    #[serde(default)]
    pub(crate) weight_tag: Option<String>,
    /// Coordinate space to draw in.
    #[arg(long = ARG_PROJECTION, value_enum)]
    #[serde(default)]
    pub(crate) projection: Option<ProjectionChoice>,
}

impl RenderArgs {
    pub(crate) fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

/// Resolved `render` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderConfig {
    pub(crate) osm_pbf: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) canvas: Canvas,
    pub(crate) weight_tag: String,
    pub(crate) projection: Projection,
}

impl RenderConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.osm_pbf, ARG_OSM_PBF)
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match boundline_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn positive(value: Option<u32>, field: &'static str) -> Result<u32, CliError> {
    match value.unwrap_or(DEFAULT_SIZE) {
        0 => Err(CliError::InvalidDimension { field }),
        size => Ok(size),
    }
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let osm_pbf = args.osm_pbf.ok_or(CliError::MissingArgument {
            field: ARG_OSM_PBF,
            env: ENV_OSM_PBF,
        })?;
        let canvas = Canvas {
            width: positive(args.width, ARG_WIDTH)?,
            height: positive(args.height, ARG_HEIGHT)?,
        };
        Ok(Self {
            osm_pbf,
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            canvas,
            weight_tag: args
                .weight_tag
                .unwrap_or_else(|| DEFAULT_WEIGHT_TAG.to_owned()),
            projection: args.projection.unwrap_or_default().into(),
        })
    }
}

/// What a completed render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderOutcome {
    pub(crate) output: Utf8PathBuf,
    pub(crate) paths: usize,
}

/// Geographic latitude grows northward; flip it so north is up on screen.
fn to_screen(mut paths: Vec<WeightedPath>, projection: Projection) -> Vec<WeightedPath> {
    if projection == Projection::Geographic {
        for coord in paths.iter_mut().flat_map(|path| path.coords.iter_mut()) {
            *coord = Coord {
                x: coord.x,
                y: -coord.y,
            };
        }
    }
    paths
}

pub(crate) fn run_render(args: RenderArgs) -> Result<RenderOutcome, CliError> {
    let config = resolve_render_config(args)?;
    render_with(&config)
}

pub(crate) fn resolve_render_config(args: RenderArgs) -> Result<RenderConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn render_with(config: &RenderConfig) -> Result<RenderOutcome, CliError> {
    let options = IngestOptions {
        weight_tag: config.weight_tag.clone(),
    };
    let report = ingest_osm_pbf(config.osm_pbf.as_std_path(), &options)?;
    let paths = to_screen(report.assembler.finalize(config.projection), config.projection);
    let body = render_svg(&paths, config.canvas);
    boundline_fs::write_file(&config.output, body).map_err(|source| CliError::WriteSvg {
        path: config.output.clone(),
        source,
    })?;
    info!("Wrote {} paths to {}", paths.len(), config.output);
    Ok(RenderOutcome {
        output: config.output.clone(),
        paths: paths.len(),
    })
}

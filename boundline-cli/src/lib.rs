//! Command-line interface for the boundline renderer.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod drawing;
mod error;
mod render;
mod tile;

pub use error::CliError;
use render::{RenderArgs, run_render};
use tile::{TileArgs, run_tile};

const ARG_OSM_PBF: &str = "osm-pbf";
const ARG_OUTPUT: &str = "output";
const ARG_WIDTH: &str = "width";
const ARG_HEIGHT: &str = "height";
const ARG_WEIGHT_TAG: &str = "weight-tag";
const ARG_PROJECTION: &str = "projection";
const ARG_QUAD_KEY: &str = "quad-key";
const ENV_OSM_PBF: &str = "BOUNDLINE_CMDS_RENDER_OSM_PBF";

/// Run the boundline CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Render(args) => {
            run_render(args)?;
        }
        Command::Tile(args) => run_tile(&args)?,
    }
    Ok(())
}

/// Install `env_logger`, honouring `RUST_LOG` when it is set.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[derive(Debug, Parser)]
#[command(
    name = "boundline",
    about = "Stitch OSM boundaries into weighted SVG maps and convert tile addresses",
    version
)]
struct Cli {
    /// Log debug detail such as skipped weight tags.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the boundaries of an OSM PBF extract to SVG.
    Render(RenderArgs),
    /// Convert between QuadTree keys, positions and TMS/Google tiles.
    Tile(TileArgs),
}

#[cfg(test)]
mod tests;

//! Test helpers for composing render CLI datasets and layered overrides.

use super::*;
use crate::render::{ProjectionChoice, RenderConfig, resolve_render_config};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use camino::{Utf8Path, Utf8PathBuf};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone, Default)]
pub(super) struct LayerOverrides {
    pub(super) osm_pbf: Option<Utf8PathBuf>,
    pub(super) output: Option<Utf8PathBuf>,
    pub(super) width: Option<u32>,
    pub(super) height: Option<u32>,
    pub(super) projection: Option<ProjectionChoice>,
}

/// Bytes of the ingestion crate's sample extract: a weighted square and two
/// unweighted boundaries sharing its ways.
pub(super) fn sample_pbf() -> Vec<u8> {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../boundline-data/tests/fixtures/boundaries.osm.pbf.b64");
    let text = fs::read_to_string(&source)
        .unwrap_or_else(|err| panic!("cannot read fixture {source:?}: {err}"));
    let compact: String = text.split_whitespace().collect();
    STANDARD
        .decode(compact)
        .unwrap_or_else(|err| panic!("fixture {source:?} is not base64: {err}"))
}

#[derive(Debug)]
pub(super) struct DatasetFiles {
    dir: TempDir,
    cli_osm: Utf8PathBuf,
    config_osm: Utf8PathBuf,
    env_osm: Utf8PathBuf,
}

impl DatasetFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let cli_osm = root.join("cli.osm.pbf");
        let config_osm = root.join("config.osm.pbf");
        let env_osm = root.join("env.osm.pbf");
        let contents = sample_pbf();
        for path in [&cli_osm, &config_osm, &env_osm] {
            fs::write(path, &contents).expect("write dataset file");
        }
        Self {
            dir,
            cli_osm,
            config_osm,
            env_osm,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        Utf8Path::from_path(self.dir.path()).expect("utf-8 tempdir")
    }

    pub(super) fn osm(&self) -> &Utf8Path {
        &self.cli_osm
    }

    pub(super) fn config_osm(&self) -> &Utf8Path {
        &self.config_osm
    }

    pub(super) fn env_osm(&self) -> &Utf8Path {
        &self.env_osm
    }

    pub(super) fn output(&self) -> Utf8PathBuf {
        self.root().join("maps/regions.svg")
    }
}

pub(super) fn merge_layers(
    mut cli_args: RenderArgs,
    file_layer: Option<LayerOverrides>,
    env_layer: Option<LayerOverrides>,
) -> Result<RenderConfig, CliError> {
    merge_field(
        &mut cli_args.osm_pbf,
        extract_field(&env_layer, |layer| &layer.osm_pbf),
        extract_field(&file_layer, |layer| &layer.osm_pbf),
    );
    merge_field(
        &mut cli_args.output,
        extract_field(&env_layer, |layer| &layer.output),
        extract_field(&file_layer, |layer| &layer.output),
    );
    merge_field(
        &mut cli_args.width,
        extract_field(&env_layer, |layer| &layer.width),
        extract_field(&file_layer, |layer| &layer.width),
    );
    merge_field(
        &mut cli_args.height,
        extract_field(&env_layer, |layer| &layer.height),
        extract_field(&file_layer, |layer| &layer.height),
    );
    merge_field(
        &mut cli_args.projection,
        extract_field(&env_layer, |layer| &layer.projection),
        extract_field(&file_layer, |layer| &layer.projection),
    );
    resolve_render_config(cli_args)
}

fn merge_field<T: Clone>(target: &mut Option<T>, env_value: Option<T>, file_value: Option<T>) {
    if target.is_none()
        && let Some(value) = env_value.or(file_value)
    {
        *target = Some(value);
    }
}

fn extract_field<T: Clone>(
    layer: &Option<LayerOverrides>,
    accessor: fn(&LayerOverrides) -> &Option<T>,
) -> Option<T> {
    layer.as_ref().and_then(|entry| accessor(entry).clone())
}

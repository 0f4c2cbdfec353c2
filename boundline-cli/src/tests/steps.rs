//! Behaviour-driven step definitions driving the render CLI scenarios.

use super::helpers::{DatasetFiles, LayerOverrides, merge_layers};
use super::*;
use crate::drawing::Canvas;
use crate::render::{
    DEFAULT_OUTPUT, DEFAULT_SIZE, RenderConfig, RenderOutcome, resolve_render_config,
    run_render,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::fs;

/// Render scenario state shared by every step through a single world.
#[derive(Debug)]
struct RenderWorld {
    dataset_files: DatasetFiles,
    cli_args: RefCell<Vec<String>>,
    cli_result: RefCell<Option<Result<RenderConfig, CliError>>>,
    render_result: RefCell<Option<Result<RenderOutcome, CliError>>>,
    config_layer: RefCell<Option<LayerOverrides>>,
    env_layer: RefCell<Option<LayerOverrides>>,
}

impl RenderWorld {
    fn new() -> Self {
        Self {
            dataset_files: DatasetFiles::new(),
            cli_args: RefCell::new(Vec::new()),
            cli_result: RefCell::new(None),
            render_result: RefCell::new(None),
            config_layer: RefCell::new(None),
            env_layer: RefCell::new(None),
        }
    }

    fn parse_render_args(&self) -> Result<RenderArgs, CliError> {
        let mut invocation = vec!["boundline".to_string(), "render".to_string()];
        invocation.extend(self.cli_args.borrow().iter().cloned());
        let cli = Cli::try_parse_from(invocation).map_err(CliError::ArgumentParsing)?;
        match cli.command {
            Command::Render(args) => Ok(args),
            other => panic!("expected render command, found {other:?}"),
        }
    }

    fn config(&self) -> std::cell::Ref<'_, RenderConfig> {
        std::cell::Ref::map(self.cli_result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect("expected success")
        })
    }
}

#[fixture]
fn world() -> RenderWorld {
    RenderWorld::new()
}

#[given("the sample dataset exists on disk")]
fn dataset_exists(#[from(world)] world: &RenderWorld) {
    let dataset = &world.dataset_files;
    assert!(dataset.osm().exists(), "expected the dataset on disk");
    assert!(dataset.config_osm().exists(), "expected the dataset on disk");
}

#[given("I pass the dataset path with the CLI flag")]
fn cli_provides_path(#[from(world)] world: &RenderWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_OSM_PBF}"),
        world.dataset_files.osm().as_str().to_string(),
    ]);
}

#[given("I pass only the OSM CLI flag")]
fn cli_only_osm(#[from(world)] world: &RenderWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_OSM_PBF}"),
        world.dataset_files.osm().as_str().to_string(),
    ]);
}

#[given("I omit all dataset configuration")]
fn omit_configuration(#[from(world)] world: &RenderWorld) {
    world.cli_args.borrow_mut().clear();
    *world.config_layer.borrow_mut() = None;
    *world.env_layer.borrow_mut() = None;
}

#[given("the dataset path and canvas are provided via a config file")]
fn provided_via_config(#[from(world)] world: &RenderWorld) {
    *world.config_layer.borrow_mut() = Some(LayerOverrides {
        osm_pbf: Some(world.dataset_files.config_osm().to_path_buf()),
        width: Some(640),
        height: Some(480),
        ..LayerOverrides::default()
    });
}

#[given("the canvas width is overridden via environment variables")]
fn width_overridden_by_env(#[from(world)] world: &RenderWorld) {
    *world.env_layer.borrow_mut() = Some(LayerOverrides {
        osm_pbf: Some(world.dataset_files.env_osm().to_path_buf()),
        width: Some(800),
        ..LayerOverrides::default()
    });
}

#[given("I ask for the output inside a new directory")]
fn output_in_new_directory(#[from(world)] world: &RenderWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{ARG_OUTPUT}"),
        world.dataset_files.output().as_str().to_string(),
    ]);
}

#[when("I configure the render command")]
fn configure_render(#[from(world)] world: &RenderWorld) {
    let file_layer = world.config_layer.borrow().clone();
    let env_layer = world.env_layer.borrow().clone();
    let outcome = world.parse_render_args().and_then(|args| {
        if file_layer.is_some() || env_layer.is_some() {
            merge_layers(args, file_layer, env_layer)
        } else {
            resolve_render_config(args)
        }
    });
    world.cli_result.replace(Some(outcome));
}

#[when("I render the dataset")]
fn render_dataset(#[from(world)] world: &RenderWorld) {
    let outcome = world.parse_render_args().and_then(run_render);
    world.render_result.replace(Some(outcome));
}

#[then("the render plan uses the CLI-provided dataset path")]
fn plan_uses_cli_path(#[from(world)] world: &RenderWorld) {
    assert_eq!(world.config().osm_pbf, world.dataset_files.osm().to_path_buf());
}

#[then("the render plan uses the default canvas")]
fn plan_uses_default_canvas(#[from(world)] world: &RenderWorld) {
    let config = world.config();
    assert_eq!(config.output.as_str(), DEFAULT_OUTPUT);
    assert_eq!(
        config.canvas,
        Canvas {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE
        }
    );
}

#[then("the CLI reports that the \"osm-pbf\" flag is missing")]
fn reports_missing_osm(#[from(world)] world: &RenderWorld) {
    let borrowed = world.cli_result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_OSM_PBF);
            assert_eq!(*env, ENV_OSM_PBF);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("CLI and environment layers override configuration defaults")]
fn precedence_holds(#[from(world)] world: &RenderWorld) {
    let config = world.config();
    assert_eq!(config.osm_pbf, world.dataset_files.osm().to_path_buf());
    assert_eq!(
        config.canvas,
        Canvas {
            width: 800,
            height: 480
        }
    );
}

#[then("the SVG file holds {count} boundary paths")]
fn svg_holds_paths(#[from(world)] world: &RenderWorld, count: usize) {
    let borrowed = world.render_result.borrow();
    let outcome = borrowed
        .as_ref()
        .expect("render attempted")
        .as_ref()
        .expect("expected a successful render");
    assert_eq!(outcome.paths, count);
    let svg = fs::read_to_string(&outcome.output).expect("read rendered SVG");
    assert_eq!(svg.matches("<path").count(), count);
}

macro_rules! register_render_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/render.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RenderWorld) {
            let _ = world;
        }
    };
}

register_render_scenario!(cli_flag_selection, "selecting the dataset via CLI flags");
register_render_scenario!(rejecting_missing_args, "rejecting missing arguments");
register_render_scenario!(
    layering_cli_config_env,
    "layering CLI, config file, and environment values"
);
register_render_scenario!(rendering_sample, "rendering the sample dataset to SVG");

//! SVG serialisation of weighted boundary paths.
//!
//! Every path is fitted into the canvas with one shared [`Fit`] and drawn as
//! an unfilled `<path>`. Stroke colour runs from transparent yellow for the
//! lightest boundary to opaque red for the heaviest.

use boundline_core::{Fit, WeightScale, WeightedPath};
use geo::Coord;
use svg::Document;
use svg::node::element::Path;
use svg::node::element::path::Data;

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Canvas {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Stroke for a normalised weight in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Stroke {
    pub(crate) green: u8,
    pub(crate) opacity: f64,
}

impl Stroke {
    pub(crate) fn for_weight(normalised: f64) -> Self {
        let t = normalised.clamp(0.0, 1.0);
        let green = ((1.0 - t) * 255.0).round() as u8;
        Self { green, opacity: t }
    }

    fn colour(self) -> String {
        format!("rgb(255,{},0)", self.green)
    }
}

fn path_data(coords: &[Coord<f64>]) -> Option<Data> {
    let (first, rest) = coords.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let data = rest
        .iter()
        .fold(Data::new().move_to((first.x, first.y)), |data, coord| {
            data.line_to((coord.x, coord.y))
        });
    Some(data)
}

/// Build the SVG document for `paths`.
///
/// Paths with fewer than two coordinates cannot form a segment and are
/// skipped.
pub(crate) fn render_document(paths: &[WeightedPath], canvas: Canvas) -> Document {
    let (width, height) = (f64::from(canvas.width), f64::from(canvas.height));
    let fit = Fit::from_paths(paths, width, height);
    let weights = WeightScale::from_paths(paths);

    let document = Document::new()
        .set("width", canvas.width)
        .set("height", canvas.height)
        .set("viewBox", (0, 0, canvas.width, canvas.height));

    paths.iter().fold(document, |document, path| {
        let Some(data) = path_data(&fit.apply_path(path)) else {
            return document;
        };
        let stroke = Stroke::for_weight(weights.normalise(path.weight));
        document.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", stroke.colour())
                .set("stroke-opacity", stroke.opacity)
                .set("stroke-width", 1)
                .set("data-boundary", path.boundary_id.to_string()),
        )
    })
}

/// Serialise `paths` as a standalone SVG file body.
pub(crate) fn render_svg(paths: &[WeightedPath], canvas: Canvas) -> String {
    // The svg crate omits the XML declaration, so we prepend it.
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n",
        render_document(paths, canvas)
    )
}

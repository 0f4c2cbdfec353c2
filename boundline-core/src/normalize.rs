//! Fit assembled paths into an output frame.
//!
//! A single [`Fit`] is computed from the extent of every path and applied to
//! all of them, so relative sizes and the aspect ratio survive. Weights are
//! scaled separately by [`WeightScale`].

use geo::{Coord, Rect};

use crate::assembler::WeightedPath;

/// Bounding rectangle of every coordinate in `paths`.
///
/// Returns `None` when there are no coordinates at all.
#[must_use]
pub fn extent_of(paths: &[WeightedPath]) -> Option<Rect<f64>> {
    let mut coords = paths.iter().flat_map(|path| path.coords.iter());
    let first = *coords.next()?;
    let (min, max) = coords.fold((first, first), |(min, max), coord| {
        (
            Coord {
                x: min.x.min(coord.x),
                y: min.y.min(coord.y),
            },
            Coord {
                x: max.x.max(coord.x),
                y: max.y.max(coord.y),
            },
        )
    });
    Some(Rect::new(min, max))
}

/// Uniform scale-and-translate into a `width` × `height` frame.
///
/// Maps the extent centre onto the frame centre:
/// `x' = (x - cx) * scale + width / 2`, likewise for `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Uniform scale factor.
    pub scale: f64,
    /// Centre of the source extent.
    pub source_centre: Coord<f64>,
    /// Centre of the output frame.
    pub frame_centre: Coord<f64>,
}

impl Fit {
    /// Fit an extent into the frame.
    ///
    /// The scale is `min(width / dx, height / dy)`. It falls back to `1.0`
    /// when the extent is flat along either axis, and an absent extent yields
    /// a unit scale centred on the origin.
    ///
    /// # Examples
    /// ```
    /// use boundline_core::normalize::Fit;
    /// use geo::{Coord, Rect};
    ///
    /// let fit = Fit::new(Some(Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 5.0 })), 100.0, 100.0);
    /// assert_eq!(fit.scale, 10.0);
    /// assert_eq!(fit.apply(Coord { x: 5.0, y: 2.5 }), Coord { x: 50.0, y: 50.0 });
    /// ```
    #[must_use]
    pub fn new(extent: Option<Rect<f64>>, width: f64, height: f64) -> Self {
        let frame_centre = Coord {
            x: width / 2.0,
            y: height / 2.0,
        };
        let Some(extent) = extent else {
            return Self {
                scale: 1.0,
                source_centre: Coord { x: 0.0, y: 0.0 },
                frame_centre,
            };
        };
        let (dx, dy) = (extent.width(), extent.height());
        let scale = if dx > 0.0 && dy > 0.0 {
            (width / dx).min(height / dy)
        } else {
            1.0
        };
        Self {
            scale,
            source_centre: extent.center(),
            frame_centre,
        }
    }

    /// Fit every coordinate of `paths` into the frame.
    #[must_use]
    pub fn from_paths(paths: &[WeightedPath], width: f64, height: f64) -> Self {
        Self::new(extent_of(paths), width, height)
    }

    /// Transform a single coordinate.
    #[must_use]
    pub fn apply(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (coord.x - self.source_centre.x) * self.scale + self.frame_centre.x,
            y: (coord.y - self.source_centre.y) * self.scale + self.frame_centre.y,
        }
    }

    /// Transform every coordinate of a path.
    #[must_use]
    pub fn apply_path(&self, path: &WeightedPath) -> Vec<Coord<f64>> {
        path.coords.iter().map(|coord| self.apply(*coord)).collect()
    }
}

/// Maps boundary weights onto `[0, 1]` relative to the heaviest path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightScale {
    max_weight: f64,
}

impl WeightScale {
    /// Scale relative to an explicit maximum.
    #[must_use]
    pub const fn new(max_weight: f64) -> Self {
        Self { max_weight }
    }

    /// Scale relative to the heaviest of `paths`.
    #[must_use]
    pub fn from_paths(paths: &[WeightedPath]) -> Self {
        let max_weight = paths
            .iter()
            .map(|path| path.weight)
            .fold(0.0_f64, f64::max);
        Self { max_weight }
    }

    /// Heaviest weight seen.
    #[must_use]
    pub const fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// `weight / max_weight` clamped to `[0, 1]`; zero without a positive
    /// finite maximum or when the ratio is `NaN`.
    #[must_use]
    pub fn normalise(&self, weight: f64) -> f64 {
        if !(self.max_weight.is_finite() && self.max_weight > 0.0) {
            return 0.0;
        }
        let ratio = weight / self.max_weight;
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }
}

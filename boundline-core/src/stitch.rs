//! Fragment stitching.
//!
//! A boundary lists its fragments in no particular orientation. Stitching
//! walks them in member order and greedily joins each fragment onto the run
//! built so far whenever the two share an endpoint. When no endpoint matches,
//! the run is closed and a new one starts, so a boundary made of disconnected
//! pieces yields one path per piece.

use geo::Coord;
use log::debug;

use crate::store::{Boundary, EntityStore};

/// How a fragment attaches to the run being built.
///
/// Variants are listed in the order they are tested; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Run end meets fragment start.
    Append,
    /// Run end meets fragment end; the fragment is reversed.
    ReverseFragment,
    /// Run start meets fragment start; the run is reversed.
    ReverseRun,
    /// Run start meets fragment end; both are reversed.
    ReverseBoth,
}

impl Join {
    /// Find the first join that connects `run` and `fragment`.
    ///
    /// Returns `None` when either side is empty or no endpoints coincide.
    ///
    /// # Examples
    /// ```
    /// use boundline_core::stitch::Join;
    ///
    /// assert_eq!(Join::between(&[1, 2, 3], &[5, 4, 3]), Some(Join::ReverseFragment));
    /// assert_eq!(Join::between(&[1, 2], &[5, 6]), None);
    /// ```
    #[must_use]
    pub fn between(run: &[i64], fragment: &[i64]) -> Option<Self> {
        let (run_start, run_end) = (run.first()?, run.last()?);
        let (fragment_start, fragment_end) = (fragment.first()?, fragment.last()?);
        if run_end == fragment_start {
            Some(Self::Append)
        } else if run_end == fragment_end {
            Some(Self::ReverseFragment)
        } else if run_start == fragment_start {
            Some(Self::ReverseRun)
        } else if run_start == fragment_end {
            Some(Self::ReverseBoth)
        } else {
            None
        }
    }

    fn apply(self, run: &mut Vec<i64>, fragment: &[i64]) {
        if matches!(self, Self::ReverseRun | Self::ReverseBoth) {
            run.reverse();
        }
        // The shared endpoint is already the last element of the run.
        match self {
            Self::Append | Self::ReverseRun => {
                run.extend(fragment.iter().skip(1));
            }
            Self::ReverseFragment | Self::ReverseBoth => {
                run.extend(fragment.iter().rev().skip(1));
            }
        }
    }
}

/// Incremental run assembly as an explicit two-state machine.
///
/// Feeding a fragment either extends the current run or closes it. A closed
/// run is returned from [`RunBuilder::feed`]; the final run is returned from
/// [`RunBuilder::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunBuilder {
    /// No run in progress.
    #[default]
    Empty,
    /// A run of point identifiers is being extended.
    Building(Vec<i64>),
}

impl RunBuilder {
    /// Offer the next fragment. Empty fragments leave the state untouched.
    ///
    /// Returns the previous run when the fragment could not be joined to it.
    pub fn feed(&mut self, fragment: &[i64]) -> Option<Vec<i64>> {
        if fragment.is_empty() {
            return None;
        }
        match self {
            Self::Empty => {
                *self = Self::Building(fragment.to_vec());
                None
            }
            Self::Building(run) => match Join::between(run, fragment) {
                Some(join) => {
                    join.apply(run, fragment);
                    None
                }
                None => Some(std::mem::replace(run, fragment.to_vec())),
            },
        }
    }

    /// Consume the builder, yielding the run still in progress.
    #[must_use]
    pub fn finish(self) -> Option<Vec<i64>> {
        match self {
            Self::Empty => None,
            Self::Building(run) => Some(run),
        }
    }
}

/// Stitch raw point-identifier sequences into maximal runs.
///
/// # Examples
/// ```
/// use boundline_core::stitch::stitch_runs;
///
/// let runs = stitch_runs([&[1, 2, 3][..], &[3, 4, 5], &[5, 6, 1]]);
/// assert_eq!(runs, vec![vec![1, 2, 3, 4, 5, 6, 1]]);
/// ```
pub fn stitch_runs<'a, I>(fragments: I) -> Vec<Vec<i64>>
where
    I: IntoIterator<Item = &'a [i64]>,
{
    let mut builder = RunBuilder::Empty;
    let mut runs = Vec::new();
    for fragment in fragments {
        if let Some(closed) = builder.feed(fragment) {
            runs.push(closed);
        }
    }
    runs.extend(builder.finish());
    runs
}

/// One stitched run of a boundary resolved to coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPath {
    /// Owning boundary.
    pub boundary_id: i64,
    /// Weight of the owning boundary.
    pub weight: f64,
    /// Point identifiers that resolved to coordinates, in path order.
    pub point_ids: Vec<i64>,
    /// Coordinates with `x = longitude`, `y = latitude`.
    pub coords: Vec<Coord<f64>>,
}

/// Reconstructs boundary paths from an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct Stitcher<'a> {
    store: &'a EntityStore,
}

impl<'a> Stitcher<'a> {
    /// Borrow the store to stitch from.
    #[must_use]
    pub const fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Stitch a single boundary.
    ///
    /// Member identifiers without a fragment are dropped, as are fragments
    /// none of whose points exist. Runs with no resolvable point are omitted.
    #[must_use]
    pub fn boundary_paths(&self, boundary: &Boundary) -> Vec<BoundaryPath> {
        let fragments = boundary
            .fragment_ids
            .iter()
            .filter_map(|id| self.store.fragment(*id))
            .filter(|point_ids| point_ids.iter().any(|id| self.store.point(*id).is_some()));
        let paths: Vec<BoundaryPath> = stitch_runs(fragments)
            .into_iter()
            .filter_map(|run| self.resolve(boundary, &run))
            .collect();
        if paths.is_empty() {
            debug!("Boundary {} produced no paths", boundary.id);
        }
        paths
    }

    /// Stitch every boundary in first-observation order.
    #[must_use]
    pub fn paths(&self) -> Vec<BoundaryPath> {
        self.store
            .boundaries()
            .flat_map(|boundary| self.boundary_paths(boundary))
            .collect()
    }

    fn resolve(&self, boundary: &Boundary, run: &[i64]) -> Option<BoundaryPath> {
        let (point_ids, coords): (Vec<i64>, Vec<Coord<f64>>) = run
            .iter()
            .filter_map(|id| self.store.point(*id).map(|coord| (*id, coord)))
            .unzip();
        (!coords.is_empty()).then_some(BoundaryPath {
            boundary_id: boundary.id,
            weight: boundary.weight,
            point_ids,
            coords,
        })
    }
}

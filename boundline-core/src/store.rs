//! In-memory tables for points, fragments and boundaries.
//!
//! The store is filled once during ingestion and read during finalize. Lookups
//! return `None` for unknown identifiers because real-world extracts routinely
//! reference entities that were clipped away.

use std::collections::HashMap;

use geo::Coord;
use log::debug;

/// Initial table sizes used to avoid rehashing on large extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCapacity {
    /// Expected number of points.
    pub points: usize,
    /// Expected number of fragments.
    pub fragments: usize,
    /// Expected number of boundaries.
    pub boundaries: usize,
}

impl Default for StoreCapacity {
    fn default() -> Self {
        Self {
            points: 500_000,
            fragments: 50_000,
            boundaries: 5_000,
        }
    }
}

/// A composite boundary and its accumulated weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Boundary identifier.
    pub id: i64,
    /// Member fragment identifiers in source order.
    pub fragment_ids: Vec<i64>,
    /// Sum of all weight contributions observed for this boundary.
    pub weight: f64,
}

/// Counters describing what the store has seen.
///
/// Absent and unparsable weight tags both contribute zero weight, but they are
/// counted separately so callers can tell a missing tag from a broken one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestStats {
    /// Point observations, including overwrites.
    pub points: u64,
    /// Fragment observations, including overwrites.
    pub fragments: u64,
    /// Boundary observations, including repeats for the same identifier.
    pub boundary_events: u64,
    /// Boundary members dropped because they do not reference a fragment.
    pub ignored_members: u64,
    /// Boundary observations without a weight tag.
    pub weights_absent: u64,
    /// Boundary observations whose weight tag could not be parsed.
    pub weights_unparsable: u64,
}

/// Outcome of parsing a raw weight tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightTag {
    /// No tag was supplied.
    Absent,
    /// The tag could not be read as a finite number.
    Unparsable,
    /// A finite numeric contribution.
    Value(f64),
}

impl WeightTag {
    /// Weight contributed by this tag; anything but a value counts as zero.
    #[must_use]
    pub const fn contribution(self) -> f64 {
        match self {
            Self::Value(value) => value,
            Self::Absent | Self::Unparsable => 0.0,
        }
    }
}

/// Parse a raw weight tag value.
///
/// Surrounding whitespace is ignored. Non-finite results such as `NaN` or
/// `inf` are rejected so they cannot poison weight normalisation.
///
/// # Examples
/// ```
/// use boundline_core::{WeightTag, parse_weight};
///
/// assert_eq!(parse_weight(Some(" 4.5 ")), WeightTag::Value(4.5));
/// assert_eq!(parse_weight(Some("lots")), WeightTag::Unparsable);
/// assert_eq!(parse_weight(None), WeightTag::Absent);
/// ```
#[must_use]
pub fn parse_weight(raw: Option<&str>) -> WeightTag {
    let Some(raw) = raw else {
        return WeightTag::Absent;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => WeightTag::Value(value),
        _ => WeightTag::Unparsable,
    }
}

/// Add two weights, saturating at the largest finite magnitude.
fn saturating_sum(total: f64, delta: f64) -> f64 {
    let sum = total + delta;
    if sum.is_finite() {
        sum
    } else {
        f64::MAX.copysign(sum)
    }
}

/// Owned tables of ingested entities.
#[derive(Debug, Default)]
pub struct EntityStore {
    points: HashMap<i64, Coord<f64>>,
    fragments: HashMap<i64, Vec<i64>>,
    boundaries: HashMap<i64, Boundary>,
    boundary_order: Vec<i64>,
    stats: IngestStats,
}

impl EntityStore {
    /// Create an empty store with the default capacity plan.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(StoreCapacity::default())
    }

    /// Create an empty store with explicit table sizes.
    #[must_use]
    pub fn with_capacity(capacity: StoreCapacity) -> Self {
        Self {
            points: HashMap::with_capacity(capacity.points),
            fragments: HashMap::with_capacity(capacity.fragments),
            boundaries: HashMap::with_capacity(capacity.boundaries),
            boundary_order: Vec::with_capacity(capacity.boundaries),
            stats: IngestStats::default(),
        }
    }

    /// Insert or replace a point. Coordinates are stored as `x = lon`,
    /// `y = lat`.
    pub fn put_point(&mut self, id: i64, lat: f64, lon: f64) {
        self.stats.points += 1;
        self.points.insert(id, Coord { x: lon, y: lat });
    }

    /// Insert or replace a fragment's point references.
    pub fn put_fragment(&mut self, id: i64, point_ids: Vec<i64>) {
        self.stats.fragments += 1;
        self.fragments.insert(id, point_ids);
    }

    /// Record a boundary observation.
    ///
    /// The first observation creates the boundary. Later observations replace
    /// the membership list and add `weight_delta` to the running weight.
    pub fn add_boundary(&mut self, id: i64, fragment_ids: Vec<i64>, weight_delta: f64) {
        self.stats.boundary_events += 1;
        match self.boundaries.get_mut(&id) {
            Some(existing) => {
                existing.fragment_ids = fragment_ids;
                existing.weight = saturating_sum(existing.weight, weight_delta);
            }
            None => {
                self.boundary_order.push(id);
                self.boundaries.insert(
                    id,
                    Boundary {
                        id,
                        fragment_ids,
                        weight: weight_delta,
                    },
                );
            }
        }
    }

    /// Record a boundary observation from a raw weight tag.
    ///
    /// Returns the parsed tag so callers can react to it.
    pub fn add_boundary_tagged(
        &mut self,
        id: i64,
        fragment_ids: Vec<i64>,
        weight_tag: Option<&str>,
    ) -> WeightTag {
        let parsed = parse_weight(weight_tag);
        match parsed {
            WeightTag::Absent => self.stats.weights_absent += 1,
            WeightTag::Unparsable => {
                self.stats.weights_unparsable += 1;
                debug!("Boundary {id}: ignoring unparsable weight tag {weight_tag:?}");
            }
            WeightTag::Value(_) => {}
        }
        self.add_boundary(id, fragment_ids, parsed.contribution());
        parsed
    }

    pub(crate) fn record_ignored_members(&mut self, count: u64) {
        self.stats.ignored_members += count;
    }

    /// Look up a point's coordinate.
    #[must_use]
    pub fn point(&self, id: i64) -> Option<Coord<f64>> {
        self.points.get(&id).copied()
    }

    /// Look up a fragment's point references.
    #[must_use]
    pub fn fragment(&self, id: i64) -> Option<&[i64]> {
        self.fragments.get(&id).map(Vec::as_slice)
    }

    /// Look up a boundary.
    #[must_use]
    pub fn boundary(&self, id: i64) -> Option<&Boundary> {
        self.boundaries.get(&id)
    }

    /// Iterate boundaries in the order they were first observed.
    pub fn boundaries(&self) -> impl Iterator<Item = &Boundary> + '_ {
        self.boundary_order
            .iter()
            .filter_map(|id| self.boundaries.get(id))
    }

    /// Number of distinct boundaries.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundary_order.len()
    }

    /// Ingestion counters.
    #[must_use]
    pub const fn stats(&self) -> IngestStats {
        self.stats
    }
}

//! Load-then-finalize entry point.
//!
//! The [`Assembler`] owns an [`EntityStore`] during ingestion. `finalize`
//! consumes it, stitches every boundary, optionally projects the result and
//! drops the store.

use geo::Coord;
use log::info;

use crate::entity::{Entity, Member, MemberKind};
use crate::projection::GeoPoint;
use crate::stitch::{BoundaryPath, Stitcher};
use crate::store::{EntityStore, IngestStats, StoreCapacity, WeightTag};

/// Coordinate space of finalized paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Projection {
    /// Raw degrees with `x = longitude`, `y = latitude`.
    Geographic,
    /// Web-Mercator meters with Y growing southward.
    #[default]
    Mercator,
}

impl Projection {
    /// Project a stored `x = lon`, `y = lat` coordinate.
    #[must_use]
    pub fn project(self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Self::Geographic => coord,
            Self::Mercator => GeoPoint::from(coord).screen_meters(),
        }
    }
}

/// A finished path handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    /// Boundary the path was stitched from.
    pub boundary_id: i64,
    /// Accumulated weight of that boundary.
    pub weight: f64,
    /// Non-empty coordinates in the requested projection.
    pub coords: Vec<Coord<f64>>,
}

impl WeightedPath {
    fn from_boundary_path(path: BoundaryPath, projection: Projection) -> Self {
        Self {
            boundary_id: path.boundary_id,
            weight: path.weight,
            coords: path
                .coords
                .into_iter()
                .map(|coord| projection.project(coord))
                .collect(),
        }
    }
}

/// Ingestion interface feeding the stitcher.
///
/// # Examples
/// ```
/// use boundline_core::{Assembler, Member, Projection};
///
/// let mut assembler = Assembler::new();
/// assembler.observe_point(1, 0.0, 0.0);
/// assembler.observe_point(2, 1.0, 1.0);
/// assembler.observe_fragment(10, vec![1, 2]);
/// assembler.observe_boundary(100, &[Member::fragment(10)], Some("2"));
///
/// let paths = assembler.finalize(Projection::Geographic);
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].weight, 2.0);
/// ```
#[derive(Debug, Default)]
pub struct Assembler {
    store: EntityStore,
}

impl Assembler {
    /// Create an assembler with the default capacity plan.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(StoreCapacity::default())
    }

    /// Create an assembler with explicit table sizes.
    #[must_use]
    pub fn with_capacity(capacity: StoreCapacity) -> Self {
        Self {
            store: EntityStore::with_capacity(capacity),
        }
    }

    /// Dispatch a tagged entity.
    pub fn ingest(&mut self, entity: Entity) {
        match entity {
            Entity::Point { id, lat, lon } => self.observe_point(id, lat, lon),
            Entity::Fragment { id, point_ids } => self.observe_fragment(id, point_ids),
            Entity::Boundary {
                id,
                members,
                weight_tag,
            } => {
                self.observe_boundary(id, &members, weight_tag.as_deref());
            }
        }
    }

    /// Record a point.
    pub fn observe_point(&mut self, id: i64, lat: f64, lon: f64) {
        self.store.put_point(id, lat, lon);
    }

    /// Record a fragment.
    pub fn observe_fragment(&mut self, id: i64, point_ids: Vec<i64>) {
        self.store.put_fragment(id, point_ids);
    }

    /// Record a boundary. Members other than fragments are ignored.
    pub fn observe_boundary(
        &mut self,
        id: i64,
        members: &[Member],
        weight_tag: Option<&str>,
    ) -> WeightTag {
        let fragment_ids: Vec<i64> = members
            .iter()
            .filter(|member| member.kind == MemberKind::Fragment)
            .map(|member| member.id)
            .collect();
        let ignored = members.len() - fragment_ids.len();
        self.store
            .record_ignored_members(u64::try_from(ignored).unwrap_or(u64::MAX));
        self.store.add_boundary_tagged(id, fragment_ids, weight_tag)
    }

    /// Ingestion counters so far.
    #[must_use]
    pub const fn stats(&self) -> IngestStats {
        self.store.stats()
    }

    /// Borrow the underlying store.
    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Stitch every boundary and project the result.
    ///
    /// Paths follow boundary first-observation order, then run order within
    /// each boundary. The store is dropped when this returns.
    #[must_use]
    pub fn finalize(self, projection: Projection) -> Vec<WeightedPath> {
        let paths: Vec<WeightedPath> = Stitcher::new(&self.store)
            .paths()
            .into_iter()
            .map(|path| WeightedPath::from_boundary_path(path, projection))
            .collect();
        let stats = self.store.stats();
        info!(
            "Assembled {} paths from {} boundaries ({} weight tags absent, {} unparsable)",
            paths.len(),
            self.store.boundary_count(),
            stats.weights_absent,
            stats.weights_unparsable,
        );
        paths
    }
}

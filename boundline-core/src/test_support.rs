//! Test-only builders for small synthetic datasets.

use crate::{Assembler, Entity, Member};

/// Incrementally describes points, fragments and boundaries.
///
/// Entities are replayed into an [`Assembler`] in the order they were
/// added, mirroring how a stream of map elements is ingested.
#[derive(Debug, Default, Clone)]
pub struct DatasetBuilder {
    entities: Vec<Entity>,
}

impl DatasetBuilder {
    /// Start an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point at `lat`, `lon`.
    pub fn point(mut self, id: i64, lat: f64, lon: f64) -> Self {
        self.entities.push(Entity::Point { id, lat, lon });
        self
    }

    /// Add a fragment referencing `point_ids` in order.
    pub fn fragment(mut self, id: i64, point_ids: &[i64]) -> Self {
        self.entities.push(Entity::Fragment {
            id,
            point_ids: point_ids.to_vec(),
        });
        self
    }

    /// Add a boundary made of the given fragments.
    pub fn boundary(mut self, id: i64, fragment_ids: &[i64], weight_tag: Option<&str>) -> Self {
        self.entities.push(Entity::Boundary {
            id,
            members: fragment_ids.iter().copied().map(Member::fragment).collect(),
            weight_tag: weight_tag.map(str::to_owned),
        });
        self
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Replay every entity into a fresh assembler.
    pub fn assemble(self) -> Assembler {
        let mut assembler = Assembler::new();
        for entity in self.entities {
            assembler.ingest(entity);
        }
        assembler
    }
}

/// A unit square split into two fragments that meet at both ends.
///
/// Points `1..=4` sit at the corners; fragment `10` runs `1,2,3` and fragment
/// `11` runs `3,4,1`. Boundary `100` carries `weight_tag`.
pub fn unit_square(weight_tag: Option<&str>) -> DatasetBuilder {
    DatasetBuilder::new()
        .point(1, 0.0, 0.0)
        .point(2, 0.0, 1.0)
        .point(3, 1.0, 1.0)
        .point(4, 1.0, 0.0)
        .fragment(10, &[1, 2, 3])
        .fragment(11, &[3, 4, 1])
        .boundary(100, &[10, 11], weight_tag)
}

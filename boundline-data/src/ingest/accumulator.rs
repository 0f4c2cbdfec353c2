//! Internal accumulator for OpenStreetMap (OSM) PBF ingestion.
//!
//! Translates decoded elements into boundline entities, feeding them to an
//! [`Assembler`] while building the element summary.
use boundline_core::{Assembler, Entity, Member, MemberKind};
use osmpbf::{Element, RelMemberType};

use super::tags::find_tag;
use super::{IngestOptions, OsmIngestReport, OsmIngestSummary};

#[derive(Debug)]
pub(super) struct OsmBoundaryAccumulator<'o> {
    options: &'o IngestOptions,
    summary: OsmIngestSummary,
    assembler: Assembler,
}

impl<'o> OsmBoundaryAccumulator<'o> {
    pub(super) fn new(options: &'o IngestOptions) -> Self {
        Self {
            options,
            summary: OsmIngestSummary::default(),
            assembler: Assembler::new(),
        }
    }

    pub(super) fn process_element(&mut self, element: Element<'_>) {
        match element {
            Element::Node(node) => self.process_node(node.id(), node.lat(), node.lon()),
            Element::DenseNode(node) => self.process_node(node.id(), node.lat(), node.lon()),
            Element::Way(way) => {
                self.summary.record_way();
                self.assembler.ingest(Entity::Fragment {
                    id: way.id(),
                    point_ids: way.refs().collect(),
                });
            }
            Element::Relation(relation) => {
                self.summary.record_relation();
                let members = relation
                    .members()
                    .map(|member| Member {
                        kind: member_kind(member.member_type),
                        id: member.member_id,
                    })
                    .collect();
                let weight_tag =
                    find_tag(relation.tags(), &self.options.weight_tag).map(str::to_owned);
                self.assembler.ingest(Entity::Boundary {
                    id: relation.id(),
                    members,
                    weight_tag,
                });
            }
        }
    }

    fn process_node(&mut self, id: i64, lat: f64, lon: f64) {
        if !self.summary.record_node(lon, lat) {
            return;
        }
        self.assembler.ingest(Entity::Point { id, lat, lon });
    }

    pub(super) fn into_report(self) -> OsmIngestReport {
        OsmIngestReport {
            summary: self.summary,
            assembler: self.assembler,
        }
    }
}

fn member_kind(member_type: RelMemberType) -> MemberKind {
    match member_type {
        RelMemberType::Node => MemberKind::Point,
        RelMemberType::Way => MemberKind::Fragment,
        RelMemberType::Relation => MemberKind::Boundary,
    }
}

//! Tagged entities delivered by an ingestion source.
//!
//! Sources convert whatever they read (PBF blocks, XML, fixtures) into
//! [`Entity`] values and hand them to [`crate::Assembler::ingest`]. Each
//! variant owns its data so the source can drop its buffers immediately.

/// Kind of a boundary member as reported by the source.
///
/// Only [`MemberKind::Fragment`] members take part in stitching; the other
/// kinds are counted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    /// A standalone point (an OSM node).
    Point,
    /// A line fragment (an OSM way).
    Fragment,
    /// A nested boundary (an OSM relation).
    Boundary,
}

/// A typed reference from a boundary to another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    /// Kind of the referenced entity.
    pub kind: MemberKind,
    /// Identifier of the referenced entity.
    pub id: i64,
}

impl Member {
    /// Reference a line fragment.
    ///
    /// # Examples
    /// ```
    /// use boundline_core::{Member, MemberKind};
    ///
    /// let member = Member::fragment(7);
    /// assert_eq!(member.kind, MemberKind::Fragment);
    /// ```
    #[must_use]
    pub const fn fragment(id: i64) -> Self {
        Self {
            kind: MemberKind::Fragment,
            id,
        }
    }

    /// Reference a standalone point.
    #[must_use]
    pub const fn point(id: i64) -> Self {
        Self {
            kind: MemberKind::Point,
            id,
        }
    }

    /// Reference a nested boundary.
    #[must_use]
    pub const fn boundary(id: i64) -> Self {
        Self {
            kind: MemberKind::Boundary,
            id,
        }
    }
}

/// A single ingested record.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A located point.
    Point {
        /// Point identifier.
        id: i64,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// An ordered run of point references.
    Fragment {
        /// Fragment identifier.
        id: i64,
        /// Referenced point identifiers in order.
        point_ids: Vec<i64>,
    },
    /// A composite boundary built from fragments.
    Boundary {
        /// Boundary identifier.
        id: i64,
        /// Members in source order.
        members: Vec<Member>,
        /// Raw value of the weight tag, when the tag is present.
        weight_tag: Option<String>,
    },
}

//! Typed S-124 dataset tree produced by one encode call
//!
//! The tree is created fresh per encode, handed to the caller, and never
//! mutated afterwards. Serialization to XML lives in
//! [`crate::serializer`]; schema validation in [`crate::validate`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial reference carried by every envelope and geometry element.
pub const SRS_NAME: &str = "EPSG:4326";

/// Root document node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset identifier, e.g. `DK.NW-016-17`
    pub id: String,
    /// Bounding envelope over all parts' geometry; absent when no
    /// coordinates exist anywhere
    pub bounded_by: Option<Envelope>,
    /// The document preamble
    pub preamble: Preamble,
    /// Feature parts in source-part order
    pub parts: Vec<FeaturePart>,
    /// References to other messages
    pub references: Vec<DatasetReference>,
}

/// Minimal bounding rectangle; corners in `(lat, lon)` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// `(min lat, min lon)`
    pub lower_corner: [f64; 2],
    /// `(max lat, max lon)`
    pub upper_corner: [f64; 2],
}

impl Envelope {
    /// Build an envelope from a `[min-lon, min-lat, max-lon, max-lat]` box,
    /// reordering the corners to `(lat, lon)`.
    pub fn from_bbox(bbox: [f64; 4]) -> Self {
        Self {
            lower_corner: [bbox[1], bbox[0]],
            upper_corner: [bbox[3], bbox[2]],
        }
    }
}

/// Document header: series identity, titles, publication date and
/// area/locality context, plus forward references to every feature part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preamble {
    /// Preamble identifier, `PR.<dataset-id>`
    pub id: String,
    /// Canonical warning-series identifier
    pub series: SeriesIdentifier,
    /// Title per available language
    pub titles: Vec<LocalizedText>,
    /// Publication date of the message
    pub publication_date: Option<DateTime<Utc>>,
    /// One general-area node per message area; may carry no name when the
    /// gazetteer walk is exhausted
    pub general_areas: Vec<LocationNode>,
    /// One locality node per message area; same exhaustion rule
    pub localities: Vec<LocationNode>,
    /// `#<dataset-id>.<n>` reference per emitted feature part
    pub part_refs: Vec<String>,
}

/// Language-tagged text node; `language` is an ISO 639-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// ISO 639-2 language code
    pub language: String,
    /// Text content
    pub text: String,
}

/// General-area or locality node carrying zero or more location names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationNode {
    /// Resolved names; empty when the ancestor walk found none
    pub location_names: Vec<LocalizedText>,
}

/// Canonical compound key identifying a warning within its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesIdentifier {
    /// Issuing country code
    pub country: String,
    /// Production-agency code
    pub production_agency: String,
    /// Name of the warning series
    pub name_of_series: String,
    /// Warning type; `None` when the message category has no S-124 mapping
    pub warning_type: Option<WarningType>,
    /// Warning number within the series; `-1` when unassigned
    pub warning_number: i32,
    /// Two-digit issue year
    pub year: i32,
    /// MRN of the warning
    pub warning_identifier: String,
}

/// S-124 warning type of a series identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningType {
    /// Local navigational warning
    LocalNavigationalWarning,
    /// Coastal navigational warning
    CoastalNavigationalWarning,
    /// Sub-area navigational warning
    SubAreaNavigationalWarning,
    /// NAVAREA navigational warning
    NavareaNavigationalWarning,
}

impl WarningType {
    /// Code-list label emitted into the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::LocalNavigationalWarning => "local navigational warning",
            WarningType::CoastalNavigationalWarning => "coastal navigational warning",
            WarningType::SubAreaNavigationalWarning => "sub-area navigational warning",
            WarningType::NavareaNavigationalWarning => "NAVAREA navigational warning",
        }
    }
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One geometrically-located warning fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePart {
    /// Part identifier, `<dataset-id>.<1-based-part-index>`
    pub id: String,
    /// Bounding envelope over this part's geometry
    pub bounded_by: Option<Envelope>,
    /// Registry identifier of the feature object
    pub object_identifier: FeatureObjectIdentifier,
    /// Point/curve/surface slots in encounter order
    pub geometry: Vec<GeometryProperty>,
    /// Localized warning text
    pub warning_information: Vec<LocalizedText>,
    /// Event-date range of the part
    pub fixed_date_range: FixedDateRange,
    /// `#PR.<dataset-id>` back-reference to the preamble
    pub header_ref: String,
}

/// Fixed registry identifier attached to every feature part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureObjectIdentifier {
    /// Registering agency code
    pub agency: String,
    /// Feature identification number
    pub feature_identification_number: u32,
    /// Feature identification subdivision
    pub feature_identification_subdivision: u32,
}

impl Default for FeatureObjectIdentifier {
    fn default() -> Self {
        Self {
            agency: "99".to_string(),
            feature_identification_number: 9999,
            feature_identification_subdivision: 9999,
        }
    }
}

/// One point/curve/surface slot in a feature part's geometry list.
///
/// Curve and surface slots may be empty: degenerate source geometry (a
/// single-point line, a ring-less polygon) keeps its slot but renders no
/// coordinates. Callers decide whether to treat an empty slot as
/// informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryProperty {
    /// Point slot; always carries a concrete point
    Point(GmlPoint),
    /// Curve slot; empty for sub-2-point input
    Curve(Option<GmlCurve>),
    /// Surface slot; empty for input without a usable exterior ring
    Surface(Option<GmlSurface>),
}

/// Concrete point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmlPoint {
    /// Element identifier, `G.<dataset-id>.<n>`
    pub id: String,
    /// Single `(lat, lon)` position
    pub pos: Vec<f64>,
}

/// Concrete curve geometry with one line-string segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmlCurve {
    /// Element identifier, `G.<dataset-id>.<n>`
    pub id: String,
    /// Flat `(lat, lon)` sequence of the segment
    pub pos_list: Vec<f64>,
}

/// Concrete surface geometry; ring 0 of the source polygon becomes the
/// exterior boundary, every further ring an interior hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmlSurface {
    /// Element identifier, `G.<dataset-id>.<n>`
    pub id: String,
    /// Flat `(lat, lon)` sequence of the exterior ring
    pub exterior: Vec<f64>,
    /// Flat `(lat, lon)` sequences of the interior rings, in source order
    pub interiors: Vec<Vec<f64>>,
}

/// Event-date range of a feature part. Times of day are only carried for
/// intervals that are not all-day; truncated dates are carried whenever the
/// interval bounds are known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixedDateRange {
    /// Start time of day
    pub time_of_day_start: Option<NaiveTime>,
    /// End time of day
    pub time_of_day_end: Option<NaiveTime>,
    /// Start date
    pub date_start: Option<NaiveDate>,
    /// End date
    pub date_end: Option<NaiveDate>,
}

impl FixedDateRange {
    /// Whether the range carries no dates at all.
    pub fn is_empty(&self) -> bool {
        self.time_of_day_start.is_none()
            && self.time_of_day_end.is_none()
            && self.date_start.is_none()
            && self.date_end.is_none()
    }
}

/// Typed reference to another message, carried as an information member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReference {
    /// Relationship category
    pub category: ReferenceCategory,
    /// Series identifier of the referring message
    pub series: SeriesIdentifier,
}

/// S-124 reference category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceCategory {
    /// The referenced message is cancelled by this one
    Cancellation,
    /// Generic source reference; also the fallback for unmapped kinds
    SourceReference,
}

impl ReferenceCategory {
    /// Code-list label emitted into the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceCategory::Cancellation => "cancellation",
            ReferenceCategory::SourceReference => "source reference",
        }
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_from_bbox_reorders_corners() {
        let envelope = Envelope::from_bbox([10.5, 55.2, 12.0, 56.0]);
        assert_eq!(envelope.lower_corner, [55.2, 10.5]);
        assert_eq!(envelope.upper_corner, [56.0, 12.0]);
    }

    #[test]
    fn test_fixed_date_range_is_empty() {
        let mut range = FixedDateRange::default();
        assert!(range.is_empty());

        range.date_start = NaiveDate::from_ymd_opt(2017, 6, 1);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_warning_type_labels() {
        assert_eq!(
            WarningType::SubAreaNavigationalWarning.to_string(),
            "sub-area navigational warning"
        );
        assert_eq!(
            WarningType::NavareaNavigationalWarning.as_str(),
            "NAVAREA navigational warning"
        );
    }
}

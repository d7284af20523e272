//! Navigational-warning message projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::geometry::FeatureCollection;

/// Main message class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainType {
    /// Navigational warning
    Nw,
    /// Notice to mariners; not representable as an S-124 dataset
    Nm,
}

impl MainType {
    /// Lower-case segment used when building the message MRN.
    pub fn mrn_segment(&self) -> &'static str {
        match self {
            MainType::Nw => "nw",
            MainType::Nm => "nm",
        }
    }
}

/// Concrete warning or notice class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningCategory {
    /// Local navigational warning
    LocalWarning,
    /// Coastal navigational warning
    CoastalWarning,
    /// Sub-area navigational warning
    SubareaWarning,
    /// NAVAREA navigational warning
    NavareaWarning,
    /// Temporary notice to mariners
    TemporaryNotice,
    /// Preliminary notice to mariners
    PreliminaryNotice,
    /// Permanent notice to mariners
    PermanentNotice,
    /// Miscellaneous notice to mariners
    MiscellaneousNotice,
}

/// Localized message title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDesc {
    /// ISO 639-1 language code
    pub lang: String,
    /// Title in that language
    pub title: Option<String>,
}

/// Localized message-part details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePartDesc {
    /// ISO 639-1 language code
    pub lang: String,
    /// Warning text in that language
    pub details: Option<String>,
}

/// Event-date interval of a message part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    /// When set, the interval covers whole days and carries no time of day
    pub all_day: bool,
    /// Interval start
    pub from_date: Option<DateTime<Utc>>,
    /// Interval end
    pub to_date: Option<DateTime<Utc>>,
}

/// Typed link to another message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReference {
    /// Identifier of the referenced message
    pub message_id: String,
    /// Relationship to the referenced message
    pub kind: ReferenceKind,
}

/// Relationship carried by a message reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// Plain reference
    Reference,
    /// Repetition of an earlier message
    Repetition,
    /// Repetition with a new time
    RepetitionNewTime,
    /// Cancellation of an earlier message
    Cancellation,
    /// Update of an earlier message
    Update,
}

/// One geometrically-located fragment of a message, independently dated
/// and described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePart {
    /// 0-based position among the message's parts
    pub index_no: usize,
    /// Localized warning texts
    pub descs: Vec<MessagePartDesc>,
    /// Event-date intervals
    pub event_dates: Vec<DateInterval>,
    /// Located features of this part, if any
    pub geometry: Option<FeatureCollection>,
}

impl MessagePart {
    /// Localized details record for the given language, if present.
    pub fn desc(&self, lang: &str) -> Option<&MessagePartDesc> {
        self.descs.iter().find(|desc| desc.lang == lang)
    }

    /// Whether the part carries at least one feature.
    pub fn has_geometry(&self) -> bool {
        self.geometry
            .as_ref()
            .is_some_and(|collection| !collection.features.is_empty())
    }
}

/// Fully-populated message handed to the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier
    pub id: String,
    /// Short identifier preferred over `id` when building external ids
    pub short_id: Option<String>,
    /// Main message class
    pub main_type: MainType,
    /// Concrete warning or notice class
    pub category: WarningCategory,
    /// Sequence number within the series; required by the encoder
    pub number: Option<u32>,
    /// Four-digit issue year
    pub year: Option<i32>,
    /// Start of the publication window
    pub publish_date_from: Option<DateTime<Utc>>,
    /// End of the publication window
    pub publish_date_to: Option<DateTime<Utc>>,
    /// Localized titles
    pub descs: Vec<MessageDesc>,
    /// Message parts in source order
    pub parts: Vec<MessagePart>,
    /// Areas the message applies to, in source order
    pub areas: Vec<Area>,
    /// References to other messages
    pub references: Vec<MessageReference>,
}

impl Message {
    /// Localized title record for the given language, if present.
    pub fn desc(&self, lang: &str) -> Option<&MessageDesc> {
        self.descs.iter().find(|desc| desc.lang == lang)
    }

    /// Short identifier when assigned, the full identifier otherwise.
    pub fn internal_id(&self) -> &str {
        self.short_id.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_id_prefers_short_id() {
        let mut message = Message {
            id: "8b2e0f1c".to_string(),
            short_id: Some("NW-016-17".to_string()),
            main_type: MainType::Nw,
            category: WarningCategory::LocalWarning,
            number: Some(16),
            year: Some(2017),
            publish_date_from: None,
            publish_date_to: None,
            descs: vec![],
            parts: vec![],
            areas: vec![],
            references: vec![],
        };
        assert_eq!(message.internal_id(), "NW-016-17");

        message.short_id = None;
        assert_eq!(message.internal_id(), "8b2e0f1c");
    }

    #[test]
    fn test_part_has_geometry() {
        let mut part = MessagePart {
            index_no: 0,
            descs: vec![],
            event_dates: vec![],
            geometry: None,
        };
        assert!(!part.has_geometry());

        part.geometry = Some(FeatureCollection::default());
        assert!(!part.has_geometry());

        part.geometry = Some(FeatureCollection {
            features: vec![crate::geometry::Feature {
                geometry: Some(crate::geometry::Geometry::Point {
                    coordinates: vec![12.0, 56.0],
                }),
            }],
        });
        assert!(part.has_geometry());
    }
}

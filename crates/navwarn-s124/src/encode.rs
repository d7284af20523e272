//! Assembly of a complete dataset tree from one message
//!
//! A single forward pass: precondition checks, dataset envelope, preamble,
//! feature parts, references. All per-call state (the geometry-identifier
//! counter in particular) is allocated here and threaded explicitly, so
//! concurrent encodes of unrelated messages share nothing.

use navwarn_model::{
    FeatureCollection, MainType, Message, MessagePart, ReferenceKind,
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::area::{general_area_name, locality_name};
use crate::dataset::{
    Dataset, DatasetReference, Envelope, FeatureObjectIdentifier, FeaturePart, FixedDateRange,
    LocalizedText, LocationNode, Preamble, ReferenceCategory, SeriesIdentifier,
};
use crate::geometry::encode_geometry;
use crate::gml::{compute_bbox, GeomIds};
use crate::series::{build_series_identifier, language_code};

/// Fatal precondition failures; no document is produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Notices to mariners cannot be expressed as an S-124 dataset
    #[error("S-124 does not support notices to mariners")]
    UnsupportedMainType,

    /// Un-numbered warnings have no series identity
    #[error("S-124 does not support un-numbered navigational warnings")]
    MissingSequenceNumber,
}

/// Languages served by the encoder; the first is the fallback.
const LANGUAGES: [&str; 2] = ["en", "da"];

fn ensure_language(lang: &str) -> &str {
    LANGUAGES
        .iter()
        .copied()
        .find(|supported| supported.eq_ignore_ascii_case(lang))
        .unwrap_or(LANGUAGES[0])
}

/// Encode one message into a fresh dataset tree.
///
/// Returns the complete tree or one of the fatal [`EncodeError`] cases.
/// Degenerate input inside the message (parts without geometry, extra event
/// intervals, unresolvable area names, unmapped categories) is logged and
/// encoded best-effort.
pub fn encode_dataset(message: &Message, lang: &str) -> Result<Dataset, EncodeError> {
    if message.main_type == MainType::Nm {
        return Err(EncodeError::UnsupportedMainType);
    }
    let number = message.number.ok_or(EncodeError::MissingSequenceNumber)?;

    let lang = ensure_language(lang);

    let internal_id = message.internal_id();
    let dataset_id = format!("DK.{internal_id}");
    let mrn = format!(
        "urn:mrn:iho:{}:dk:{}",
        message.main_type.mrn_segment(),
        internal_id.to_lowercase()
    );

    let mut ids = GeomIds::new();

    let collections: Vec<&FeatureCollection> = message
        .parts
        .iter()
        .filter_map(|part| part.geometry.as_ref())
        .collect();
    let bounded_by = compute_bbox(&collections).map(Envelope::from_bbox);

    let preamble = build_preamble(message, lang, &dataset_id, &mrn, number);
    let parts = build_feature_parts(message, lang, &dataset_id, &mut ids);
    let references = build_references(message, &mrn, number);

    Ok(Dataset {
        id: dataset_id,
        bounded_by,
        preamble,
        parts,
        references,
    })
}

fn series_for(message: &Message, mrn: &str, number: u32) -> SeriesIdentifier {
    let year = message.year.map(|year| year.rem_euclid(100)).unwrap_or(0);
    build_series_identifier(message.category, number as i32, year, mrn)
}

fn build_preamble(
    message: &Message,
    lang: &str,
    dataset_id: &str,
    mrn: &str,
    number: u32,
) -> Preamble {
    let mut titles = Vec::new();
    for desc in &message.descs {
        if let Some(title) = desc.title.as_deref().filter(|title| !title.trim().is_empty()) {
            titles.push(LocalizedText {
                language: language_code(&desc.lang).to_string(),
                text: title.to_string(),
            });
        }
    }

    let mut general_areas = Vec::new();
    let mut localities = Vec::new();
    for area in &message.areas {
        let general = general_area_name(area);
        if general.is_none() {
            debug!("no gazetteer name resolved for area, emitting unnamed general area");
        }
        let locality = locality_name(area, lang);
        if locality.is_none() {
            debug!(lang, "no locality name resolved for area, emitting unnamed locality");
        }
        general_areas.push(LocationNode {
            location_names: general.into_iter().collect(),
        });
        localities.push(LocationNode {
            location_names: locality.into_iter().collect(),
        });
    }

    let part_refs = message
        .parts
        .iter()
        .filter(|part| part.has_geometry())
        .map(|part| format!("#{}.{}", dataset_id, part.index_no + 1))
        .collect();

    Preamble {
        id: format!("PR.{dataset_id}"),
        series: series_for(message, mrn, number),
        titles,
        publication_date: message.publish_date_from,
        general_areas,
        localities,
        part_refs,
    }
}

fn build_feature_parts(
    message: &Message,
    lang: &str,
    dataset_id: &str,
    ids: &mut GeomIds,
) -> Vec<FeaturePart> {
    let mut parts = Vec::new();
    for part in &message.parts {
        match part.geometry.as_ref().filter(|g| !g.features.is_empty()) {
            Some(geometry) => parts.push(build_feature_part(part, geometry, lang, dataset_id, ids)),
            None => error!(
                index = part.index_no,
                "message part without geometry features is not supported, skipping"
            ),
        }
    }
    parts
}

fn build_feature_part(
    part: &MessagePart,
    geometry: &FeatureCollection,
    lang: &str,
    dataset_id: &str,
    ids: &mut GeomIds,
) -> FeaturePart {
    let bounded_by = compute_bbox(&[geometry]).map(Envelope::from_bbox);

    let mut nodes = Vec::new();
    for feature in &geometry.features {
        if let Some(feature_geometry) = &feature.geometry {
            nodes.extend(encode_geometry(feature_geometry, dataset_id, ids));
        }
    }

    let mut warning_information = Vec::new();
    if let Some(desc) = part.desc(lang) {
        if let Some(details) = desc.details.as_deref().filter(|details| !details.trim().is_empty()) {
            warning_information.push(LocalizedText {
                language: language_code(lang).to_string(),
                text: details.to_string(),
            });
        }
    }

    FeaturePart {
        id: format!("{}.{}", dataset_id, part.index_no + 1),
        bounded_by,
        object_identifier: FeatureObjectIdentifier::default(),
        geometry: nodes,
        warning_information,
        fixed_date_range: build_date_range(part),
        header_ref: format!("#PR.{dataset_id}"),
    }
}

fn build_date_range(part: &MessagePart) -> FixedDateRange {
    let mut range = FixedDateRange::default();
    let Some(interval) = part.event_dates.first() else {
        return range;
    };
    if part.event_dates.len() > 1 {
        warn!(
            count = part.event_dates.len(),
            "multiple event date intervals, only the first is encoded"
        );
    }

    if !interval.all_day {
        range.time_of_day_start = interval.from_date.map(|date| date.time());
        range.time_of_day_end = interval.to_date.map(|date| date.time());
    }
    range.date_start = interval.from_date.map(|date| date.date_naive());
    range.date_end = interval.to_date.map(|date| date.date_naive());
    range
}

fn build_references(message: &Message, mrn: &str, number: u32) -> Vec<DatasetReference> {
    message
        .references
        .iter()
        .map(|reference| {
            let category = match reference.kind {
                ReferenceKind::Cancellation => ReferenceCategory::Cancellation,
                ReferenceKind::Reference
                | ReferenceKind::Repetition
                | ReferenceKind::RepetitionNewTime
                | ReferenceKind::Update => ReferenceCategory::SourceReference,
            };
            DatasetReference {
                category,
                series: series_for(message, mrn, number),
            }
        })
        .collect()
}

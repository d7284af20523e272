//! XML serialization of dataset trees
//!
//! Element order and namespaces follow the schema bundled under
//! `schemas/`; validation of the produced text lives in
//! [`crate::validate`].

use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use thiserror::Error;

use crate::dataset::{
    Dataset, DatasetReference, Envelope, FeaturePart, FixedDateRange, GeometryProperty,
    LocalizedText, LocationNode, Preamble, SeriesIdentifier, SRS_NAME,
};

const NS_S124: &str = "http://www.iho.int/S124/gml/1.0";
const NS_GML: &str = "http://www.opengis.net/gml/3.2";
const NS_S100: &str = "http://www.iho.int/s100gml/1.0";
const NS_XLINK: &str = "http://www.w3.org/1999/xlink";

/// Result type for serialization.
pub type Result<T> = std::result::Result<T, SerializeError>;

/// Failures while writing a dataset to text.
#[derive(Error, Debug)]
pub enum SerializeError {
    /// I/O error from the underlying writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The produced bytes were not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a dataset tree to XML text, pretty-printed (2-space indent)
/// or compact.
pub fn to_xml(dataset: &Dataset, pretty: bool) -> Result<String> {
    let mut buffer = Vec::new();
    if pretty {
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
        write_dataset(&mut writer, dataset)?;
    } else {
        let mut writer = Writer::new(&mut buffer);
        write_dataset(&mut writer, dataset)?;
    }
    Ok(String::from_utf8(buffer)?)
}

fn write_dataset<W: Write>(writer: &mut Writer<W>, dataset: &Dataset) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("S124:DataSet");
    root.push_attribute(("xmlns:S124", NS_S124));
    root.push_attribute(("xmlns:gml", NS_GML));
    root.push_attribute(("xmlns:S100", NS_S100));
    root.push_attribute(("xmlns:xlink", NS_XLINK));
    root.push_attribute(("gml:id", dataset.id.as_str()));
    writer.write_event(Event::Start(root))?;

    if let Some(envelope) = &dataset.bounded_by {
        write_envelope(writer, envelope)?;
    }

    writer.write_event(Event::Start(BytesStart::new("S124:imember")))?;
    write_preamble(writer, &dataset.preamble)?;
    writer.write_event(Event::End(BytesEnd::new("S124:imember")))?;

    for part in &dataset.parts {
        writer.write_event(Event::Start(BytesStart::new("S124:member")))?;
        write_feature_part(writer, part)?;
        writer.write_event(Event::End(BytesEnd::new("S124:member")))?;
    }

    for reference in &dataset.references {
        writer.write_event(Event::Start(BytesStart::new("S124:imember")))?;
        write_reference(writer, reference)?;
        writer.write_event(Event::End(BytesEnd::new("S124:imember")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("S124:DataSet")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn pos_text(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_envelope<W: Write>(writer: &mut Writer<W>, envelope: &Envelope) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("gml:boundedBy")))?;
    let mut element = BytesStart::new("gml:Envelope");
    element.push_attribute(("srsName", SRS_NAME));
    writer.write_event(Event::Start(element))?;
    write_text_element(writer, "gml:lowerCorner", &pos_text(&envelope.lower_corner))?;
    write_text_element(writer, "gml:upperCorner", &pos_text(&envelope.upper_corner))?;
    writer.write_event(Event::End(BytesEnd::new("gml:Envelope")))?;
    writer.write_event(Event::End(BytesEnd::new("gml:boundedBy")))?;
    Ok(())
}

fn write_localized<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &LocalizedText,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    write_text_element(writer, "S124:language", &text.language)?;
    write_text_element(writer, "S124:text", &text.text)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_location_node<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    node: &LocationNode,
) -> Result<()> {
    if node.location_names.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    for location_name in &node.location_names {
        write_localized(writer, "S124:locationName", location_name)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_series<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    series: &SeriesIdentifier,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    write_text_element(writer, "S124:nameOfSeries", &series.name_of_series)?;
    if let Some(warning_type) = &series.warning_type {
        write_text_element(writer, "S124:typeOfWarning", warning_type.as_str())?;
    }
    write_text_element(writer, "S124:warningNumber", &series.warning_number.to_string())?;
    write_text_element(writer, "S124:year", &series.year.to_string())?;
    write_text_element(writer, "S124:productionAgency", &series.production_agency)?;
    write_text_element(writer, "S124:country", &series.country)?;
    write_text_element(writer, "S124:warningIdentifier", &series.warning_identifier)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_preamble<W: Write>(writer: &mut Writer<W>, preamble: &Preamble) -> Result<()> {
    let mut element = BytesStart::new("S124:NWPreamble");
    element.push_attribute(("gml:id", preamble.id.as_str()));
    writer.write_event(Event::Start(element))?;

    write_series(writer, "S124:messageSeriesIdentifier", &preamble.series)?;

    for title in &preamble.titles {
        write_localized(writer, "S124:title", title)?;
    }

    if let Some(date) = &preamble.publication_date {
        write_text_element(
            writer,
            "S124:publicationDate",
            &date.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
    }

    for general_area in &preamble.general_areas {
        write_location_node(writer, "S124:generalArea", general_area)?;
    }
    for locality in &preamble.localities {
        write_location_node(writer, "S124:locality", locality)?;
    }

    for href in &preamble.part_refs {
        let mut reference = BytesStart::new("S124:theWarningPart");
        reference.push_attribute(("xlink:href", href.as_str()));
        writer.write_event(Event::Empty(reference))?;
    }

    writer.write_event(Event::End(BytesEnd::new("S124:NWPreamble")))?;
    Ok(())
}

fn write_feature_part<W: Write>(writer: &mut Writer<W>, part: &FeaturePart) -> Result<()> {
    let mut element = BytesStart::new("S124:NavigationalWarningFeaturePart");
    element.push_attribute(("gml:id", part.id.as_str()));
    writer.write_event(Event::Start(element))?;

    if let Some(envelope) = &part.bounded_by {
        write_envelope(writer, envelope)?;
    }

    writer.write_event(Event::Start(BytesStart::new("S124:featureObjectIdentifier")))?;
    write_text_element(writer, "S100:agency", &part.object_identifier.agency)?;
    write_text_element(
        writer,
        "S100:featureIdentificationNumber",
        &part.object_identifier.feature_identification_number.to_string(),
    )?;
    write_text_element(
        writer,
        "S100:featureIdentificationSubdivision",
        &part
            .object_identifier
            .feature_identification_subdivision
            .to_string(),
    )?;
    writer.write_event(Event::End(BytesEnd::new("S124:featureObjectIdentifier")))?;

    for node in &part.geometry {
        writer.write_event(Event::Start(BytesStart::new("S124:geometry")))?;
        write_geometry_property(writer, node)?;
        writer.write_event(Event::End(BytesEnd::new("S124:geometry")))?;
    }

    for information in &part.warning_information {
        write_localized(writer, "S124:warningInformation", information)?;
    }

    write_date_range(writer, &part.fixed_date_range)?;

    let mut header = BytesStart::new("S124:header");
    header.push_attribute(("xlink:href", part.header_ref.as_str()));
    writer.write_event(Event::Empty(header))?;

    writer.write_event(Event::End(BytesEnd::new("S124:NavigationalWarningFeaturePart")))?;
    Ok(())
}

fn write_geometry_property<W: Write>(
    writer: &mut Writer<W>,
    node: &GeometryProperty,
) -> Result<()> {
    match node {
        GeometryProperty::Point(point) => {
            writer.write_event(Event::Start(BytesStart::new("S100:pointProperty")))?;
            let mut element = BytesStart::new("S100:Point");
            element.push_attribute(("gml:id", point.id.as_str()));
            element.push_attribute(("srsName", SRS_NAME));
            writer.write_event(Event::Start(element))?;
            write_text_element(writer, "gml:pos", &pos_text(&point.pos))?;
            writer.write_event(Event::End(BytesEnd::new("S100:Point")))?;
            writer.write_event(Event::End(BytesEnd::new("S100:pointProperty")))?;
        }
        GeometryProperty::Curve(None) => {
            writer.write_event(Event::Empty(BytesStart::new("S100:curveProperty")))?;
        }
        GeometryProperty::Curve(Some(curve)) => {
            writer.write_event(Event::Start(BytesStart::new("S100:curveProperty")))?;
            let mut element = BytesStart::new("S100:Curve");
            element.push_attribute(("gml:id", curve.id.as_str()));
            element.push_attribute(("srsName", SRS_NAME));
            writer.write_event(Event::Start(element))?;
            writer.write_event(Event::Start(BytesStart::new("gml:segments")))?;
            writer.write_event(Event::Start(BytesStart::new("gml:LineStringSegment")))?;
            write_text_element(writer, "gml:posList", &pos_text(&curve.pos_list))?;
            writer.write_event(Event::End(BytesEnd::new("gml:LineStringSegment")))?;
            writer.write_event(Event::End(BytesEnd::new("gml:segments")))?;
            writer.write_event(Event::End(BytesEnd::new("S100:Curve")))?;
            writer.write_event(Event::End(BytesEnd::new("S100:curveProperty")))?;
        }
        GeometryProperty::Surface(None) => {
            writer.write_event(Event::Empty(BytesStart::new("S100:surfaceProperty")))?;
        }
        GeometryProperty::Surface(Some(surface)) => {
            writer.write_event(Event::Start(BytesStart::new("S100:surfaceProperty")))?;
            let mut element = BytesStart::new("S100:Surface");
            element.push_attribute(("gml:id", surface.id.as_str()));
            element.push_attribute(("srsName", SRS_NAME));
            writer.write_event(Event::Start(element))?;
            writer.write_event(Event::Start(BytesStart::new("gml:patches")))?;
            writer.write_event(Event::Start(BytesStart::new("gml:PolygonPatch")))?;

            writer.write_event(Event::Start(BytesStart::new("gml:exterior")))?;
            write_linear_ring(writer, &surface.exterior)?;
            writer.write_event(Event::End(BytesEnd::new("gml:exterior")))?;

            for interior in &surface.interiors {
                writer.write_event(Event::Start(BytesStart::new("gml:interior")))?;
                write_linear_ring(writer, interior)?;
                writer.write_event(Event::End(BytesEnd::new("gml:interior")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("gml:PolygonPatch")))?;
            writer.write_event(Event::End(BytesEnd::new("gml:patches")))?;
            writer.write_event(Event::End(BytesEnd::new("S100:Surface")))?;
            writer.write_event(Event::End(BytesEnd::new("S100:surfaceProperty")))?;
        }
    }
    Ok(())
}

fn write_linear_ring<W: Write>(writer: &mut Writer<W>, pos_list: &[f64]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("gml:LinearRing")))?;
    write_text_element(writer, "gml:posList", &pos_text(pos_list))?;
    writer.write_event(Event::End(BytesEnd::new("gml:LinearRing")))?;
    Ok(())
}

fn write_date_range<W: Write>(writer: &mut Writer<W>, range: &FixedDateRange) -> Result<()> {
    if range.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("S124:fixedDateRange")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("S124:fixedDateRange")))?;
    if let Some(time) = &range.time_of_day_start {
        write_text_element(writer, "S124:timeOfDayStart", &time.format("%H:%M:%S").to_string())?;
    }
    if let Some(time) = &range.time_of_day_end {
        write_text_element(writer, "S124:timeOfDayEnd", &time.format("%H:%M:%S").to_string())?;
    }
    if let Some(date) = &range.date_start {
        write_truncated_date(writer, "S124:dateStart", &date.format("%Y-%m-%d").to_string())?;
    }
    if let Some(date) = &range.date_end {
        write_truncated_date(writer, "S124:dateEnd", &date.format("%Y-%m-%d").to_string())?;
    }
    writer.write_event(Event::End(BytesEnd::new("S124:fixedDateRange")))?;
    Ok(())
}

fn write_truncated_date<W: Write>(writer: &mut Writer<W>, name: &str, date: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    write_text_element(writer, "S124:date", date)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_reference<W: Write>(writer: &mut Writer<W>, reference: &DatasetReference) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("S124:References")))?;
    write_text_element(writer, "S124:referenceCategory", reference.category.as_str())?;
    write_series(writer, "S124:messageSeriesIdentifier", &reference.series)?;
    writer.write_event(Event::End(BytesEnd::new("S124:References")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FeatureObjectIdentifier, GmlPoint};

    fn minimal_dataset() -> Dataset {
        Dataset {
            id: "DK.NW-042-17".to_string(),
            bounded_by: Some(Envelope {
                lower_corner: [56.0, 12.0],
                upper_corner: [56.0, 12.0],
            }),
            preamble: Preamble {
                id: "PR.DK.NW-042-17".to_string(),
                series: SeriesIdentifier {
                    country: "DK".to_string(),
                    production_agency: "111".to_string(),
                    name_of_series: "Danish Nav Warn".to_string(),
                    warning_type: Some(crate::dataset::WarningType::CoastalNavigationalWarning),
                    warning_number: 42,
                    year: 17,
                    warning_identifier: "urn:mrn:iho:nw:dk:nw-042-17".to_string(),
                },
                titles: vec![LocalizedText {
                    language: "eng".to_string(),
                    text: "Firing exercises. The Sound.".to_string(),
                }],
                publication_date: None,
                general_areas: vec![LocationNode::default()],
                localities: vec![],
                part_refs: vec!["#DK.NW-042-17.1".to_string()],
            },
            parts: vec![FeaturePart {
                id: "DK.NW-042-17.1".to_string(),
                bounded_by: None,
                object_identifier: FeatureObjectIdentifier::default(),
                geometry: vec![GeometryProperty::Point(GmlPoint {
                    id: "G.DK.NW-042-17.1".to_string(),
                    pos: vec![56.0, 12.0],
                })],
                warning_information: vec![],
                fixed_date_range: FixedDateRange::default(),
                header_ref: "#PR.DK.NW-042-17".to_string(),
            }],
            references: vec![DatasetReference {
                category: crate::dataset::ReferenceCategory::Cancellation,
                series: SeriesIdentifier {
                    country: "DK".to_string(),
                    production_agency: "111".to_string(),
                    name_of_series: "Danish Nav Warn".to_string(),
                    warning_type: None,
                    warning_number: 42,
                    year: 17,
                    warning_identifier: "urn:mrn:iho:nw:dk:nw-042-17".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_compact_output_structure() {
        let xml = to_xml(&minimal_dataset(), false).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<S124:DataSet xmlns:S124="http://www.iho.int/S124/gml/1.0""#));
        assert!(xml.contains(r#"gml:id="DK.NW-042-17""#));
        assert!(xml.contains("<gml:lowerCorner>56 12</gml:lowerCorner>"));
        assert!(xml.contains("<gml:pos>56 12</gml:pos>"));
        assert!(xml.contains(r##"<S124:theWarningPart xlink:href="#DK.NW-042-17.1"/>"##));
        assert!(xml.contains(r##"<S124:header xlink:href="#PR.DK.NW-042-17"/>"##));
        assert!(xml.contains("<S124:referenceCategory>cancellation</S124:referenceCategory>"));
        assert!(xml.contains("<S124:typeOfWarning>coastal navigational warning</S124:typeOfWarning>"));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let xml = to_xml(&minimal_dataset(), true).unwrap();
        assert!(xml.contains("\n  <S124:imember>"));
    }

    #[test]
    fn test_unresolved_general_area_is_empty_element() {
        let xml = to_xml(&minimal_dataset(), false).unwrap();
        assert!(xml.contains("<S124:generalArea/>"));
    }

    #[test]
    fn test_empty_curve_slot_is_kept() {
        let mut dataset = minimal_dataset();
        dataset.parts[0].geometry = vec![GeometryProperty::Curve(None)];
        let xml = to_xml(&dataset, false).unwrap();
        assert!(xml.contains("<S124:geometry><S100:curveProperty/></S124:geometry>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut dataset = minimal_dataset();
        dataset.preamble.titles[0].text = "Bridge <closed> & guarded".to_string();
        let xml = to_xml(&dataset, false).unwrap();
        assert!(xml.contains("Bridge &lt;closed&gt; &amp; guarded"));
    }
}

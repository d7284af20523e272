//! Schema validation of serialized datasets
//!
//! The schema is parsed once at construction; that is the only fatal point.
//! Validation itself never fails as a Rust error: every schema mismatch is
//! returned as a [`Diagnostic`], document-parse failures included.

use std::path::{Path, PathBuf};

use libxml::error::{StructuredError, XmlErrorLevel};
use libxml::parser::Parser;
use libxml::schemas::{SchemaParserContext, SchemaValidationContext};
use serde::Serialize;
use thiserror::Error;

/// Severity of one validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Schema warning
    Warning,
    /// Schema violation
    Error,
    /// Fatal parser-level problem
    Fatal,
    /// Problem outside the schema engine's severity scheme, e.g. the
    /// document not being well-formed XML
    Unknown,
    /// I/O failure while reading the document
    Io,
}

/// One validation finding. Findings are data, never Rust errors.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity of the finding
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// 1-based line in the validated text, when known
    pub line: Option<u32>,
    /// 1-based column in the validated text, when known
    pub column: Option<u32>,
}

/// Schema loading failure; construction is the only fatal point of the
/// validator.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema could not be parsed
    #[error("failed to load schema {path}: {details}")]
    Load {
        /// Path of the schema that failed to load
        path: String,
        /// Parser messages, joined
        details: String,
    },
}

/// Validator holding the S-124 schema, parsed once at construction.
///
/// The underlying libxml2 validation context accumulates error state during
/// a run, so validation takes `&mut self`; use one validator per thread for
/// concurrent validation. Encoding itself needs no shared state at all.
pub struct S124Validator {
    schema: SchemaValidationContext,
    parser: Parser,
}

impl S124Validator {
    /// Load the schema from the given path.
    pub fn new(schema_path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = schema_path.as_ref();
        let mut schema_parser = SchemaParserContext::from_file(&path.to_string_lossy());
        let schema =
            SchemaValidationContext::from_parser(&mut schema_parser).map_err(|errors| {
                SchemaError::Load {
                    path: path.display().to_string(),
                    details: join_messages(&errors),
                }
            })?;
        Ok(Self {
            schema,
            parser: Parser::default(),
        })
    }

    /// Path of the schema bundled with this crate.
    pub fn bundled_schema() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/S124.xsd")
    }

    /// Validate serialized dataset text, returning every finding in schema
    /// order. An empty list means the document is valid.
    pub fn validate(&mut self, xml: &str) -> Vec<Diagnostic> {
        let document = match self.parser.parse_string(xml) {
            Ok(document) => document,
            Err(err) => {
                return vec![Diagnostic {
                    severity: Severity::Unknown,
                    message: format!("document is not well-formed XML: {err:?}"),
                    line: None,
                    column: None,
                }];
            }
        };

        match self.schema.validate_document(&document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(diagnostic_from).collect(),
        }
    }

    /// Validate an XML file on disk. Read failures become a single
    /// [`Severity::Io`] finding.
    pub fn validate_file(&mut self, path: impl AsRef<Path>) -> Vec<Diagnostic> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(xml) => self.validate(&xml),
            Err(err) => vec![Diagnostic {
                severity: Severity::Io,
                message: format!("failed to read {}: {err}", path.as_ref().display()),
                line: None,
                column: None,
            }],
        }
    }
}

fn diagnostic_from(error: &StructuredError) -> Diagnostic {
    let severity = match error.level {
        XmlErrorLevel::Warning => Severity::Warning,
        XmlErrorLevel::Error => Severity::Error,
        XmlErrorLevel::Fatal => Severity::Fatal,
        XmlErrorLevel::None => Severity::Unknown,
    };
    Diagnostic {
        severity,
        message: error
            .message
            .as_deref()
            .map(str::trim_end)
            .unwrap_or_default()
            .to_string(),
        line: error.line.and_then(|line| u32::try_from(line).ok()),
        column: error.col.and_then(|col| u32::try_from(col).ok()),
    }
}

fn join_messages(errors: &[StructuredError]) -> String {
    let joined = errors
        .iter()
        .filter_map(|error| error.message.as_deref().map(str::trim_end))
        .collect::<Vec<_>>()
        .join("; ");
    if joined.is_empty() {
        "no parser detail available".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_dataset;
    use crate::serializer::to_xml;
    use chrono::{TimeZone, Utc};
    use navwarn_model::{
        Feature, FeatureCollection, Geometry, MainType, Message, MessageDesc, MessagePart,
        MessagePartDesc, WarningCategory,
    };

    fn sample_message() -> Message {
        Message {
            id: "a3184c2f".to_string(),
            short_id: Some("NW-016-17".to_string()),
            main_type: MainType::Nw,
            category: WarningCategory::LocalWarning,
            number: Some(16),
            year: Some(2017),
            publish_date_from: Utc.with_ymd_and_hms(2017, 6, 1, 10, 30, 0).single(),
            publish_date_to: None,
            descs: vec![MessageDesc {
                lang: "en".to_string(),
                title: Some("Racon out of order.".to_string()),
            }],
            parts: vec![MessagePart {
                index_no: 0,
                descs: vec![MessagePartDesc {
                    lang: "en".to_string(),
                    details: Some("The racon on buoy no. 2 is out of order.".to_string()),
                }],
                event_dates: vec![],
                geometry: Some(FeatureCollection {
                    features: vec![Feature {
                        geometry: Some(Geometry::Point {
                            coordinates: vec![12.61, 55.57],
                        }),
                    }],
                }),
            }],
            areas: vec![],
            references: vec![],
        }
    }

    fn validator() -> S124Validator {
        S124Validator::new(S124Validator::bundled_schema()).unwrap()
    }

    #[test]
    fn test_encoded_dataset_is_schema_valid() {
        let dataset = encode_dataset(&sample_message(), "en").unwrap();
        let xml = to_xml(&dataset, true).unwrap();

        let diagnostics = validator().validate(&xml);
        assert!(diagnostics.is_empty(), "unexpected findings: {diagnostics:?}");
    }

    #[test]
    fn test_three_malformed_elements_yield_three_diagnostics() {
        let dataset = encode_dataset(&sample_message(), "en").unwrap();
        let xml = to_xml(&dataset, true)
            .unwrap()
            .replace(
                "<S124:warningNumber>16</S124:warningNumber>",
                "<S124:warningNumber>sixteen</S124:warningNumber>",
            )
            .replace(
                "<S124:year>17</S124:year>",
                "<S124:year>seventeen</S124:year>",
            )
            .replace(
                "<S100:featureIdentificationNumber>9999</S100:featureIdentificationNumber>",
                "<S100:featureIdentificationNumber>many</S100:featureIdentificationNumber>",
            );

        let diagnostics = validator().validate(&xml);
        assert_eq!(diagnostics.len(), 3, "findings: {diagnostics:?}");
        for diagnostic in &diagnostics {
            assert_eq!(diagnostic.severity, Severity::Error);
            assert!(diagnostic.line.is_some());
        }
        // findings arrive in document order on distinct lines
        let lines: Vec<_> = diagnostics.iter().map(|d| d.line.unwrap()).collect();
        assert!(lines.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_not_well_formed_input_is_unknown() {
        let diagnostics = validator().validate("<S124:DataSet>");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Unknown);
    }

    #[test]
    fn test_diagnostics_serialize_with_location_fields() {
        let diagnostics = validator().validate("<S124:DataSet>");
        let json = serde_json::to_string(&diagnostics).unwrap();
        assert!(json.contains(r#""severity":"Unknown""#));
        assert!(json.contains(r#""line":null"#));
        assert!(json.contains(r#""column":null"#));
    }

    #[test]
    fn test_missing_file_is_io() {
        let diagnostics = validator().validate_file("no/such/dataset.gml");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Io);
    }
}

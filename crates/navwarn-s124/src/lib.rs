//! S-124 dataset encoding and schema validation for navigational warnings
//!
//! This crate turns the read-only message projection from
//! [`navwarn_model`] into an S-124-style GML dataset: a typed document
//! tree, its XML text form, and schema diagnostics for the produced text.
//!
//! Encoding is synchronous and CPU-bound; every piece of per-call state is
//! allocated inside [`encode::encode_dataset`], so unrelated messages can be
//! encoded concurrently without any shared state. The schema validator is
//! the only load-once resource.
//!
//! # Example
//!
//! ```rust
//! use navwarn_model::{MainType, Message, WarningCategory};
//! use navwarn_s124::{encode_dataset, to_xml};
//!
//! let message = Message {
//!     id: "NW-016-17".to_string(),
//!     short_id: None,
//!     main_type: MainType::Nw,
//!     category: WarningCategory::LocalWarning,
//!     number: Some(16),
//!     year: Some(2017),
//!     publish_date_from: None,
//!     publish_date_to: None,
//!     descs: vec![],
//!     parts: vec![],
//!     areas: vec![],
//!     references: vec![],
//! };
//!
//! let dataset = encode_dataset(&message, "en").expect("encodable message");
//! assert_eq!(dataset.id, "DK.NW-016-17");
//!
//! let xml = to_xml(&dataset, true).expect("serializable dataset");
//! assert!(xml.contains("S124:DataSet"));
//! ```

pub mod area;
pub mod dataset;
pub mod encode;
pub mod geometry;
pub mod gml;
pub mod serializer;
pub mod series;
pub mod validate;

pub use dataset::{
    Dataset, DatasetReference, Envelope, FeatureObjectIdentifier, FeaturePart, FixedDateRange,
    GeometryProperty, LocalizedText, LocationNode, Preamble, ReferenceCategory, SeriesIdentifier,
    WarningType,
};
pub use encode::{encode_dataset, EncodeError};
pub use serializer::{to_xml, SerializeError};
pub use validate::{Diagnostic, S124Validator, SchemaError, Severity};

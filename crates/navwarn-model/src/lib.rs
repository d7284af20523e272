//! Read-only projection of a navigational-warning message
//!
//! This crate defines the fully-populated, already-localized message model
//! that the message-management layer hands to the S-124 encoder. The encoder
//! performs no database or network access; everything it needs is carried by
//! these types.
//!
//! # Example
//!
//! ```rust
//! use navwarn_model::Geometry;
//!
//! let geojson = r#"{"type":"Point","coordinates":[12.0,56.0]}"#;
//! let geometry: Geometry = serde_json::from_str(geojson).unwrap();
//! assert_eq!(
//!     geometry,
//!     Geometry::Point {
//!         coordinates: vec![12.0, 56.0]
//!     }
//! );
//! ```

pub mod area;
pub mod geometry;
pub mod message;

pub use area::{Area, AreaDesc};
pub use geometry::{Feature, FeatureCollection, Geometry};
pub use message::{
    DateInterval, MainType, Message, MessageDesc, MessagePart, MessagePartDesc, MessageReference,
    ReferenceKind, WarningCategory,
};

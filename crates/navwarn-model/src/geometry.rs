//! GeoJSON-style geometry algebra carried by message parts

use serde::{Deserialize, Serialize};

/// Closed set of geometry variants a message part can carry.
///
/// Coordinates are raw `(longitude, latitude)` positions exactly as stored by
/// the message-management layer; the S-124 encoder owns axis ordering of its
/// output. The serde representation is GeoJSON-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position
    Point {
        /// `(lon, lat)` components
        coordinates: Vec<f64>,
    },
    /// A set of independent positions
    MultiPoint {
        /// One `(lon, lat)` array per position
        coordinates: Vec<Vec<f64>>,
    },
    /// A line of consecutive positions
    LineString {
        /// Positions in drawing order
        coordinates: Vec<Vec<f64>>,
    },
    /// A set of independent lines
    MultiLineString {
        /// One position array per component line
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    /// A surface delimited by rings; ring 0 is the exterior boundary,
    /// every following ring is an interior hole
    Polygon {
        /// Rings, each a closed position array
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    /// A set of independent polygons
    MultiPolygon {
        /// One ring array per component polygon
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    /// A nested collection of any of the other variants
    GeometryCollection {
        /// Member geometries in source order
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// Visit every position in the geometry, depth first.
    pub fn for_each_position<F: FnMut(&[f64])>(&self, f: &mut F) {
        match self {
            Geometry::Point { coordinates } => f(coordinates),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                for position in coordinates {
                    f(position);
                }
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                for line in coordinates {
                    for position in line {
                        f(position);
                    }
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        for position in ring {
                            f(position);
                        }
                    }
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for member in geometries {
                    member.for_each_position(f);
                }
            }
        }
    }
}

/// One located fragment of a message part's geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Geometry of the feature, if any
    pub geometry: Option<Geometry>,
}

/// Ordered set of features attached to one message part
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Features in source order
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Visit every position across all features, depth first.
    pub fn for_each_position<F: FnMut(&[f64])>(&self, f: &mut F) {
        for feature in &self.features {
            if let Some(geometry) = &feature.geometry {
                geometry.for_each_position(f);
            }
        }
    }
}

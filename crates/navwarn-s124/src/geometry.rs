//! Recursive mapping from the message geometry algebra onto S-124
//! point/curve/surface property nodes

use navwarn_model::Geometry;
use tracing::debug;

use crate::dataset::{GeometryProperty, GmlCurve, GmlPoint, GmlSurface};
use crate::gml::{flatten_ring, reverse_axes, GeomIds};

/// Encode one geometry variant into its ordered property nodes.
///
/// Degenerate input produces placeholders rather than errors: a position with
/// fewer than two components is skipped, a line with fewer than two points
/// becomes an empty curve slot, a polygon without a usable exterior ring an
/// empty surface slot. Identifiers are consumed from `ids` exactly once per
/// concrete point/curve/surface object.
pub fn encode_geometry(
    geometry: &Geometry,
    dataset_id: &str,
    ids: &mut GeomIds,
) -> Vec<GeometryProperty> {
    let mut nodes = Vec::new();
    append_geometry(geometry, dataset_id, ids, &mut nodes);
    nodes
}

fn append_geometry(
    geometry: &Geometry,
    dataset_id: &str,
    ids: &mut GeomIds,
    nodes: &mut Vec<GeometryProperty>,
) {
    match geometry {
        Geometry::Point { coordinates } => {
            if let Some(point) = point(coordinates, dataset_id, ids) {
                nodes.push(GeometryProperty::Point(point));
            }
        }
        Geometry::MultiPoint { coordinates } => {
            for coordinate in coordinates {
                if let Some(point) = point(coordinate, dataset_id, ids) {
                    nodes.push(GeometryProperty::Point(point));
                }
            }
        }
        Geometry::LineString { coordinates } => {
            nodes.push(GeometryProperty::Curve(curve(coordinates, dataset_id, ids)));
        }
        Geometry::MultiLineString { coordinates } => {
            for line in coordinates {
                nodes.push(GeometryProperty::Curve(curve(line, dataset_id, ids)));
            }
        }
        Geometry::Polygon { coordinates } => {
            nodes.push(GeometryProperty::Surface(surface(
                coordinates,
                dataset_id,
                ids,
            )));
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in coordinates {
                nodes.push(GeometryProperty::Surface(surface(polygon, dataset_id, ids)));
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for member in geometries {
                append_geometry(member, dataset_id, ids, nodes);
            }
        }
    }
}

fn point(coordinates: &[f64], dataset_id: &str, ids: &mut GeomIds) -> Option<GmlPoint> {
    if coordinates.len() < 2 {
        debug!(components = coordinates.len(), "skipping degenerate point");
        return None;
    }
    Some(GmlPoint {
        id: ids.next_id(dataset_id),
        pos: reverse_axes(coordinates),
    })
}

fn curve(points: &[Vec<f64>], dataset_id: &str, ids: &mut GeomIds) -> Option<GmlCurve> {
    if points.len() < 2 {
        debug!(points = points.len(), "line too short, emitting empty curve slot");
        return None;
    }
    Some(GmlCurve {
        id: ids.next_id(dataset_id),
        pos_list: flatten_ring(points),
    })
}

fn surface(rings: &[Vec<Vec<f64>>], dataset_id: &str, ids: &mut GeomIds) -> Option<GmlSurface> {
    let mut remaining = rings.iter();
    let exterior = match remaining.next() {
        Some(ring) if !ring.is_empty() => flatten_ring(ring),
        _ => {
            debug!("polygon without a usable exterior ring, emitting empty surface slot");
            return None;
        }
    };

    let mut interiors = Vec::new();
    for ring in remaining {
        if ring.is_empty() {
            debug!("skipping empty interior ring");
            continue;
        }
        interiors.push(flatten_ring(ring));
    }

    Some(GmlSurface {
        id: ids.next_id(dataset_id),
        exterior,
        interiors,
    })
}

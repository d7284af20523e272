//! Coordinate and identifier plumbing shared by the geometry encoder

use navwarn_model::FeatureCollection;

/// Reverse the component order of a single position.
///
/// Input positions are `(lon, lat)`; the document carries `(lat, lon)`.
pub fn reverse_axes(position: &[f64]) -> Vec<f64> {
    position.iter().rev().copied().collect()
}

/// Flatten a ring or line into one reversed-axis coordinate sequence,
/// preserving point order.
pub fn flatten_ring(points: &[Vec<f64>]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for point in points {
        for component in point.iter().rev() {
            flat.push(*component);
        }
    }
    flat
}

/// Monotonic geometry-identifier source, scoped to one encode call.
///
/// Allocated fresh per call and threaded explicitly through the encoder so
/// concurrent encodes never share counter state.
#[derive(Debug)]
pub struct GeomIds {
    next: u32,
}

impl GeomIds {
    /// A counter seeded at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Next identifier of the form `G.<dataset-id>.<n>`.
    pub fn next_id(&mut self, dataset_id: &str) -> String {
        let id = format!("G.{}.{}", dataset_id, self.next);
        self.next += 1;
        id
    }
}

impl Default for GeomIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal `[min-lon, min-lat, max-lon, max-lat]` box over every coordinate
/// in the collections, or `None` when they contain none. Callers omit the
/// envelope node entirely in the `None` case.
pub fn compute_bbox(collections: &[&FeatureCollection]) -> Option<[f64; 4]> {
    let mut bbox: Option<[f64; 4]> = None;
    for collection in collections {
        collection.for_each_position(&mut |position| {
            if position.len() < 2 {
                return;
            }
            let (lon, lat) = (position[0], position[1]);
            let b = bbox.get_or_insert([lon, lat, lon, lat]);
            b[0] = b[0].min(lon);
            b[1] = b[1].min(lat);
            b[2] = b[2].max(lon);
            b[3] = b[3].max(lat);
        });
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use navwarn_model::{Feature, Geometry};

    #[test]
    fn test_reverse_axes() {
        assert_eq!(reverse_axes(&[10.5, 55.2]), vec![55.2, 10.5]);
        assert!(reverse_axes(&[]).is_empty());
    }

    #[test]
    fn test_flatten_ring_reverses_each_point() {
        let flat = flatten_ring(&[vec![10.0, 55.0], vec![11.0, 56.0]]);
        assert_eq!(flat, vec![55.0, 10.0, 56.0, 11.0]);
    }

    #[test]
    fn test_geom_ids_start_at_one() {
        let mut ids = GeomIds::new();
        assert_eq!(ids.next_id("DK.NW-016-17"), "G.DK.NW-016-17.1");
        assert_eq!(ids.next_id("DK.NW-016-17"), "G.DK.NW-016-17.2");
    }

    #[test]
    fn test_compute_bbox() {
        let collection = FeatureCollection {
            features: vec![
                Feature {
                    geometry: Some(Geometry::Point {
                        coordinates: vec![10.5, 55.2],
                    }),
                },
                Feature {
                    geometry: Some(Geometry::LineString {
                        coordinates: vec![vec![12.0, 56.0], vec![11.0, 54.9]],
                    }),
                },
            ],
        };

        let bbox = compute_bbox(&[&collection]).unwrap();
        assert_eq!(bbox, [10.5, 54.9, 12.0, 56.0]);
    }

    #[test]
    fn test_compute_bbox_empty_is_none() {
        let collection = FeatureCollection::default();
        assert!(compute_bbox(&[&collection]).is_none());
        assert!(compute_bbox(&[]).is_none());
    }
}

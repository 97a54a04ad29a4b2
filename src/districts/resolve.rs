//! Pure selection resolver: point containment and bounding-box queries
//!
//! These functions are side-effect free; the viewport and synchronization
//! layers call them but never the other way around.

use crate::districts::{DistrictId, DistrictIndex};
use geo::{BoundingRect, Contains, Coord, Point, Rect};

/// The id of the first part, in index order, whose polygon contains the
/// point. Source polygons do not overlap, so first-match is also the only
/// match; index order keeps the result deterministic if that assumption is
/// ever violated.
pub fn district_for_point(point: Point<f64>, index: &DistrictIndex) -> Option<DistrictId> {
    index
        .parts()
        .iter()
        .find(|part| part.polygon.contains(&point))
        .map(|part| part.id)
}

/// Like [`district_for_point`], but a hit inside a non-selectable placeholder
/// area resolves to `None` instead of its id. Used for location resolution
/// and pointer hit-testing, so placeholder regions are rejected rather than
/// mis-highlighted.
pub fn selectable_district_for_point(point: Point<f64>, index: &DistrictIndex) -> Option<DistrictId> {
    index
        .parts()
        .iter()
        .filter(|part| part.id.is_selectable())
        .find(|part| part.polygon.contains(&point))
        .map(|part| part.id)
}

/// Union bounding box over every part with the given id, or `None` when no
/// part matches. Callers treat `None` as "cannot focus, leave the viewport
/// unchanged".
pub fn bounds_for_district(id: DistrictId, index: &DistrictIndex) -> Option<Rect<f64>> {
    let mut bounds: Option<Rect<f64>> = None;

    for part in index.parts().iter().filter(|part| part.id == id) {
        if let Some(rect) = part.polygon.bounding_rect() {
            bounds = Some(match bounds {
                None => rect,
                Some(acc) => union(acc, rect),
            });
        }
    }

    bounds
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::districts::DistrictPart;
    use geo::{LineString, Polygon};

    fn square(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (min_lon, min_lat),
                (max_lon, min_lat),
                (max_lon, max_lat),
                (min_lon, max_lat),
                (min_lon, min_lat),
            ]),
            vec![],
        )
    }

    /// Manhattan CB5 around (-73.99, 40.73), Brooklyn CB2, a two-part Queens
    /// district and a non-selectable joint interest area. Non-overlapping.
    fn sample_index() -> DistrictIndex {
        DistrictIndex::from_parts(vec![
            DistrictPart::new(DistrictId::new(105), square(-74.05, 40.70, -73.95, 40.76)),
            DistrictPart::new(DistrictId::new(302), square(-73.95, 40.65, -73.85, 40.70)),
            DistrictPart::new(DistrictId::new(401), square(-73.80, 40.70, -73.75, 40.75)),
            DistrictPart::new(DistrictId::new(401), square(-73.70, 40.76, -73.65, 40.80)),
            DistrictPart::new(DistrictId::new(164), square(-73.94, 40.76, -73.92, 40.80)),
        ])
    }

    #[test]
    fn test_interior_point_resolves() {
        let index = sample_index();
        let id = district_for_point(Point::new(-73.99, 40.73), &index);
        assert_eq!(id, Some(DistrictId::new(105)));

        let id = district_for_point(Point::new(-73.90, 40.67), &index);
        assert_eq!(id, Some(DistrictId::new(302)));
    }

    #[test]
    fn test_outside_point_resolves_to_none() {
        let index = sample_index();
        assert_eq!(district_for_point(Point::new(-73.50, 40.50), &index), None);
        assert_eq!(district_for_point(Point::new(0.0, 0.0), &index), None);
    }

    #[test]
    fn test_multi_part_district_resolves_from_either_part() {
        let index = sample_index();
        assert_eq!(
            district_for_point(Point::new(-73.78, 40.72), &index),
            Some(DistrictId::new(401))
        );
        assert_eq!(
            district_for_point(Point::new(-73.67, 40.78), &index),
            Some(DistrictId::new(401))
        );
    }

    #[test]
    fn test_selectable_resolution_rejects_placeholder_areas() {
        let index = sample_index();
        let inside_park = Point::new(-73.93, 40.78);
        // The raw query still sees the placeholder geometry.
        assert_eq!(
            district_for_point(inside_park, &index),
            Some(DistrictId::new(164))
        );
        // The selectable query rejects it rather than mis-highlighting.
        assert_eq!(selectable_district_for_point(inside_park, &index), None);
    }

    #[test]
    fn test_hole_is_not_contained() {
        let outer = LineString::from(vec![
            (-74.0, 40.0),
            (-73.0, 40.0),
            (-73.0, 41.0),
            (-74.0, 41.0),
            (-74.0, 40.0),
        ]);
        let hole = LineString::from(vec![
            (-73.7, 40.3),
            (-73.3, 40.3),
            (-73.3, 40.7),
            (-73.7, 40.7),
            (-73.7, 40.3),
        ]);
        let index = DistrictIndex::from_parts(vec![DistrictPart::new(
            DistrictId::new(210),
            Polygon::new(outer, vec![hole]),
        )]);

        assert_eq!(
            district_for_point(Point::new(-73.9, 40.1), &index),
            Some(DistrictId::new(210))
        );
        assert_eq!(district_for_point(Point::new(-73.5, 40.5), &index), None);
    }

    #[test]
    fn test_bounds_single_part_equals_own_bounding_box() {
        let index = sample_index();
        let bounds = bounds_for_district(DistrictId::new(105), &index).unwrap();
        assert_eq!(bounds.min().x, -74.05);
        assert_eq!(bounds.min().y, 40.70);
        assert_eq!(bounds.max().x, -73.95);
        assert_eq!(bounds.max().y, 40.76);
    }

    #[test]
    fn test_bounds_union_over_parts() {
        let index = sample_index();
        let bounds = bounds_for_district(DistrictId::new(401), &index).unwrap();
        assert_eq!(bounds.min().x, -73.80);
        assert_eq!(bounds.min().y, 40.70);
        assert_eq!(bounds.max().x, -73.65);
        assert_eq!(bounds.max().y, 40.80);
    }

    #[test]
    fn test_bounds_for_unknown_district_is_none() {
        let index = sample_index();
        assert_eq!(bounds_for_district(DistrictId::new(999), &index), None);
    }

    #[test]
    fn test_empty_index_degrades_to_none() {
        let index = DistrictIndex::new();
        assert_eq!(district_for_point(Point::new(-73.99, 40.73), &index), None);
        assert_eq!(bounds_for_district(DistrictId::new(105), &index), None);
    }
}

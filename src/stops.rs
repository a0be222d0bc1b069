//! Transit stops and the filter/dedup passes that turn them into Voronoi sites.

use ahash::AHashSet;
use geo::Coord;
use serde::Serialize;

use crate::geom::BoundingBox;

/// A named stop at a lon/lat position. Identity is positional.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopFeature {
    pub lon: f64,
    pub lat: f64,
    pub name: String,
}

impl StopFeature {
    pub fn new(lon: f64, lat: f64, name: impl Into<String>) -> Self {
        Self { lon, lat, name: name.into() }
    }

    #[inline]
    pub fn coord(&self) -> Coord<f64> { Coord { x: self.lon, y: self.lat } }

    /// Exact-equality key for the position. `-0.0` and `0.0` share a key.
    #[inline]
    fn coord_key(&self) -> (u64, u64) {
        ((self.lon + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }
}

/// Stops whose position lies inside `bounds` (edges included), in input order.
pub fn filter_within(stops: &[StopFeature], bounds: &BoundingBox) -> Vec<StopFeature> {
    stops.iter()
        .filter(|stop| bounds.contains(stop.coord()))
        .cloned()
        .collect()
}

/// Drop every stop whose position equals an earlier one. First occurrence wins,
/// whatever the names; survivors keep their relative order.
pub fn dedup_by_coords(stops: Vec<StopFeature>) -> Vec<StopFeature> {
    let mut seen = AHashSet::with_capacity(stops.len());
    stops.into_iter()
        .filter(|stop| seen.insert(stop.coord_key()))
        .collect()
}

/// The distinct in-bounds stops fed to the tessellation.
pub fn select_sites(stops: &[StopFeature], bounds: &BoundingBox) -> Vec<StopFeature> {
    dedup_by_coords(filter_within(stops, bounds))
}

#[cfg(test)]
mod tests {
    use super::{dedup_by_coords, filter_within, select_sites, StopFeature};
    use crate::geom::BoundingBox;

    fn zurich_bounds() -> BoundingBox {
        BoundingBox { x_min: 8.40, y_min: 47.30, x_max: 8.60, y_max: 47.45 }
    }

    fn names(stops: &[StopFeature]) -> Vec<&str> {
        stops.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn filter_keeps_edge_points_and_input_order() {
        let stops = vec![
            StopFeature::new(8.60, 47.45, "corner"),
            StopFeature::new(8.39, 47.40, "west"),
            StopFeature::new(8.40, 47.38, "edge"),
            StopFeature::new(8.50, 47.46, "north"),
            StopFeature::new(8.50, 47.38, "inside"),
        ];
        assert_eq!(names(&filter_within(&stops, &zurich_bounds())), ["corner", "edge", "inside"]);
    }

    #[test]
    fn first_occurrence_wins() {
        let stops = vec![
            StopFeature::new(8.50, 47.38, "X"),
            StopFeature::new(8.50, 47.38, "Y"),
        ];
        assert_eq!(dedup_by_coords(stops), vec![StopFeature::new(8.50, 47.38, "X")]);
    }

    #[test]
    fn dedup_is_exact_not_proximity_based() {
        let stops = vec![
            StopFeature::new(8.5, 47.38, "a"),
            StopFeature::new(8.5 + 1e-12, 47.38, "b"),
            StopFeature::new(0.0, 0.0, "c"),
            StopFeature::new(-0.0, 0.0, "d"),
        ];
        assert_eq!(names(&dedup_by_coords(stops)), ["a", "b", "c"]);
    }

    #[test]
    fn dedup_preserves_order_and_is_idempotent() {
        let stops = vec![
            StopFeature::new(3.0, 3.0, "p"),
            StopFeature::new(1.0, 1.0, "q"),
            StopFeature::new(3.0, 3.0, "r"),
            StopFeature::new(2.0, 2.0, "s"),
            StopFeature::new(1.0, 1.0, "t"),
            StopFeature::new(4.0, 4.0, "u"),
        ];
        let once = dedup_by_coords(stops);
        assert_eq!(names(&once), ["p", "q", "s", "u"]);
        assert_eq!(dedup_by_coords(once.clone()), once);
    }

    #[test]
    fn out_of_bounds_and_duplicates_are_both_removed() {
        let stops = vec![
            StopFeature::new(8.50, 47.38, "A"),
            StopFeature::new(8.50, 47.38, "B"),
            StopFeature::new(9.00, 47.38, "C"),
        ];
        assert_eq!(select_sites(&stops, &zurich_bounds()), vec![StopFeature::new(8.50, 47.38, "A")]);
    }

    #[test]
    fn empty_input_yields_empty_sites() {
        assert!(select_sites(&[], &zurich_bounds()).is_empty());
    }
}

//! Voronoi tessellation of planar sites, clipped to a rectangle.
//!
//! Neighbours come from a Delaunay triangulation (`spade`); each cell is the clip
//! rectangle cut by the bisector half-planes against those neighbours only.

use ahash::AHashSet;
use geo::{Coord, LineString, Polygon, Rect};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoronoiError {
    #[error("site {index} duplicates an earlier site at ({x}, {y})")]
    DuplicateSite { index: usize, x: f64, y: f64 },

    #[error("site {index} is not a finite coordinate")]
    NonFiniteSite { index: usize },

    #[error("triangulation rejected site {index}: {reason}")]
    Triangulation { index: usize, reason: String },
}

/// Compute one Voronoi cell per site, in site order, clipped to `clip`.
/// Sites must be distinct; `clip` should contain every site for cells to be non-empty.
pub fn voronoi_cells(sites: &[Coord<f64>], clip: Rect<f64>) -> Result<Vec<Polygon<f64>>, VoronoiError> {
    let mut seen = AHashSet::with_capacity(sites.len());
    for (index, site) in sites.iter().enumerate() {
        if !site.x.is_finite() || !site.y.is_finite() {
            return Err(VoronoiError::NonFiniteSite { index })
        }
        if !seen.insert(((site.x + 0.0).to_bits(), (site.y + 0.0).to_bits())) {
            return Err(VoronoiError::DuplicateSite { index, x: site.x, y: site.y })
        }
    }

    let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
    let handles = sites.iter().enumerate()
        .map(|(index, site)| triangulation.insert(Point2::new(site.x, site.y))
            .map_err(|e| VoronoiError::Triangulation { index, reason: format!("{e:?}") }))
        .collect::<Result<Vec<_>, _>>()?;

    let frame = rect_ring(&clip);

    Ok(sites.iter().zip(&handles)
        .map(|(&site, &handle)| {
            let ring = triangulation.vertex(handle).out_edges()
                .map(|edge| {
                    let p = edge.to().position();
                    Coord { x: p.x, y: p.y }
                })
                .fold(frame.clone(), |ring, neighbor| clip_half_plane(&ring, site, neighbor));
            Polygon::new(LineString::from(ring), vec![])
        })
        .collect())
}

/// Counter-clockwise corners of a rectangle (open ring).
fn rect_ring(rect: &Rect<f64>) -> Vec<Coord<f64>> {
    let (min, max) = (rect.min(), rect.max());
    vec![
        Coord { x: min.x, y: min.y },
        Coord { x: max.x, y: min.y },
        Coord { x: max.x, y: max.y },
        Coord { x: min.x, y: max.y },
    ]
}

/// Sutherland-Hodgman step: keep the part of a convex ring closer to `site` than to `other`.
fn clip_half_plane(ring: &[Coord<f64>], site: Coord<f64>, other: Coord<f64>) -> Vec<Coord<f64>> {
    if ring.is_empty() { return Vec::new() }

    let normal = other - site;
    let mid = (site + other) / 2.0;
    let side = |c: Coord<f64>| (c.x - mid.x) * normal.x + (c.y - mid.y) * normal.y;

    let mut out = Vec::with_capacity(ring.len() + 1);
    let mut prev = ring[ring.len() - 1];
    let mut prev_side = side(prev);
    for &curr in ring {
        let curr_side = side(curr);
        if curr_side <= 0.0 {
            if prev_side > 0.0 { out.push(crossing(prev, curr, prev_side, curr_side)) }
            out.push(curr);
        } else if prev_side <= 0.0 {
            out.push(crossing(prev, curr, prev_side, curr_side));
        }
        prev = curr;
        prev_side = curr_side;
    }
    out
}

#[inline]
fn crossing(a: Coord<f64>, b: Coord<f64>, side_a: f64, side_b: f64) -> Coord<f64> {
    let t = side_a / (side_a - side_b);
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{Area, Contains, Coord, Point, Rect};

    use super::{voronoi_cells, VoronoiError};

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    fn clip() -> Rect<f64> { Rect::new(c(-10.0, -10.0), c(20.0, 10.0)) }

    #[test]
    fn two_sites_split_at_bisector() {
        let cells = voronoi_cells(&[c(0.0, 0.0), c(10.0, 0.0)], clip()).unwrap();
        assert_eq!(cells.len(), 2);
        assert_relative_eq!(cells[0].unsigned_area(), 15.0 * 20.0, epsilon = 1e-9);
        assert_relative_eq!(cells[1].unsigned_area(), 15.0 * 20.0, epsilon = 1e-9);
        assert!(cells[0].contains(&Point::new(4.9, 0.0)));
        assert!(!cells[0].contains(&Point::new(5.1, 0.0)));
    }

    #[test]
    fn single_site_owns_the_whole_clip() {
        let cells = voronoi_cells(&[c(1.0, 1.0)], clip()).unwrap();
        assert_eq!(cells.len(), 1);
        assert_relative_eq!(cells[0].unsigned_area(), 30.0 * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn cells_partition_the_clip_and_keep_site_order() {
        let sites = [c(-5.0, -5.0), c(15.0, 5.0), c(2.0, 7.0), c(8.0, -3.0), c(0.0, 0.0)];
        let cells = voronoi_cells(&sites, clip()).unwrap();
        assert_eq!(cells.len(), sites.len());

        let total: f64 = cells.iter().map(|cell| cell.unsigned_area()).sum();
        assert_relative_eq!(total, 30.0 * 20.0, epsilon = 1e-6);

        for (site, cell) in sites.iter().zip(&cells) {
            assert!(cell.contains(&Point::from(*site)));
        }
    }

    #[test]
    fn collinear_sites_produce_strips() {
        let cells = voronoi_cells(&[c(0.0, 0.0), c(5.0, 0.0), c(10.0, 0.0)], clip()).unwrap();
        assert_relative_eq!(cells[0].unsigned_area(), 12.5 * 20.0, epsilon = 1e-9);
        assert_relative_eq!(cells[1].unsigned_area(), 5.0 * 20.0, epsilon = 1e-9);
        assert_relative_eq!(cells[2].unsigned_area(), 12.5 * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_sites_are_rejected() {
        let err = voronoi_cells(&[c(1.0, 1.0), c(2.0, 2.0), c(1.0, 1.0)], clip()).unwrap_err();
        assert_eq!(err, VoronoiError::DuplicateSite { index: 2, x: 1.0, y: 1.0 });
    }

    #[test]
    fn non_finite_sites_are_rejected() {
        let err = voronoi_cells(&[c(f64::NAN, 1.0)], clip()).unwrap_err();
        assert_eq!(err, VoronoiError::NonFiniteSite { index: 0 });
    }

    #[test]
    fn no_sites_no_cells() {
        assert!(voronoi_cells(&[], clip()).unwrap().is_empty());
    }
}

use std::f64::consts::FRAC_PI_4;

use geo::Coord;

/// Spherical Mercator projection: lon/lat degrees -> planar drawing coords (Y down).
/// `center` lands on `translate`; one radian of longitude spans `scale` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    center: Coord<f64>,
    scale: f64,
    translate: Coord<f64>,
    center_y: f64, // projected latitude of the center, cached
}

#[inline]
fn mercator_y(lat_deg: f64) -> f64 {
    (FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln()
}

impl Mercator {
    pub fn new(center: Coord<f64>, scale: f64, translate: Coord<f64>) -> Self {
        Self { center, scale, translate, center_y: mercator_y(center.y) }
    }

    #[inline] pub fn center(&self) -> Coord<f64> { self.center }

    #[inline] pub fn scale(&self) -> f64 { self.scale }

    #[inline] pub fn translate(&self) -> Coord<f64> { self.translate }

    /// Project a lon/lat coordinate onto the drawing plane.
    #[inline]
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.translate.x + self.scale * (coord.x - self.center.x).to_radians(),
            y: self.translate.y - self.scale * (mercator_y(coord.y) - self.center_y),
        }
    }

    /// Same as `project`, as a tuple for the SVG path builders.
    #[inline]
    pub fn project_xy(&self, coord: &Coord<f64>) -> (f64, f64) {
        let p = self.project(*coord);
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use geo::Coord;

    use super::Mercator;

    fn zurich() -> Mercator {
        Mercator::new(Coord { x: 8.54, y: 47.37 }, 110_000.0, Coord { x: 480.0, y: 240.0 })
    }

    #[test]
    fn center_maps_to_translate() {
        let p = zurich().project(Coord { x: 8.54, y: 47.37 });
        assert_relative_eq!(p.x, 480.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 240.0, epsilon = 1e-9);
    }

    #[test]
    fn longitude_is_linear_in_radians() {
        let proj = Mercator::new(Coord { x: 0.0, y: 0.0 }, 1.0, Coord { x: 0.0, y: 0.0 });
        let p = proj.project(Coord { x: 1.0, y: 0.0 });
        assert_relative_eq!(p.x, PI / 180.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let proj = zurich();
        let north = proj.project(Coord { x: 8.54, y: 47.40 });
        let east = proj.project(Coord { x: 8.60, y: 47.37 });
        assert!(north.y < 240.0);
        assert!(east.x > 480.0);
    }

    #[test]
    fn latitude_spacing_stretches_away_from_equator() {
        let proj = Mercator::new(Coord { x: 0.0, y: 0.0 }, 1000.0, Coord { x: 0.0, y: 0.0 });
        let low = proj.project(Coord { x: 0.0, y: 10.0 }).y - proj.project(Coord { x: 0.0, y: 0.0 }).y;
        let high = proj.project(Coord { x: 0.0, y: 60.0 }).y - proj.project(Coord { x: 0.0, y: 50.0 }).y;
        assert!(high.abs() > low.abs());
    }
}

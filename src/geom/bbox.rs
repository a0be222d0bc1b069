use geo::{Coord, CoordsIter, MultiLineString, Rect};
use serde::Serialize;
use thiserror::Error;

use crate::map::RegionGeometry;

/// Failure to derive a bounding box.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    #[error("no finite coordinates to compute bounds from")]
    Empty,
}

/// Axis-aligned bounding box over lon/lat (or planar) coordinates.
/// Always satisfies `x_min <= x_max` and `y_min <= y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Minimal box covering every finite coordinate in `coords`.
    pub fn from_coords<I>(coords: I) -> Result<Self, BoundsError>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        coords.into_iter()
            .filter(|c| c.x.is_finite() && c.y.is_finite())
            .fold(None, |acc: Option<Self>, c| Some(match acc {
                None => Self { x_min: c.x, y_min: c.y, x_max: c.x, y_max: c.y },
                Some(bbox) => bbox.expanded_to(c),
            }))
            .ok_or(BoundsError::Empty)
    }

    /// Minimal box covering every region shape.
    pub fn of_regions(regions: &[RegionGeometry]) -> Result<Self, BoundsError> {
        Self::from_coords(regions.iter().flat_map(|region| region.shape.coords_iter()))
    }

    /// Box covering a boundary mesh.
    #[inline]
    pub fn of_mesh(mesh: &MultiLineString<f64>) -> Result<Self, BoundsError> {
        Self::from_coords(mesh.coords_iter())
    }

    /// Inclusive containment: points on any edge are inside.
    #[inline]
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        self.x_min <= coord.x && coord.x <= self.x_max
            && self.y_min <= coord.y && coord.y <= self.y_max
    }

    /// Smallest box covering both `self` and `coord`.
    #[inline]
    pub fn expanded_to(&self, coord: Coord<f64>) -> Self {
        Self {
            x_min: self.x_min.min(coord.x),
            y_min: self.y_min.min(coord.y),
            x_max: self.x_max.max(coord.x),
            y_max: self.y_max.max(coord.y),
        }
    }

    /// Grow the box by `margin` on every side.
    #[inline]
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            x_min: self.x_min - margin,
            y_min: self.y_min - margin,
            x_max: self.x_max + margin,
            y_max: self.y_max + margin,
        }
    }

    #[inline] pub fn width(&self) -> f64 { self.x_max - self.x_min }

    #[inline] pub fn height(&self) -> f64 { self.y_max - self.y_min }

    #[inline]
    pub fn center(&self) -> Coord<f64> {
        Coord { x: (self.x_min + self.x_max) / 2.0, y: (self.y_min + self.y_max) / 2.0 }
    }

    #[inline]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.x_min, y: self.y_min },
            Coord { x: self.x_max, y: self.y_max },
        )
    }
}

use geo::{LineString, MultiLineString, MultiPolygon};

/// One administrative region: its identifier, area, and the boundary lines it touches.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub id: String,
    pub shape: MultiPolygon<f64>,
    pub boundary: MultiLineString<f64>,
}

impl RegionGeometry {
    /// Region whose boundary is simply its own rings (exteriors and holes).
    pub fn from_shape(id: impl Into<String>, shape: MultiPolygon<f64>) -> Self {
        let boundary = MultiLineString(
            shape.0.iter()
                .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
                .filter(|ring| !ring.0.is_empty())
                .map(LineString::clone)
                .collect()
        );
        Self { id: id.into(), shape, boundary }
    }
}

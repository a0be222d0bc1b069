//! GeoJSON decoding into crate features.

use ::geojson::{feature::Id, GeoJson, Value as GeoValue};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde_json::Value;

use super::{Feature, LoadError};

/// Decode a FeatureCollection, a single Feature or a bare Geometry.
pub(crate) fn features_from_value(value: Value) -> Result<Vec<Feature>, LoadError> {
    let features = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![::geojson::Feature::from(geometry)],
    };

    features.into_iter()
        .map(|feature| Ok(Feature {
            id: feature.id.map(|id| match id {
                Id::String(s) => s,
                Id::Number(n) => n.to_string(),
            }),
            geometry: feature.geometry.map(|g| convert(&g.value)).transpose()?,
            properties: feature.properties.unwrap_or_default(),
        }))
        .collect()
}

fn coord(position: &[f64]) -> Result<Coord<f64>, LoadError> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(LoadError::ShortPosition),
    }
}

fn line(positions: &[Vec<f64>]) -> Result<LineString<f64>, LoadError> {
    positions.iter().map(|p| coord(p)).collect::<Result<Vec<_>, _>>().map(LineString)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>, LoadError> {
    let mut rings = rings.iter().map(|ring| line(ring));
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect::<Result<Vec<_>, _>>()?))
}

fn convert(value: &GeoValue) -> Result<Geometry<f64>, LoadError> {
    Ok(match value {
        GeoValue::Point(p) => Geometry::Point(Point(coord(p)?)),
        GeoValue::MultiPoint(ps) => Geometry::MultiPoint(MultiPoint(
            ps.iter().map(|p| coord(p).map(Point)).collect::<Result<_, _>>()?
        )),
        GeoValue::LineString(ls) => Geometry::LineString(line(ls)?),
        GeoValue::MultiLineString(lines) => Geometry::MultiLineString(MultiLineString(
            lines.iter().map(|ls| line(ls)).collect::<Result<_, _>>()?
        )),
        GeoValue::Polygon(rings) => Geometry::Polygon(polygon(rings)?),
        GeoValue::MultiPolygon(polygons) => Geometry::MultiPolygon(MultiPolygon(
            polygons.iter().map(|rings| polygon(rings)).collect::<Result<_, _>>()?
        )),
        GeoValue::GeometryCollection(geometries) => Geometry::GeometryCollection(GeometryCollection(
            geometries.iter().map(|g| convert(&g.value)).collect::<Result<_, _>>()?
        )),
    })
}

//! Turn decoded documents into stops and regions.

use geo::{Geometry, MultiLineString, MultiPolygon, Polygon};

use crate::{
    io::{
        parse_document,
        topojson::{is_or_contains, MeshIndex, Topology},
        Document, Feature, LoadError,
    },
    map::RegionGeometry,
    stops::StopFeature,
};

/// Read stop points. Each Point becomes one stop; a MultiPoint becomes one stop per position.
pub(crate) fn read_stops(bytes: &[u8], object: Option<&str>) -> Result<Vec<StopFeature>, LoadError> {
    let features = match parse_document(bytes)? {
        Document::Topology(topology) => topology.features(topology.object(object)?)?,
        Document::GeoJson(features) => features,
    };
    Ok(stops_from_features(&features))
}

fn stops_from_features(features: &[Feature]) -> Vec<StopFeature> {
    let (mut skipped, mut unnamed) = (0usize, 0usize);
    let mut stops = Vec::with_capacity(features.len());

    for feature in features {
        let name = feature.property_string("stopName");
        match &feature.geometry {
            Some(Geometry::Point(p)) => {
                stops.push(StopFeature::new(p.x(), p.y(), name.clone().unwrap_or_default()));
            }
            Some(Geometry::MultiPoint(points)) => {
                stops.extend(points.0.iter()
                    .map(|p| StopFeature::new(p.x(), p.y(), name.clone().unwrap_or_default())));
            }
            _ => {
                skipped += 1;
                continue
            }
        }
        if name.is_none() { unnamed += 1 }
    }

    if skipped > 0 { log::warn!("[map::load] skipped {skipped} stop features without point geometry") }
    if unnamed > 0 { log::warn!("[map::load] {unnamed} stop features have no stopName") }

    stops
}

/// Read regions and the combined boundary mesh.
///
/// From a topology, each region's boundary is the set of arcs it shares with
/// anything (including the outside), and the mesh holds every arc once. From
/// GeoJSON, boundaries are the regions' own rings.
pub(crate) fn read_regions(bytes: &[u8], object: Option<&str>) -> Result<(Vec<RegionGeometry>, MultiLineString<f64>), LoadError> {
    match parse_document(bytes)? {
        Document::Topology(topology) => {
            let object = topology.object(object)?;
            let index = MeshIndex::new(&topology, object)?;
            let features = topology.features(object)?;

            let mut regions = Vec::new();
            for (i, (member, feature)) in Topology::members(object).into_iter().zip(&features).enumerate() {
                let Some(shape) = feature.geometry.as_ref().and_then(polygonal) else {
                    log::debug!("[map::load] region geometry {i} is not polygonal, skipping");
                    continue
                };
                let boundary = index.select(|a, b| is_or_contains(member, a) || is_or_contains(member, b));
                regions.push(RegionGeometry { id: region_id(feature, i), shape, boundary });
            }

            Ok((regions, index.mesh()))
        }
        Document::GeoJson(features) => {
            let regions = features.iter().enumerate()
                .filter_map(|(i, feature)| feature.geometry.as_ref()
                    .and_then(polygonal)
                    .map(|shape| RegionGeometry::from_shape(region_id(feature, i), shape)))
                .collect::<Vec<_>>();

            let mesh = MultiLineString(
                regions.iter().flat_map(|region| region.boundary.0.iter().cloned()).collect()
            );

            Ok((regions, mesh))
        }
    }
}

/// Region identifier: feature id, then `id` or `name` property, then position.
fn region_id(feature: &Feature, index: usize) -> String {
    feature.id.clone()
        .or_else(|| feature.property_string("id"))
        .or_else(|| feature.property_string("name"))
        .unwrap_or_else(|| index.to_string())
}

/// Polygonal part of a geometry, if any.
fn polygonal(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon.clone()])),
        Geometry::MultiPolygon(polygons) => Some(polygons.clone()),
        Geometry::GeometryCollection(collection) => {
            let polygons: Vec<Polygon<f64>> = collection.0.iter()
                .filter_map(polygonal)
                .flat_map(|mp| mp.0)
                .collect();
            (!polygons.is_empty()).then(|| MultiPolygon(polygons))
        }
        _ => None,
    }
}

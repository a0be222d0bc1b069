//! TopoJSON topologies, decoded with the `topojson` crate.
//!
//! Geometry conversion (arc stitching, `!i` reversal, delta and quantization
//! decoding) is the crate's `to_geojson`. On top of it: object selection, null
//! geometries, and the arc -> geometries index behind boundary meshes.

use ::topojson::{to_geojson, Geometry as TopoGeometry, NamedGeometry, TopoJson, Value as TopoValue};
use geo::{Geometry, LineString, MultiLineString};
use serde_json::{json, Map, Value};

use super::{geojson::features_from_value, id_string, Feature, LoadError};

const GEOMETRY_TYPES: [&str; 7] = [
    "Point", "MultiPoint", "LineString", "MultiLineString", "Polygon", "MultiPolygon", "GeometryCollection",
];

/// Name of the scratch object used to decode bare arcs.
const ARC_OBJECT: &str = "arcs";

/// A decoded TopoJSON topology.
pub(crate) struct Topology {
    inner: ::topojson::Topology,
    /// Object JSON after normalization; ids and properties are read from here.
    objects: Map<String, Value>,
    arcs: Value,
    transform: Option<Value>,
}

impl Topology {
    pub(crate) fn from_value(mut value: Value) -> Result<Self, LoadError> {
        if let Some(objects) = value.get_mut("objects").and_then(Value::as_object_mut) {
            objects.values_mut().for_each(normalize);
        }

        let topology = Self {
            inner: parse(&value)?,
            objects: value.get("objects").and_then(Value::as_object).cloned().unwrap_or_default(),
            arcs: value.get("arcs").cloned().unwrap_or_else(|| Value::Array(Vec::new())),
            transform: value.get("transform").cloned(),
        };

        let arc_count = topology.inner.arcs.len();
        for named in &topology.inner.objects {
            visit_arcs(&named.geometry, &mut |arc_ref, _| {
                if arc_index(arc_ref) < arc_count { Ok(()) } else { Err(LoadError::ArcOutOfRange(arc_ref)) }
            })?;
        }

        Ok(topology)
    }

    /// Names of the topology's objects, sorted.
    pub(crate) fn object_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.objects.iter().map(|named| named.name.clone()).collect();
        names.sort();
        names
    }

    /// Look up an object by name; with no name, the topology must hold exactly one object.
    pub(crate) fn object(&self, name: Option<&str>) -> Result<&NamedGeometry, LoadError> {
        match (name, self.inner.objects.as_slice()) {
            (Some(name), objects) => objects.iter().find(|named| named.name == name)
                .ok_or_else(|| LoadError::MissingObject {
                    name: name.to_string(),
                    available: self.object_names(),
                }),
            (None, [only]) => Ok(only),
            (None, _) => Err(LoadError::AmbiguousObject { available: self.object_names() }),
        }
    }

    /// Member geometries of an object; a lone geometry is its own member.
    pub(crate) fn members(object: &NamedGeometry) -> Vec<&TopoGeometry> {
        match &object.geometry.value {
            TopoValue::GeometryCollection(geometries) => geometries.iter().collect(),
            _ => vec![&object.geometry],
        }
    }

    /// Member JSON of an object, parallel to `members`.
    fn member_json(&self, name: &str) -> Vec<Option<&Map<String, Value>>> {
        let Some(object) = self.objects.get(name) else { return Vec::new() };
        match object.get("geometries").and_then(Value::as_array) {
            Some(members) if object.get("type").and_then(Value::as_str) == Some("GeometryCollection") => {
                members.iter().map(Value::as_object).collect()
            }
            _ => vec![object.as_object()],
        }
    }

    /// Convert an object into features, one per member geometry.
    pub(crate) fn features(&self, object: &NamedGeometry) -> Result<Vec<Feature>, LoadError> {
        let converted = to_geojson(&self.inner, &object.name)
            .map_err(|e| LoadError::TopoJson(e.to_string()))?;
        let converted = features_from_value(serde_json::to_value(&converted)?)?;

        let members = self.member_json(&object.name);
        if converted.len() != members.len() {
            return Err(LoadError::TopoJson(format!(
                "object {:?} converted to {} features for {} geometries",
                object.name, converted.len(), members.len(),
            )))
        }

        Ok(members.into_iter().zip(converted)
            .map(|(member, converted)| Feature {
                id: member.and_then(|m| m.get("id")).and_then(id_string),
                properties: member.and_then(|m| m.get("properties"))
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
                geometry: converted.geometry.filter(|geometry| !is_null_geometry(geometry)),
            })
            .collect())
    }

    /// Every arc as an absolute line, in arc order.
    fn decode_arcs(&self) -> Result<Vec<LineString<f64>>, LoadError> {
        let count = self.inner.arcs.len();
        if count == 0 { return Ok(Vec::new()) }

        let lines = (0..count)
            .map(|i| json!({ "type": "LineString", "arcs": [i] }))
            .collect::<Vec<_>>();
        let mut objects = Map::new();
        objects.insert(ARC_OBJECT.to_string(), json!({ "type": "GeometryCollection", "geometries": lines }));
        let mut scratch = json!({
            "type": "Topology",
            "arcs": self.arcs.clone(),
            "objects": objects,
        });
        if let Some(transform) = &self.transform {
            scratch["transform"] = transform.clone();
        }

        let key = String::from(ARC_OBJECT);
        let converted = to_geojson(&parse(&scratch)?, &key)
            .map_err(|e| LoadError::TopoJson(e.to_string()))?;

        let arcs = features_from_value(serde_json::to_value(&converted)?)?.into_iter()
            .map(|feature| match feature.geometry {
                Some(Geometry::LineString(line)) => Ok(line),
                _ => Err(LoadError::TopoJson("arc did not decode to a line".into())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if arcs.len() != count {
            return Err(LoadError::TopoJson(format!("decoded {} of {count} arcs", arcs.len())))
        }
        Ok(arcs)
    }
}

fn parse(value: &Value) -> Result<::topojson::Topology, LoadError> {
    match value.to_string().parse::<TopoJson>() {
        Ok(TopoJson::Topology(topology)) => Ok(topology),
        Ok(_) => Err(LoadError::TopoJson("document is not a Topology".into())),
        Err(e) => Err(LoadError::TopoJson(e.to_string())),
    }
}

/// A geometry with a null, missing or unrecognised `type` becomes an empty collection,
/// keeping its id and properties.
fn normalize(geometry: &mut Value) {
    let Some(object) = geometry.as_object_mut() else { return };
    match object.get("type").and_then(Value::as_str) {
        Some("GeometryCollection") => {
            if let Some(Value::Array(members)) = object.get_mut("geometries") {
                members.iter_mut().for_each(normalize);
            }
        }
        Some(kind) if GEOMETRY_TYPES.contains(&kind) => {}
        _ => {
            object.remove("arcs");
            object.remove("coordinates");
            object.insert("type".into(), Value::from("GeometryCollection"));
            object.insert("geometries".into(), Value::Array(Vec::new()));
        }
    }
}

#[inline]
fn is_null_geometry(geometry: &Geometry<f64>) -> bool {
    matches!(geometry, Geometry::GeometryCollection(collection) if collection.0.is_empty())
}

#[inline]
fn arc_index(arc_ref: i64) -> usize {
    if arc_ref < 0 { !arc_ref as usize } else { arc_ref as usize }
}

/// Call `visit` with every arc reference and the geometry that holds it.
fn visit_arcs<'a, F>(geometry: &'a TopoGeometry, visit: &mut F) -> Result<(), LoadError>
where
    F: FnMut(i64, &'a TopoGeometry) -> Result<(), LoadError>,
{
    fn line<'a, I, F>(arcs: &[I], geometry: &'a TopoGeometry, visit: &mut F) -> Result<(), LoadError>
    where
        I: Copy + Into<i64>,
        F: FnMut(i64, &'a TopoGeometry) -> Result<(), LoadError>,
    {
        arcs.iter().try_for_each(|&arc_ref| visit(arc_ref.into(), geometry))
    }

    match &geometry.value {
        TopoValue::GeometryCollection(members) => {
            for member in members { visit_arcs(member, visit)? }
        }
        TopoValue::LineString(arcs) => line(arcs.as_slice(), geometry, visit)?,
        TopoValue::MultiLineString(lines) | TopoValue::Polygon(lines) => {
            for arcs in lines { line(arcs.as_slice(), geometry, visit)? }
        }
        TopoValue::MultiPolygon(polygons) => {
            for arcs in polygons.iter().flatten() { line(arcs.as_slice(), geometry, visit)? }
        }
        _ => {}
    }
    Ok(())
}

/// Whether `other` is `geometry` itself or nested inside it.
pub(crate) fn is_or_contains(geometry: &TopoGeometry, other: &TopoGeometry) -> bool {
    std::ptr::eq(geometry, other) || match &geometry.value {
        TopoValue::GeometryCollection(members) => members.iter().any(|m| is_or_contains(m, other)),
        _ => false,
    }
}

/// Which geometries reference each arc, for building boundary meshes.
pub(crate) struct MeshIndex<'a> {
    arcs: Vec<LineString<f64>>,
    geoms_by_arc: Vec<Vec<&'a TopoGeometry>>,
}

impl<'a> MeshIndex<'a> {
    pub(crate) fn new(topology: &Topology, object: &'a NamedGeometry) -> Result<Self, LoadError> {
        let arcs = topology.decode_arcs()?;
        let mut geoms_by_arc: Vec<Vec<&'a TopoGeometry>> = vec![Vec::new(); arcs.len()];

        visit_arcs(&object.geometry, &mut |arc_ref, geometry| {
            geoms_by_arc.get_mut(arc_index(arc_ref))
                .ok_or(LoadError::ArcOutOfRange(arc_ref))?
                .push(geometry);
            Ok(())
        })?;

        Ok(Self { arcs, geoms_by_arc })
    }

    /// Every referenced arc, once.
    pub(crate) fn mesh(&self) -> MultiLineString<f64> {
        self.select(|_, _| true)
    }

    /// Arcs accepted by `filter(a, b)`, where `a` and `b` are the first and last
    /// geometries referencing the arc (the same geometry for an exterior arc).
    pub(crate) fn select(&self, filter: impl Fn(&TopoGeometry, &TopoGeometry) -> bool) -> MultiLineString<f64> {
        MultiLineString(
            self.geoms_by_arc.iter()
                .zip(&self.arcs)
                .filter_map(|(geoms, arc)| match (geoms.first(), geoms.last()) {
                    (Some(a), Some(b)) if filter(a, b) => Some(arc.clone()),
                    _ => None,
                })
                .collect()
        )
    }
}

//! Dataset decoding, sources and output sinks.
//!
//! - `topojson` - TopoJSON topologies via the `topojson` crate: features and boundary meshes
//! - `geojson` - GeoJSON documents via the `geojson` crate
//! - `source` - where dataset bytes come from (file or URL)
//! - `output` - write-then-rename output files
//! - `svg` - SVG document and path writing

pub(crate) mod geojson;
pub(crate) mod output;
pub(crate) mod source;
pub(crate) mod svg;
pub(crate) mod topojson;

use geo::Geometry;
use serde_json::{Map, Value};
use thiserror::Error;

pub use output::{check_overwrite, is_stdout, open_for_write, PendingWrite};
pub use source::DatasetSource;

use self::topojson::Topology;

/// Failure to decode a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] ::geojson::Error),

    #[error("invalid TopoJSON: {0}")]
    TopoJson(String),

    #[error("topology has no object named {name:?} (available: {})", .available.join(", "))]
    MissingObject { name: String, available: Vec<String> },

    #[error("topology has {} objects, choose one of: {}", .available.len(), .available.join(", "))]
    AmbiguousObject { available: Vec<String> },

    #[error("arc reference {0} is out of range")]
    ArcOutOfRange(i64),

    #[error("position has fewer than two components")]
    ShortPosition,
}

/// A decoded feature, independent of the source format.
#[derive(Debug, Clone, Default)]
pub(crate) struct Feature {
    pub(crate) id: Option<String>,
    pub(crate) properties: Map<String, Value>,
    pub(crate) geometry: Option<Geometry<f64>>,
}

impl Feature {
    /// A property as a string; numbers are stringified.
    pub(crate) fn property_string(&self, key: &str) -> Option<String> {
        self.properties.get(key).and_then(id_string)
    }
}

/// Parsed dataset document.
pub(crate) enum Document {
    Topology(Topology),
    GeoJson(Vec<Feature>),
}

/// Decode bytes as TopoJSON when `"type": "Topology"`, GeoJSON otherwise.
pub(crate) fn parse_document(bytes: &[u8]) -> Result<Document, LoadError> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.get("type").and_then(Value::as_str) == Some("Topology") {
        Ok(Document::Topology(Topology::from_value(value)?))
    } else {
        Ok(Document::GeoJson(self::geojson::features_from_value(value)?))
    }
}

/// Identifier-like JSON value as a string.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

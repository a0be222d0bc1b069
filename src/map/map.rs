use anyhow::{Context, Result};
use geo::MultiLineString;

use crate::{io::DatasetSource, stops::StopFeature};
use super::{io::{read_regions, read_stops}, region::RegionGeometry};

/// Which TopoJSON objects to read; `None` picks the only object in the topology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub stops_object: Option<String>,
    pub regions_object: Option<String>,
}

/// Both datasets of a city, as loaded.
#[derive(Debug, Clone)]
pub struct CityData {
    stops: Vec<StopFeature>,
    regions: Vec<RegionGeometry>,
    mesh: MultiLineString<f64>,
}

impl CityData {
    /// Construct from already-decoded parts. `mesh` is the combined region boundary.
    pub fn new(stops: Vec<StopFeature>, regions: Vec<RegionGeometry>, mesh: MultiLineString<f64>) -> Self {
        Self { stops, regions, mesh }
    }

    /// Load both datasets concurrently; nothing proceeds until both have returned,
    /// and either failure fails the whole load.
    pub fn load(stops: &DatasetSource, regions: &DatasetSource, options: &LoadOptions) -> Result<Self> {
        let (stop_bytes, region_bytes) = rayon::join(|| stops.fetch(), || regions.fetch());
        let (stop_bytes, region_bytes) = (stop_bytes?, region_bytes?);

        Self::from_bytes(&stop_bytes, &region_bytes, options)
            .with_context(|| format!("[map::load] stops={stops} regions={regions}"))
    }

    /// Decode both datasets from in-memory bytes.
    pub fn from_bytes(stops: &[u8], regions: &[u8], options: &LoadOptions) -> Result<Self> {
        let (stops, regions) = rayon::join(
            || read_stops(stops, options.stops_object.as_deref())
                .context("[map::load] Failed to decode stops"),
            || read_regions(regions, options.regions_object.as_deref())
                .context("[map::load] Failed to decode regions"),
        );
        let (stops, (regions, mesh)) = (stops?, regions?);

        log::info!("[map::load] {} stops, {} regions, {} boundary lines", stops.len(), regions.len(), mesh.0.len());

        Ok(Self { stops, regions, mesh })
    }

    /// Every loaded stop, in input order.
    #[inline] pub fn stops(&self) -> &[StopFeature] { &self.stops }

    #[inline] pub fn regions(&self) -> &[RegionGeometry] { &self.regions }

    /// Combined boundary of all regions.
    #[inline] pub fn mesh(&self) -> &MultiLineString<f64> { &self.mesh }
}

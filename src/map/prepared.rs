use anyhow::{Context, Result};
use geo::{Coord, Polygon, Rect};
use serde::Serialize;

use crate::{
    config::RenderConfig,
    geom::{voronoi_cells, BoundingBox, Mercator},
    stops::{dedup_by_coords, filter_within, StopFeature},
};
use super::map::CityData;

/// Everything computed from a `CityData` for one render configuration.
#[derive(Debug, Clone)]
pub struct PreparedMap<'a> {
    city: &'a CityData,
    config: RenderConfig,
    bounds: BoundingBox,
    stop_extent: Option<BoundingBox>,
    in_bounds: Vec<StopFeature>,
    sites: Vec<StopFeature>,
    projection: Mercator,
    projected: Vec<Coord<f64>>,
    cells: Vec<Polygon<f64>>,
}

/// Serializable overview of a prepared map, for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub stops_loaded: usize,
    pub regions: Vec<String>,
    pub bounds: BoundingBox,
    pub stop_extent: Option<BoundingBox>,
    pub projection_center: [f64; 2],
    pub stops_in_bounds: usize,
    pub duplicates_dropped: usize,
    pub cells: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<StopFeature>>,
}

impl CityData {
    /// Run the pipeline: region bounds, in-bounds stops, distinct sites, projection,
    /// and one Voronoi cell per site.
    pub fn prepare(&self, config: &RenderConfig) -> Result<PreparedMap<'_>> {
        config.validate()?;

        let bounds = BoundingBox::of_mesh(self.mesh())
            .or_else(|_| BoundingBox::of_regions(self.regions()))
            .context("[map::prepare] Region data has no coordinates")?;

        let stop_extent = BoundingBox::from_coords(self.stops().iter().map(StopFeature::coord)).ok();

        let in_bounds = filter_within(self.stops(), &bounds);
        let sites = dedup_by_coords(in_bounds.clone());
        log::info!(
            "[map::prepare] {} of {} stops inside region bounds, {} distinct sites",
            in_bounds.len(), self.stops().len(), sites.len(),
        );

        // Center on all stops (unfiltered); fall back to the regions when there are none.
        let center = stop_extent.unwrap_or(bounds).center();
        let projection = Mercator::new(
            center,
            config.scale,
            Coord { x: f64::from(config.width) / 2.0, y: f64::from(config.height) / 2.0 },
        );

        let projected = sites.iter()
            .map(|site| projection.project(site.coord()))
            .collect::<Vec<_>>();

        let cells = voronoi_cells(&projected, clip_extent(config, &projected))
            .context("[map::prepare] Voronoi tessellation failed")?;
        log::debug!("[map::prepare] {} voronoi cells", cells.len());

        Ok(PreparedMap {
            city: self,
            config: *config,
            bounds,
            stop_extent,
            in_bounds,
            sites,
            projection,
            projected,
            cells,
        })
    }
}

/// The canvas, grown to cover every site, plus a margin so no cell is empty.
fn clip_extent(config: &RenderConfig, sites: &[Coord<f64>]) -> Rect<f64> {
    let canvas = BoundingBox {
        x_min: 0.0,
        y_min: 0.0,
        x_max: f64::from(config.width),
        y_max: f64::from(config.height),
    };
    let extent = sites.iter().fold(canvas, |bbox, &site| bbox.expanded_to(site));
    extent.padded(0.1 * extent.width().max(extent.height())).to_rect()
}

impl<'a> PreparedMap<'a> {
    #[inline] pub fn city(&self) -> &'a CityData { self.city }

    #[inline] pub fn config(&self) -> &RenderConfig { &self.config }

    /// Bounding box of the region mesh.
    #[inline] pub fn bounds(&self) -> &BoundingBox { &self.bounds }

    /// Extent of all loaded stops, if any were loaded.
    #[inline] pub fn stop_extent(&self) -> Option<&BoundingBox> { self.stop_extent.as_ref() }

    /// Stops inside the region bounds, duplicates included.
    #[inline] pub fn stops_in_bounds(&self) -> &[StopFeature] { &self.in_bounds }

    /// Distinct in-bounds stops, one per Voronoi cell.
    #[inline] pub fn sites(&self) -> &[StopFeature] { &self.sites }

    #[inline] pub fn projection(&self) -> &Mercator { &self.projection }

    /// Sites in drawing coordinates.
    #[inline] pub fn projected_sites(&self) -> &[Coord<f64>] { &self.projected }

    /// Voronoi cells in drawing coordinates, parallel to `sites`.
    #[inline] pub fn cells(&self) -> &[Polygon<f64>] { &self.cells }

    pub fn summary(&self, include_sites: bool) -> MapSummary {
        let center = self.projection.center();
        MapSummary {
            stops_loaded: self.city.stops().len(),
            regions: self.city.regions().iter().map(|r| r.id.clone()).collect(),
            bounds: self.bounds,
            stop_extent: self.stop_extent,
            projection_center: [center.x, center.y],
            stops_in_bounds: self.in_bounds.len(),
            duplicates_dropped: self.in_bounds.len() - self.sites.len(),
            cells: self.cells.len(),
            sites: include_sites.then(|| self.sites.clone()),
        }
    }
}

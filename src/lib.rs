#![doc = "Transit-stop Voronoi maps: load stops and regions, tessellate, render SVG"]
pub mod cli;
pub mod commands;

mod config;
mod geom;
mod io;
mod map;
mod stops;

#[doc(inline)]
pub use config::RenderConfig;

#[doc(inline)]
pub use geom::{voronoi_cells, BoundingBox, BoundsError, Mercator, VoronoiError};

#[doc(inline)]
pub use io::{check_overwrite, is_stdout, open_for_write, DatasetSource, LoadError, PendingWrite};

#[doc(inline)]
pub use map::{CityData, LoadOptions, MapSummary, PreparedMap, RegionGeometry};

#[doc(inline)]
pub use stops::{dedup_by_coords, filter_within, select_sites, StopFeature};

mod bbox;
mod proj;
mod voronoi;

pub use bbox::{BoundingBox, BoundsError};
pub use proj::Mercator;
pub use voronoi::{voronoi_cells, VoronoiError};

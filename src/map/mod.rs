//! City map data: loading, the prepared render pipeline, and SVG output.

mod io;
#[allow(clippy::module_inception)]
mod map;
mod prepared;
mod region;

pub use map::{CityData, LoadOptions};
pub use prepared::{MapSummary, PreparedMap};
pub use region::RegionGeometry;

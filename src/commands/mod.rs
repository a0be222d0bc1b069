pub mod inspect;
pub mod render;

use anyhow::Result;

use crate::{cli::DatasetArgs, CityData};

/// Fetch and decode both datasets named on the command line.
fn load(data: &DatasetArgs) -> Result<CityData> {
    log::info!("[load] stops={} regions={}", data.stops, data.regions);
    CityData::load(&data.stops, &data.regions, &data.load_options())
}

mod read;
mod svg;

pub(crate) use read::{read_regions, read_stops};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::{DatasetSource, LoadOptions, RenderConfig};

/// Transit-stop Voronoi map renderer
#[derive(Parser, Debug)]
#[command(name = "stopmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render stops, regions and Voronoi cells to an SVG file ("-" for stdout)
    Render(RenderArgs),

    /// Print a JSON summary of the prepared map
    Inspect(InspectArgs),
}

/// The two input datasets.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Stops dataset (TopoJSON or GeoJSON): file path or http(s) URL
    #[arg(value_hint = ValueHint::AnyPath)]
    pub stops: DatasetSource,

    /// Regions dataset (TopoJSON or GeoJSON): file path or http(s) URL
    #[arg(value_hint = ValueHint::AnyPath)]
    pub regions: DatasetSource,

    /// Topology object holding the stops (needed when there is more than one)
    #[arg(long)]
    pub stops_object: Option<String>,

    /// Topology object holding the regions (needed when there is more than one)
    #[arg(long)]
    pub regions_object: Option<String>,
}

impl DatasetArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            stops_object: self.stops_object.clone(),
            regions_object: self.regions_object.clone(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum Preset {
    /// 960x480, no zoom
    #[default]
    Static,
    /// 1200x800, pan/zoom enabled
    Zoomable,
}

impl Preset {
    pub fn config(self) -> RenderConfig {
        match self {
            Self::Static => RenderConfig::static_map(),
            Self::Zoomable => RenderConfig::zoomable(),
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub data: DatasetArgs,

    /// Output SVG file ("-" writes to stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Base render configuration
    #[arg(long, value_enum, default_value_t = Preset::Static)]
    pub preset: Preset,

    /// Render configuration JSON, replacing the preset
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height
    #[arg(long)]
    pub height: Option<u32>,

    /// Projection scale
    #[arg(long)]
    pub scale: Option<f64>,

    /// Enable or disable the zoom layer
    #[arg(long)]
    pub zoom: Option<bool>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub data: DatasetArgs,

    /// Base render configuration
    #[arg(long, value_enum, default_value_t = Preset::Static)]
    pub preset: Preset,

    /// Include every Voronoi site in the summary
    #[arg(long)]
    pub list_sites: bool,
}

use anyhow::Result;
use clap::Parser;

use stopmap::cli::{Cli, Commands};
use stopmap::commands::{inspect, render};

/// `-v` count -> default log level; `RUST_LOG` still wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}

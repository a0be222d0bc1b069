use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::{Cli, InspectArgs};

pub fn run(_cli: &Cli, args: &InspectArgs) -> Result<()> {
    let city = super::load(&args.data)?;
    let map = city.prepare(&args.preset.config())?;

    let summary = serde_json::to_string_pretty(&map.summary(args.list_sites))
        .context("[inspect] Failed to serialize summary")?;

    let mut out = io::stdout().lock();
    writeln!(out, "{summary}")?;
    Ok(())
}

use std::io::{self, BufWriter, Write};

use anyhow::Result;

use crate::cli::{Cli, RenderArgs};
use crate::{check_overwrite, is_stdout, open_for_write, RenderConfig};

/// Preset or config file, then explicit flags on top.
fn render_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => args.preset.config(),
    };
    if let Some(width) = args.width { config.width = width }
    if let Some(height) = args.height { config.height = height }
    if let Some(scale) = args.scale { config.scale = scale }
    if let Some(zoom) = args.zoom { config.enable_zoom = zoom }
    config.validate()?;
    Ok(config)
}

pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let config = render_config(args)?;
    let to_stdout = is_stdout(&args.output);

    // Refuse an existing output before any network or geometry work; the
    // output directory is only created once there is something to write.
    if !to_stdout {
        check_overwrite(&args.output, args.force)?;
    }

    let city = super::load(&args.data)?;
    let map = city.prepare(&config)?;

    if to_stdout {
        let mut out = BufWriter::new(io::stdout().lock());
        map.write_svg(&mut out)?;
        out.flush()?;
    } else {
        let mut sink = open_for_write(&args.output, args.force)?;
        map.write_svg(&mut sink)?;
        sink.finalize()?;
    }

    log::info!("[render] {} cells -> {}", map.cells().len(), args.output.display());
    Ok(())
}

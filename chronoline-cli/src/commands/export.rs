//! Export command implementation - render the timeline and write a
//! self-contained SVG file

use std::fs;
use std::path::PathBuf;

use chronoline_core::{Direction, EventLog, FileStore};
use chronoline_render::{base_theme, export_svg, TimelineChart, TimelineOptions};

use crate::config::Config;
use crate::error::{CliError, CliResult};

pub fn execute(
    config: &Config,
    out: Option<PathBuf>,
    direction: Option<Direction>,
    width: Option<f32>,
    height: Option<f32>,
) -> CliResult<()> {
    let output = out.unwrap_or_else(|| config.export.output.clone());
    log::info!("Exporting timeline to {}", output.display());

    let store = FileStore::open(&config.storage.data_dir)?;
    let events = EventLog::load(store);
    log::info!("Loaded {} event(s)", events.len());

    let options = TimelineOptions {
        direction: direction.unwrap_or(config.chart.direction),
        initial_width: width.unwrap_or(config.chart.initial_width),
        initial_height: height.unwrap_or(config.chart.initial_height),
        ..TimelineOptions::default()
    };
    let mut chart = TimelineChart::new(options);
    let svg = chart.render(events.events());
    let document = export_svg(&svg, &[base_theme()]);

    fs::write(&output, &document)
        .map_err(|e| CliError::export(format!("failed to write {}: {e}", output.display())))?;

    let dims = chart.dimensions();
    log::info!("Wrote {} ({} x {})", output.display(), dims.width, dims.height);
    Ok(())
}

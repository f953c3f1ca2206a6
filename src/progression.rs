use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::prelude::*;

use crate::chart::{PlotConfig, ProgressionChart, build_chart, draw_chart};
use crate::normalize::normalize_table;
use crate::series::build_series;
use crate::spreadsheet::load_standings_csv;
use crate::standings_fetch::fetch_standings_table;
use crate::table::RawStandingsTable;

pub use crate::standings_fetch::Group;

/// Progression chart for a season scraped from the web.
pub fn standings_progression(year: i32, group: Group, config: &PlotConfig) -> Result<ProgressionChart> {
    let table = fetch_standings_table(year, group)?;
    progression_from_table(&table, config)
}

/// Progression chart for a saved spreadsheet export.
pub fn progression_from_csv(path: &Path, config: &PlotConfig) -> Result<ProgressionChart> {
    let table = load_standings_csv(path)?;
    progression_from_table(&table, config)
}

pub fn progression_from_table(
    table: &RawStandingsTable,
    config: &PlotConfig,
) -> Result<ProgressionChart> {
    let chart = build_chart(&build_series(&normalize_table(table)), config)?;
    Ok(chart)
}

/// Persist a chart; the backend is picked from the destination extension
/// (`.png` or `.svg`).
pub fn save_chart(chart: &ProgressionChart, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let size = chart.config.size;

    match ext.as_str() {
        "png" => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(chart, &root)?;
            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
        "svg" => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(chart, &root)?;
            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
        other => bail!("unsupported chart format {other:?} (use png or svg)"),
    }

    log::info!("wrote {}", path.display());
    Ok(())
}

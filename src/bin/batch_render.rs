use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use standings_progression::chart::PlotConfig;
use standings_progression::progression::{progression_from_csv, save_chart};

/// Render every saved standings export in a directory to a PNG. A season
/// that fails to parse is reported and skipped; the rest of the batch still
/// renders.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "standings_data".to_string()));
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "plots".to_string()));

    let mut files: Vec<PathBuf> = fs::read_dir(&data_dir)
        .with_context(|| format!("reading {}", data_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        log::warn!("no csv files under {}", data_dir.display());
        return Ok(());
    }

    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let config = PlotConfig::default();
    let mut rendered = 0usize;
    for file in &files {
        match render_one(file, &out_dir, &config) {
            Ok(out) => {
                rendered += 1;
                println!("{}", out.display());
            }
            Err(err) => log::warn!("skipping {}: {err:#}", file.display()),
        }
    }

    log::info!("rendered {rendered}/{} seasons", files.len());
    Ok(())
}

fn render_one(file: &Path, out_dir: &Path, config: &PlotConfig) -> Result<PathBuf> {
    let chart = progression_from_csv(file, config)?;
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("standings");
    let out = out_dir.join(format!("{stem}.png"));
    save_chart(&chart, &out)?;
    Ok(out)
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use standings_progression::chart::PlotConfig;
use standings_progression::export::export_normalized_rows;
use standings_progression::normalize::normalize_table;
use standings_progression::progression::{Group, progression_from_table, save_chart};
use standings_progression::spreadsheet::load_standings_csv;
use standings_progression::standings_fetch::fetch_standings_table;

const USAGE: &str = "\
Usage:
  standings_progression web <season-end-year> <group> [options]
  standings_progression file <standings.csv> [options]

Groups: east, west, atlantic, central, southeast, northwest, pacific, southwest

Options:
  -o, --out <path>       chart destination, .png or .svg (default: standings.png)
      --export <path>    also write the normalized rows to an .xlsx workbook
      --dash-rank <n>    solid lines for the top n teams, dotted below (default 8)
      --no-dash          draw every line solid
      --max-rank <n>     drop teams ranked below n entirely";

struct Args {
    mode: Mode,
    out: PathBuf,
    export: Option<PathBuf>,
    config: PlotConfig,
}

enum Mode {
    Web { year: i32, group: Group },
    File { path: PathBuf },
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args().context(USAGE)?;

    // Both modes load the raw table first so the optional xlsx export shares
    // one fetch with the chart.
    let table = match &args.mode {
        Mode::Web { year, group } => fetch_standings_table(*year, *group)?,
        Mode::File { path } => load_standings_csv(path)?,
    };

    if let Some(export_path) = &args.export {
        export_normalized_rows(export_path, &normalize_table(&table))?;
        log::info!("wrote {}", export_path.display());
    }

    let chart = progression_from_table(&table, &args.config)?;
    save_chart(&chart, &args.out)?;
    println!("{}", args.out.display());
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut argv = std::env::args().skip(1);
    let Some(mode_word) = argv.next() else {
        bail!("missing mode");
    };
    let mut rest: Vec<String> = argv.collect();

    let mode = match mode_word.as_str() {
        "web" => {
            if rest.len() < 2 {
                bail!("web mode needs <season-end-year> and <group>");
            }
            let year: i32 = rest
                .remove(0)
                .parse()
                .context("season-end-year must be a number")?;
            let group_word = rest.remove(0);
            let Some(group) = Group::parse(&group_word) else {
                bail!("unknown group {group_word:?}");
            };
            Mode::Web { year, group }
        }
        "file" => {
            if rest.is_empty() {
                bail!("file mode needs a csv path");
            }
            Mode::File {
                path: PathBuf::from(rest.remove(0)),
            }
        }
        "-h" | "--help" | "help" => bail!("help requested"),
        other => bail!("unknown mode {other:?}"),
    };

    let mut out = PathBuf::from("standings.png");
    let mut export = None;
    let mut config = PlotConfig::default();

    let mut it = rest.into_iter();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "-o" | "--out" => {
                out = PathBuf::from(it.next().context("--out needs a path")?);
            }
            "--export" => {
                export = Some(PathBuf::from(it.next().context("--export needs a path")?));
            }
            "--dash-rank" => {
                let n = it.next().context("--dash-rank needs a number")?;
                config.dash_rank = Some(n.parse().context("--dash-rank must be a number")?);
            }
            "--no-dash" => config.dash_rank = None,
            "--max-rank" => {
                let n = it.next().context("--max-rank needs a number")?;
                config.max_rank = Some(n.parse().context("--max-rank must be a number")?);
            }
            other => bail!("unknown option {other:?}"),
        }
    }

    Ok(Args {
        mode,
        out,
        export,
        config,
    })
}

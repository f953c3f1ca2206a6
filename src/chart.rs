use anyhow::Result;
use chrono::{Months, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};

use crate::error::StandingsError;
use crate::series::SeriesTable;
use crate::team_colours::{TeamColours, team_colours};

/// Rendering knobs. An explicit value passed to every build, never ambient
/// process state, so two renders with different settings cannot interfere.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Figure size in pixels.
    pub size: (u32, u32),
    pub line_width: u32,
    /// Marker radius in pixels.
    pub marker_size: u32,
    pub marker_edge_width: u32,
    pub legend_columns: usize,
    /// Teams at rank positions within this cutoff draw solid, the rest
    /// dotted. `None` draws everything solid.
    pub dash_rank: Option<u32>,
    /// Teams at rank positions beyond this cutoff are not drawn at all.
    /// Independent from `dash_rank`.
    pub max_rank: Option<u32>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            size: (1920, 1080),
            line_width: 2,
            marker_size: 3,
            marker_edge_width: 1,
            legend_columns: 2,
            dash_rank: Some(8),
            max_rank: None,
        }
    }
}

/// One styled line of the progression chart.
#[derive(Debug, Clone)]
pub struct ChartLine {
    pub team: String,
    pub colours: TeamColours,
    pub solid: bool,
    /// Finite `(date, win_fraction)` points only; NaN snapshots and absent
    /// dates are gaps.
    pub points: Vec<(NaiveDate, f64)>,
}

/// A fully resolved progression chart, independent of any backend. Styling
/// is fixed at build time so the same chart draws identically to a bitmap,
/// an SVG or a test buffer.
#[derive(Debug, Clone)]
pub struct ProgressionChart {
    pub x_range: (NaiveDate, NaiveDate),
    pub x_ticks: Vec<NaiveDate>,
    pub lines: Vec<ChartLine>,
    pub config: PlotConfig,
}

/// Monthly offsets of the start date, through the end of the axis. These are
/// offsets from the first snapshot, not calendar month starts.
pub fn month_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut ticks = Vec::new();
    let mut tick = start;
    while tick <= end {
        ticks.push(tick);
        match tick.checked_add_months(Months::new(1)) {
            Some(next) => tick = next,
            None => break,
        }
    }
    ticks
}

/// Resolve a series table into a drawable chart.
///
/// Visual encoding depends only on each team's position in the rank-sorted
/// column order: colour triple from the static catalog, solid within the
/// playoff cutoff, dotted beyond it. A team code missing from the catalog is
/// a hard error; silently recolouring a line would misattribute a season.
pub fn build_chart(
    series: &SeriesTable,
    config: &PlotConfig,
) -> Result<ProgressionChart, StandingsError> {
    let (Some(&start), Some(&end)) = (series.dates.first(), series.dates.last()) else {
        return Err(StandingsError::EmptyTable);
    };
    if series.columns.is_empty() {
        return Err(StandingsError::EmptyTable);
    }

    // A one-snapshot table still needs a non-degenerate axis.
    let end = if end == start {
        end.succ_opt().unwrap_or(end)
    } else {
        end
    };

    let mut lines = Vec::new();
    for (position, column) in series.columns.iter().enumerate() {
        if let Some(max) = config.max_rank {
            if position as u32 >= max {
                break;
            }
        }
        let colours = team_colours(&column.team).ok_or_else(|| StandingsError::UnknownTeam {
            team: column.team.clone(),
        })?;
        let solid = config.dash_rank.is_none_or(|cut| (position as u32) < cut);
        let points = series
            .team_points(column)
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .collect();
        lines.push(ChartLine {
            team: column.team.clone(),
            colours,
            solid,
            points,
        });
    }

    Ok(ProgressionChart {
        x_range: (start, end),
        x_ticks: month_ticks(start, end),
        lines,
        config: config.clone(),
    })
}

/// Draw a chart onto any plotters backend. A fresh drawing is produced per
/// call; nothing is cached between renders.
pub fn draw_chart<DB>(chart: &ProgressionChart, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (start, end) = chart.x_range;
    let mut ctx = ChartBuilder::on(root)
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(start..end, 0.0f64..1.0f64)?;

    ctx.configure_mesh()
        .x_labels(chart.x_ticks.len().max(2))
        .y_labels(11)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .y_label_formatter(&|v: &f64| format!("{v:.1}"))
        .x_desc("Date (YYYY-MM-DD)")
        .y_desc("Win fraction (wins / games played to-date)")
        .label_style(("sans-serif", 16))
        .draw()?;

    for line in &chart.lines {
        let stroke = ShapeStyle::from(&line.colours.line).stroke_width(chart.config.line_width);
        if line.solid {
            ctx.draw_series(LineSeries::new(line.points.iter().copied(), stroke))?;
        } else {
            // Short dash reads as the dotted style for non-playoff teams.
            ctx.draw_series(DashedLineSeries::new(
                line.points.iter().copied(),
                2,
                4,
                stroke,
            ))?;
        }

        let radius = chart.config.marker_size as i32;
        ctx.draw_series(line.points.iter().map(|&(d, v)| {
            Circle::new((d, v), radius, ShapeStyle::from(&line.colours.marker).filled())
        }))?;
        ctx.draw_series(line.points.iter().map(|&(d, v)| {
            Circle::new(
                (d, v),
                radius,
                ShapeStyle::from(&line.colours.edge).stroke_width(chart.config.marker_edge_width),
            )
        }))?;
    }

    draw_legend(chart, root)?;
    Ok(())
}

// plotters' built-in series labels are single-column; the legend grid is
// drawn from primitives instead, teams in rank order.
fn draw_legend<DB>(chart: &ProgressionChart, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    const ENTRY_WIDTH: i32 = 96;
    const ENTRY_HEIGHT: i32 = 22;
    const SAMPLE_WIDTH: i32 = 26;

    let columns = chart.config.legend_columns.max(1);
    let x0 = 96;
    let y0 = 36;

    for (i, line) in chart.lines.iter().enumerate() {
        let x = x0 + (i % columns) as i32 * ENTRY_WIDTH;
        let y = y0 + (i / columns) as i32 * ENTRY_HEIGHT;
        let stroke = ShapeStyle::from(&line.colours.line).stroke_width(chart.config.line_width);
        if line.solid {
            root.draw(&PathElement::new(vec![(x, y), (x + SAMPLE_WIDTH, y)], stroke))?;
        } else {
            for seg in (0..SAMPLE_WIDTH).step_by(6) {
                let seg_end = (seg + 3).min(SAMPLE_WIDTH);
                root.draw(&PathElement::new(
                    vec![(x + seg, y), (x + seg_end, y)],
                    stroke,
                ))?;
            }
        }
        root.draw(&Text::new(
            line.team.clone(),
            (x + SAMPLE_WIDTH + 6, y - 8),
            ("sans-serif", 15).into_font(),
        ))?;
    }
    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::normalize::NormalizedRow;

const HEADER: [&str; 7] = ["Date", "Rank", "Team", "W", "L", "GP", "PCT"];

/// Write the normalized long-form table to a workbook, one row per
/// deduplicated snapshot. Undefined win fractions (no games played) leave
/// the PCT cell blank.
pub fn export_normalized_rows(path: &Path, rows: &[NormalizedRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Standings")?;
    write_sheet(sheet, rows)?;

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_sheet(sheet: &mut Worksheet, rows: &[NormalizedRow]) -> Result<()> {
    for (col, title) in HEADER.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .with_context(|| format!("write header {title}"))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row.date.format("%Y-%m-%d").to_string())?;
        sheet.write_number(r, 1, f64::from(row.rank))?;
        sheet.write_string(r, 2, &row.team)?;
        sheet.write_number(r, 3, f64::from(row.wins))?;
        sheet.write_number(r, 4, f64::from(row.losses))?;
        sheet.write_number(r, 5, f64::from(row.games_played))?;
        if row.win_fraction.is_finite() {
            sheet.write_number(r, 6, row.win_fraction)?;
        }
    }
    Ok(())
}

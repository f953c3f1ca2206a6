use anyhow::{Context, Result, anyhow};

use crate::http_cache::fetch_page_cached;
use crate::http_client::http_client;
use crate::table::{DateRow, RawStandingsTable, is_month_label, parse_standings_date};

const BASE_URL: &str = "https://www.basketball-reference.com";

/// Team grouping of a standings-by-date page. Conferences rank 15 teams,
/// divisions 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    East,
    West,
    Atlantic,
    Central,
    Southeast,
    Northwest,
    Pacific,
    Southwest,
}

impl Group {
    pub fn url_component(self) -> &'static str {
        match self {
            Group::East => "eastern_conference",
            Group::West => "western_conference",
            Group::Atlantic => "atlantic_division",
            Group::Central => "central_division",
            Group::Southeast => "southeast_division",
            Group::Northwest => "northwest_division",
            Group::Pacific => "pacific_division",
            Group::Southwest => "southwest_division",
        }
    }

    pub fn team_count(self) -> u32 {
        match self {
            Group::East | Group::West => 15,
            _ => 8,
        }
    }

    pub fn parse(text: &str) -> Option<Group> {
        match text.to_ascii_lowercase().as_str() {
            "east" | "eastern" => Some(Group::East),
            "west" | "western" => Some(Group::West),
            "atlantic" => Some(Group::Atlantic),
            "central" => Some(Group::Central),
            "southeast" => Some(Group::Southeast),
            "northwest" => Some(Group::Northwest),
            "pacific" => Some(Group::Pacific),
            "southwest" => Some(Group::Southwest),
            _ => None,
        }
    }
}

/// Standings-by-date page for the season ending in `year`.
pub fn standings_url(year: i32, group: Group) -> String {
    format!(
        "{BASE_URL}/leagues/NBA_{year}_standings_by_date_{}.html",
        group.url_component()
    )
}

pub fn fetch_standings_table(year: i32, group: Group) -> Result<RawStandingsTable> {
    let client = http_client()?;
    let url = standings_url(year, group);
    let body = fetch_page_cached(client, &url).with_context(|| format!("fetching {url}"))?;
    let table = parse_standings_html(&body).with_context(|| format!("parsing {url}"))?;
    log::info!(
        "loaded {} standings dates for {year} {}",
        table.rows.len(),
        group.url_component()
    );
    Ok(table)
}

/// Extract the standings-by-date table from a scraped page.
///
/// The page carries one table: a leading date cell per row, then one cell
/// per rank slot. Month-name separator rows repeat between months and are
/// dropped; any other row whose label is not a date means the page layout
/// changed, which is fatal rather than silently skippable.
pub fn parse_standings_html(html: &str) -> Result<RawStandingsTable> {
    let table_html = first_tag_block(html, "table")
        .ok_or_else(|| anyhow!("no <table> found in standings page"))?;

    // Column header rows live in <thead>; data and month separators in the
    // body. Pages without an explicit <tbody> are walked whole, minus any
    // header block.
    let body_html = match first_tag_block(table_html, "tbody") {
        Some(body) => body,
        None => {
            let lower = table_html.to_ascii_lowercase();
            match tag_block_at(&lower, "thead", 0) {
                Some((_, _, after)) => &table_html[after..],
                None => table_html,
            }
        }
    };

    let mut rows = Vec::new();
    let lower = body_html.to_ascii_lowercase();
    let mut pos = 0usize;
    while let Some((inner_start, inner_end, after)) = tag_block_at(&lower, "tr", pos) {
        let row_html = &body_html[inner_start..inner_end];
        pos = after;

        let cells = row_cells(row_html);
        let Some((label, slots)) = cells.split_first() else {
            continue;
        };
        if label.is_empty() || is_month_label(label) {
            continue;
        }

        let date = parse_standings_date(label)?;
        rows.push(DateRow {
            date,
            cells: slots
                .iter()
                .map(|text| (!text.is_empty()).then(|| text.clone()))
                .collect(),
        });
    }

    Ok(RawStandingsTable { rows })
}

/// Inner text of each `<th>`/`<td>` cell of one row, in document order.
fn row_cells(row_html: &str) -> Vec<String> {
    let lower = row_html.to_ascii_lowercase();
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let th = tag_block_at(&lower, "th", pos);
        let td = tag_block_at(&lower, "td", pos);
        let block = match (th, td) {
            (Some(a), Some(b)) => {
                if a.0 < b.0 {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        cells.push(clean_cell(&row_html[block.0..block.1]));
        pos = block.2;
    }
    cells
}

/// Find the next `<tag ...>inner</tag>` in `lower` (a lowercased copy of the
/// document, so byte offsets line up) starting at `from`. Returns the inner
/// span and the offset just past the closing tag.
fn tag_block_at(lower: &str, tag: &str, from: usize) -> Option<(usize, usize, usize)> {
    let open_pat = format!("<{tag}");
    let close_pat = format!("</{tag}");

    let mut search = from;
    let open_at = loop {
        let candidate = lower[search..].find(&open_pat)? + search;
        // Reject prefix matches like <thead> when looking for <th>.
        match lower.as_bytes().get(candidate + open_pat.len()) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {
                break candidate;
            }
            _ => search = candidate + open_pat.len(),
        }
    };

    let inner_start = lower[open_at..].find('>')? + open_at + 1;
    let close_at = lower[inner_start..].find(&close_pat)? + inner_start;
    let after = lower[close_at..]
        .find('>')
        .map(|i| close_at + i + 1)
        .unwrap_or(lower.len());
    Some((inner_start, close_at, after))
}

fn first_tag_block<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let (start, end, _) = tag_block_at(&lower, tag, 0)?;
    Some(&html[start..end])
}

/// Strip markup and entities down to normalized cell text.
fn clean_cell(cell_html: &str) -> String {
    let mut text = String::with_capacity(cell_html.len());
    let mut in_tag = false;
    for ch in cell_html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_matches_site_layout() {
        assert_eq!(
            standings_url(2019, Group::East),
            "https://www.basketball-reference.com/leagues/NBA_2019_standings_by_date_eastern_conference.html"
        );
        assert_eq!(
            standings_url(2017, Group::Pacific),
            "https://www.basketball-reference.com/leagues/NBA_2017_standings_by_date_pacific_division.html"
        );
    }

    #[test]
    fn group_parse_accepts_conferences_and_divisions() {
        assert_eq!(Group::parse("east"), Some(Group::East));
        assert_eq!(Group::parse("Western"), Some(Group::West));
        assert_eq!(Group::parse("atlantic"), Some(Group::Atlantic));
        assert_eq!(Group::parse("midwest"), None);
    }

    #[test]
    fn team_counts() {
        assert_eq!(Group::East.team_count(), 15);
        assert_eq!(Group::Central.team_count(), 8);
    }

    #[test]
    fn tag_block_skips_prefix_tags() {
        let html = "<thead><tr><th>x</th></tr></thead>";
        let lower = html.to_ascii_lowercase();
        let (start, end, _) = tag_block_at(&lower, "th", 0).unwrap();
        assert_eq!(&html[start..end], "x");
    }

    #[test]
    fn table_without_tbody_skips_header_block() {
        let html = "<table><thead><tr><th>Date</th><th>1st</th></tr></thead>\
                    <tr><th>Oct 16, 2018</th><td>BOS (1-0)</td></tr></table>";
        let table = parse_standings_html(html).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0].as_deref(), Some("BOS (1-0)"));
    }

    #[test]
    fn cleans_links_and_entities() {
        assert_eq!(
            clean_cell(r#"<a href="/teams/TOR/">TOR</a>&nbsp;(1-0)"#),
            "TOR (1-0)"
        );
    }
}

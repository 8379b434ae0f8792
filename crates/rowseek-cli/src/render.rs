//! Text and JSON output of a table's visible rows.

use console::style;
use rowseek::{parse_number, Row, Table};
use rowseek_remote::{Cell, Snapshot, SnapshotRow};
use unicode_width::UnicodeWidthStr;

/// Default number of visible rows printed.
pub const PAGE_LIMIT: usize = 200;

/// Formats a cell for display: numbers get six decimals, anything else is
/// shown as is.
pub fn format_cell(cell: &str) -> String {
    let n = parse_number(cell);
    if cell.trim().is_empty() || !n.is_finite() {
        cell.to_string()
    } else {
        format!("{:.6}", n)
    }
}

fn headers(table: &Table) -> Vec<String> {
    let width = table
        .rows()
        .iter()
        .map(|row| row.cells().len())
        .max()
        .unwrap_or(0)
        .max(table.names().len());

    let mut headers = vec!["id".to_string()];
    headers.extend((1..=width).map(|column| {
        table
            .names()
            .get(column - 1)
            .cloned()
            .unwrap_or_else(|| format!("${}", column))
    }));
    headers
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

/// Renders up to `limit` visible rows as an aligned table.
///
/// The header row is bold when the terminal supports it. A footer reports
/// how many rows were shown.
pub fn render_text(table: &Table, limit: usize) -> String {
    let headers = headers(table);
    let visible: Vec<&Row> = table.visible().collect();
    let shown = &visible[..visible.len().min(limit)];

    let lines: Vec<Vec<String>> = shown
        .iter()
        .map(|row| {
            let mut line = vec![row.label().to_string()];
            line.extend(row.cells().iter().map(|cell| format_cell(cell)));
            line.resize(headers.len(), String::new());
            line
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w, false))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&style(header.trim_end()).bold().to_string());
    out.push('\n');

    for line in &lines {
        let text = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| pad(cell, *w, i > 0))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(text.trim_end());
        out.push('\n');
    }

    let footer = if shown.len() < visible.len() {
        format!(
            "showing {} of {} matching rows ({} total)",
            shown.len(),
            visible.len(),
            table.len()
        )
    } else {
        format!("{} of {} rows", visible.len(), table.len())
    };
    out.push_str(&style(footer).dim().to_string());
    out.push('\n');
    out
}

/// Renders up to `limit` visible rows as a JSON snapshot.
///
/// Numeric cells become JSON numbers; other cells stay strings.
pub fn render_json(table: &Table, limit: usize) -> serde_json::Result<String> {
    let rows = table
        .visible()
        .take(limit)
        .map(|row| {
            let vals = row
                .cells()
                .iter()
                .map(|cell| {
                    let n = parse_number(cell);
                    if cell.trim().is_empty() || !n.is_finite() {
                        Cell::Text(cell.clone())
                    } else {
                        Cell::Number(n)
                    }
                })
                .collect();
            SnapshotRow::new(row.label(), vals)
        })
        .collect();
    let snapshot = Snapshot {
        rows,
        names: table.names().to_vec(),
        query: String::new(),
    };
    serde_json::to_string_pretty(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_records(vec![
            ("a", vec!["1.5", "x"]),
            ("bb", vec!["-20", ""]),
            ("c", vec!["3", "0.25"]),
        ])
        .with_names(["dde", "rmsd"])
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_cell("1.5"), "1.500000");
        assert_eq!(format_cell("-20"), "-20.000000");
        assert_eq!(format_cell("n/a"), "n/a");
        assert_eq!(format_cell(""), "");
        assert_eq!(format_cell("NaN"), "NaN");
    }

    #[test]
    fn text_table_is_aligned() {
        console::set_colors_enabled(false);
        let out = render_text(&table(), PAGE_LIMIT);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id  dde         rmsd");
        assert_eq!(lines[1], "a     1.500000         x");
        assert_eq!(lines[2], "bb  -20.000000");
        assert_eq!(lines[3], "c     3.000000  0.250000");
        assert_eq!(lines[4], "3 of 3 rows");
    }

    #[test]
    fn text_respects_limit_and_visibility() {
        console::set_colors_enabled(false);
        let mut table = table();
        table.apply_query("$1 > 0").unwrap();
        let out = render_text(&table, 1);
        assert!(out.contains("a "));
        assert!(!out.contains("c "));
        assert!(out.contains("showing 1 of 2 matching rows (3 total)"));
    }

    #[test]
    fn unnamed_columns_use_dollar_headers() {
        console::set_colors_enabled(false);
        let table = Table::from_records(vec![("r", vec!["1", "2"])]);
        let out = render_text(&table, PAGE_LIMIT);
        assert!(out.starts_with("id  $1        $2"));
    }

    #[test]
    fn json_output_shape() {
        let json = render_json(&table(), 2).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["names"], serde_json::json!(["dde", "rmsd"]));
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][0]["id"], "a");
        assert_eq!(value["rows"][0]["vals"], serde_json::json!([1.5, "x"]));
        assert_eq!(value["rows"][1]["vals"], serde_json::json!([-20.0, ""]));
    }
}

use serde_json::Value;

use super::format::{
    self, Column, count_field, decimal, decimal_field, key_value_rows, text_field,
};

const BAR_WIDTH: usize = 40;

pub fn render_histogram(chart: &Value) -> Vec<String> {
    let bounds = chart.get("bounds").unwrap_or(&Value::Null);
    let mut lines = key_value_rows(
        &[
            (
                "Outlier bounds:",
                format!(
                    "{} to {}",
                    decimal_field(bounds, "lower", 2),
                    decimal_field(bounds, "upper", 2)
                ),
            ),
            ("Values plotted:", count_field(chart, "included")),
            ("Values excluded:", count_field(chart, "excluded")),
        ],
        2,
    );

    let bins = chart
        .get("bins")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let max_count = bins
        .iter()
        .filter_map(|bin| bin.get("count").and_then(Value::as_u64))
        .max()
        .unwrap_or(0);

    let edges = bins
        .iter()
        .map(|bin| {
            (
                decimal_field(bin, "start", 2),
                decimal_field(bin, "end", 2),
            )
        })
        .collect::<Vec<(String, String)>>();
    let edge_width = edges
        .iter()
        .map(|(start, end)| start.len().max(end.len()))
        .max()
        .unwrap_or(0);

    for (bin, (start, end)) in bins.iter().zip(edges) {
        let count = bin.get("count").and_then(Value::as_u64).unwrap_or(0);
        let line = format!(
            "    {start:>edge_width$} - {end:>edge_width$}  {:<BAR_WIDTH$}  {count}",
            bar(count, max_count)
        );
        lines.push(line);
    }

    lines
}

pub fn render_scatter(chart: &Value) -> Vec<String> {
    let x_label = text_field(chart, "x_label");
    let y_label = text_field(chart, "y_label");
    let x_axis = match chart.get("x_range").and_then(Value::as_array) {
        Some(range) if range.len() == 2 => format!(
            "{x_label} ({} to {})",
            decimal(&range[0], 0),
            decimal(&range[1], 0)
        ),
        _ => x_label.clone(),
    };

    let mut entries = vec![("X axis:", x_axis), ("Y axis:", y_label.clone())];
    let size_label = chart.get("size_label").and_then(Value::as_str);
    if let Some(size_label) = size_label {
        entries.push(("Point size:", size_label.to_string()));
    }
    let mut lines = key_value_rows(&entries, 2);

    let points = chart
        .get("points")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if points.is_empty() {
        lines.push("  No points to plot.".to_string());
        return lines;
    }

    let mut columns = vec![
        Column::left("Point"),
        Column::right(x_label.as_str()),
        Column::right(y_label.as_str()),
    ];
    if let Some(size_label) = size_label {
        columns.push(Column::right(size_label));
    }
    let rows = points
        .iter()
        .map(|point| {
            let mut row = vec![
                text_field(point, "label"),
                decimal_field(point, "x", 0),
                decimal_field(point, "y", 0),
            ];
            if size_label.is_some() {
                row.push(decimal_field(point, "size", 0));
            }
            row
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Point",
    ));
    lines
}

fn bar(count: u64, max_count: u64) -> String {
    if max_count == 0 || count == 0 {
        return String::new();
    }
    let scaled = (count as usize * BAR_WIDTH).div_ceil(max_count as usize);
    "#".repeat(scaled.clamp(1, BAR_WIDTH))
}

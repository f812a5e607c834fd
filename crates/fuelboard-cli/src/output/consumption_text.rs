use serde_json::Value;

use super::format::{self, Column, decimal_field, text_field};
use super::section_text::section_cell;

pub fn render_consumption(data: &Value) -> Vec<String> {
    let mut lines = vec!["By Long Description".to_string()];
    lines.extend(consumption_table(data.get("by_category"), "Category"));
    lines.push(String::new());
    lines.push("By Plate #".to_string());
    lines.extend(consumption_table(data.get("by_plate"), "Plate"));
    lines
}

fn consumption_table(table: Option<&Value>, block_label: &str) -> Vec<String> {
    let Some(table) = table else {
        return vec!["  No transactions.".to_string()];
    };
    let rows = table
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if rows.is_empty() {
        return vec!["  No transactions.".to_string()];
    }

    let headers = table
        .get("columns")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    let header = |index: usize, fallback: &'static str| -> String {
        headers
            .get(index)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };
    let names = [
        header(0, "Group"),
        header(1, "Total Liters Qty"),
        header(2, "Total ODO"),
        header(3, "Average Consumption"),
    ];
    let columns = [
        Column::left(&names[0]),
        Column::right(&names[1]),
        Column::right(&names[2]),
        Column::right(&names[3]),
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_field(row, "group"),
                decimal_field(row, "total_liters", 0),
                decimal_field(row, "total_odometer", 0),
                section_cell(row.get("average_consumption").unwrap_or(&Value::Null), 2),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), block_label)
}

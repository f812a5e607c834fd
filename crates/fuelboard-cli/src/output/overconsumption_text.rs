use serde_json::Value;

use super::chart_text::render_scatter;
use super::format::{self, Column, count_field, decimal_field, key_value_rows, text_field};
use super::section_text::section_lines;

pub fn render_overconsumption(data: &Value) -> Vec<String> {
    let totals = data.get("totals").unwrap_or(&Value::Null);
    let mut lines = key_value_rows(
        &[
            ("Total number of Tnxs:", count_field(totals, "total")),
            (
                "Count of Tnxs exceeding Limits:",
                count_field(totals, "overconsuming"),
            ),
        ],
        2,
    );
    lines.extend(section_lines(
        data.get("percentages").unwrap_or(&Value::Null),
        |percentages| {
            key_value_rows(
                &[(
                    "Percentage of Tnx within Limits:",
                    text_field(percentages, "within_limits_display"),
                )],
                2,
            )
        },
    ));

    lines.push(String::new());
    lines.push("Overconsuming Vehicles by Category".to_string());
    lines.extend(rows_or_note(data.get("by_category"), |rows| {
        let columns = [
            Column::right("#"),
            Column::left("Long Description"),
            Column::right("No. of Tnxs above Limit"),
            Column::right("Sum of LTRs above Limit"),
        ];
        let table_rows = rows
            .iter()
            .map(|row| {
                vec![
                    count_field(row, "row"),
                    text_field(row, "category"),
                    count_field(row, "transactions_above_limit"),
                    decimal_field(row, "liters_above_limit", 0),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Category")
    }));

    lines.push(String::new());
    lines.push("Overconsumption by Plate".to_string());
    lines.extend(rows_or_note(data.get("by_plate"), |rows| {
        let columns = [
            Column::right("#"),
            Column::left("Plate #"),
            Column::right("Sum of LTRs above Limit"),
            Column::right("No. of Tnxs above Limit"),
            Column::right("Tnx Weight"),
        ];
        let table_rows = rows
            .iter()
            .map(|row| {
                vec![
                    count_field(row, "row"),
                    text_field(row, "plate"),
                    decimal_field(row, "liters_above_limit", 2),
                    count_field(row, "transactions_above_limit"),
                    decimal_field(row, "transaction_weight", 2),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Plate")
    }));

    let chart = data.get("chart").unwrap_or(&Value::Null);
    lines.push(String::new());
    lines.push(text_field(chart, "title"));
    lines.extend(render_scatter(chart));
    lines
}

fn rows_or_note<F>(table: Option<&Value>, render: F) -> Vec<String>
where
    F: FnOnce(&[Value]) -> Vec<String>,
{
    let rows = table
        .and_then(|value| value.get("rows"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if rows.is_empty() {
        return vec!["  No transactions above limit.".to_string()];
    }
    render(&rows)
}

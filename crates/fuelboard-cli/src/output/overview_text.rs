use serde_json::Value;

use super::chart_text::render_histogram;
use super::format::{self, Column, count_field, decimal_field, key_value_rows, text_field};
use super::section_text::section_lines;

pub fn render_overview(data: &Value) -> Vec<String> {
    let selection = text_field(data, "selection");
    let mut lines = key_value_rows(
        &[
            ("Category:", selection.clone()),
            ("Transactions:", count_field(data, "record_count")),
        ],
        2,
    );

    for key in ["transaction_quantity_histogram", "fuel_quantity_histogram"] {
        let section = data.get(key).unwrap_or(&Value::Null);
        lines.push(String::new());
        lines.push(histogram_title(section, key, &selection));
        lines.extend(section_lines(section, render_histogram));
    }

    let scatter = data.get("scatter").unwrap_or(&Value::Null);
    lines.push(String::new());
    lines.push(text_field(scatter, "title"));
    lines.extend(vehicle_table(data.get("vehicle_totals")));

    lines.push(String::new());
    lines.push("Regression:".to_string());
    lines.extend(section_lines(
        data.get("regression").unwrap_or(&Value::Null),
        render_regression,
    ));
    lines
}

fn histogram_title(section: &Value, key: &str, selection: &str) -> String {
    if let Some(title) = section
        .get("value")
        .and_then(|chart| chart.get("title"))
        .and_then(Value::as_str)
    {
        return title.to_string();
    }
    let column = match key {
        "transaction_quantity_histogram" => "Txn FCU",
        _ => "Fuel Qty",
    };
    format!("( {selection} ) Histogram of {column}")
}

fn vehicle_table(table: Option<&Value>) -> Vec<String> {
    let rows = table
        .and_then(|value| value.get("rows"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if rows.is_empty() {
        return vec!["  No vehicles in this selection.".to_string()];
    }

    let columns = [
        Column::left("Plate #"),
        Column::right("ODO Diff"),
        Column::right("Fuel Qty"),
        Column::left("In fit"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let used = row
                .get("used_in_fit")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            vec![
                text_field(row, "plate"),
                decimal_field(row, "odometer_delta", 2),
                decimal_field(row, "fuel_quantity", 2),
                if used { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Vehicle")
}

fn render_regression(summary: &Value) -> Vec<String> {
    let mut lines = vec![format!(
        "  The slope of the regression line is {}",
        text_field(summary, "slope_display")
    )];
    lines.extend(key_value_rows(
        &[
            ("Intercept:", decimal_field(summary, "intercept", 2)),
            ("Vehicles fitted:", count_field(summary, "points_used")),
        ],
        2,
    ));
    lines
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_overview;

    #[test]
    fn failed_sections_do_not_hide_the_rest() {
        let data = json!({
            "selection": "Crane",
            "record_count": 0,
            "transaction_quantity_histogram": {
                "status": "failed",
                "error": { "code": "empty_input", "message": "No `Txn FCU` values.", "recovery_steps": [] }
            },
            "fuel_quantity_histogram": {
                "status": "failed",
                "error": { "code": "empty_input", "message": "No `Fuel Qty` values.", "recovery_steps": [] }
            },
            "vehicle_totals": { "columns": [], "rows": [] },
            "scatter": { "title": "( Crane ) Scatter Plot of ODO Diff & Total Fuel Qty", "points": [] },
            "regression": {
                "status": "failed",
                "error": { "code": "empty_input", "message": "No `ODO Diff` values.", "recovery_steps": [] }
            }
        });

        let text = render_overview(&data).join("\n");
        assert!(text.contains("( Crane ) Histogram of Txn FCU"));
        assert!(text.contains("Unavailable (empty_input): No `Fuel Qty` values."));
        assert!(text.contains("No vehicles in this selection."));
        assert!(text.contains("Regression:"));
    }

    #[test]
    fn ready_regression_prints_slope() {
        let data = json!({
            "selection": "All",
            "record_count": 2,
            "vehicle_totals": {
                "columns": [],
                "rows": [
                    { "plate": "P-1", "odometer_delta": 100.0, "fuel_quantity": 10.0, "used_in_fit": true },
                    { "plate": "P-2", "odometer_delta": 200.0, "fuel_quantity": 20.0, "used_in_fit": true }
                ]
            },
            "scatter": { "title": "( All ) Scatter Plot of ODO Diff & Total Fuel Qty" },
            "regression": {
                "status": "ready",
                "value": { "slope": 0.1, "intercept": 0.0, "slope_display": "0.10", "points_used": 2 }
            }
        });

        let text = render_overview(&data).join("\n");
        assert!(text.contains("The slope of the regression line is 0.10"));
        assert!(text.contains("P-2"));
    }
}

use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub const EMPTY_INPUT: &str = "empty_input";
pub const SCHEMA_ERROR: &str = "schema_error";
pub const DIVISION_BY_ZERO: &str = "division_by_zero";
pub const REGRESSION_DEGENERATE: &str = "regression_degenerate";
pub const OUTLIER_BOUNDS_INVERTED: &str = "outlier_bounds_inverted";
pub const DATA_SOURCE_UNREADABLE: &str = "data_source_unreadable";
pub const INVALID_ARGUMENT: &str = "invalid_argument";

pub(crate) const DATA_HELP_COMMAND: &str = "fuelboard overview --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `fuelboard {cmd} --help` for usage."),
            None => "Run `fuelboard --help` for usage.".to_string(),
        };
        let error = Self::new(INVALID_ARGUMENT, message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new(INVALID_ARGUMENT, message, recovery_steps)
    }

    pub fn empty_input(column: &str) -> Self {
        Self::new(
            EMPTY_INPUT,
            &format!("No `{column}` values to compute outlier bounds from."),
            vec![
                "Pick a category with at least one transaction.".to_string(),
                "Run `fuelboard categories` to list available categories.".to_string(),
            ],
        )
        .with_data(json!({
            "column": column,
        }))
    }

    pub fn outlier_bounds_inverted(column: &str, lower: f64, upper: f64) -> Self {
        Self::new(
            OUTLIER_BOUNDS_INVERTED,
            &format!(
                "Outlier bounds for `{column}` are inverted: lower {lower} is above upper {upper}."
            ),
            vec![format!(
                "Check the `{column}` column for negative values dominating the selection."
            )],
        )
        .with_data(json!({
            "column": column,
            "lower": lower,
            "upper": upper,
        }))
    }

    pub fn division_by_zero(context: &str) -> Self {
        Self::new(
            DIVISION_BY_ZERO,
            &format!("Cannot compute {context}: the divisor is zero."),
            Vec::new(),
        )
        .with_data(json!({
            "context": context,
        }))
    }

    pub fn regression_degenerate(points: usize, detail: &str) -> Self {
        Self::new(
            REGRESSION_DEGENERATE,
            &format!("Cannot fit a regression line on {points} points: {detail}."),
            vec!["Select a category with more vehicles, or use `--category All`.".to_string()],
        )
        .with_data(json!({
            "points": points,
        }))
    }

    pub fn schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let missing_headers = required_headers
            .iter()
            .filter(|required| !actual_headers.contains(required))
            .cloned()
            .collect::<Vec<String>>();

        Self::new(
            SCHEMA_ERROR,
            &format!(
                "CSV headers are missing required columns: {}.",
                missing_headers.join(", ")
            ),
            vec![
                "Include every required header; extra columns are ignored.".to_string(),
                format!("Run `{DATA_HELP_COMMAND}` to review the dataset columns."),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
            "missing_headers": missing_headers,
        }))
    }

    pub fn optional_column_missing(header: &str) -> Self {
        Self::new(
            SCHEMA_ERROR,
            &format!("The dataset has no `{header}` column."),
            vec![format!("Add a `{header}` column to enable this section.")],
        )
        .with_data(json!({
            "missing_headers": [header],
        }))
    }

    pub fn malformed_value(row: usize, header: &str, value: &str, expected: &str) -> Self {
        Self::new(
            SCHEMA_ERROR,
            &format!("Row {row} has an invalid `{header}` value `{value}`: expected {expected}."),
            vec![format!("Fix row {row} in the source file and rerun.")],
        )
        .with_data(json!({
            "row": row,
            "header": header,
            "value": value,
            "expected": expected,
        }))
    }

    pub fn malformed_source(message: &str) -> Self {
        Self::new(
            SCHEMA_ERROR,
            message,
            vec![
                "Provide a delimited text file with one header row.".to_string(),
                format!("Run `{DATA_HELP_COMMAND}` to review the dataset columns."),
            ],
        )
    }

    pub fn data_source_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            DATA_SOURCE_UNREADABLE,
            &format!("Could not read dataset `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Pass `--data <path>` or set `FUELBOARD_DATA` to the dataset file.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn stdin_empty() -> Self {
        Self::new(
            DATA_SOURCE_UNREADABLE,
            "Path `-` means stdin input, but stdin was empty.",
            vec!["Pipe the dataset into stdin or pass a file path.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::{ClientError, SCHEMA_ERROR};

    #[test]
    fn schema_mismatch_lists_only_absent_required_headers() {
        let error = ClientError::schema_mismatch(
            vec!["Plate #".to_string(), "Fuel Qty".to_string()],
            vec!["Txn FCU".to_string()],
            vec!["Plate #".to_string(), "Extra".to_string()],
        );

        assert!(error.is(SCHEMA_ERROR));
        assert!(error.message.contains("Fuel Qty"));
        assert!(!error.message.contains("Plate #"));
        let missing = error
            .data
            .as_ref()
            .and_then(|data| data.get("missing_headers"))
            .and_then(|value| value.as_array())
            .cloned()
            .unwrap_or_default();
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn argument_errors_point_at_command_help() {
        let error = ClientError::invalid_argument_for_command("bad flag", Some("overview"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `fuelboard overview --help` for usage.".to_string()]
        );
    }
}

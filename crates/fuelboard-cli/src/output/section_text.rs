use serde_json::Value;

use super::format::{decimal, text_field};

/// Ready sections go through `render`; failed ones collapse to one line
/// naming the error so the rest of the view still prints.
pub fn section_lines<F>(section: &Value, render: F) -> Vec<String>
where
    F: FnOnce(&Value) -> Vec<String>,
{
    match section.get("status").and_then(Value::as_str) {
        Some("ready") => render(section.get("value").unwrap_or(&Value::Null)),
        _ => vec![unavailable(section.get("error"))],
    }
}

pub fn section_cell(section: &Value, decimals: usize) -> String {
    match section.get("status").and_then(Value::as_str) {
        Some("ready") => decimal(section.get("value").unwrap_or(&Value::Null), decimals),
        _ => {
            let code = section
                .get("error")
                .map(|error| text_field(error, "code"))
                .unwrap_or_else(|| "unknown".to_string());
            format!("n/a ({code})")
        }
    }
}

fn unavailable(error: Option<&Value>) -> String {
    match error {
        Some(error) => format!(
            "  Unavailable ({}): {}",
            text_field(error, "code"),
            text_field(error, "message")
        ),
        None => "  Unavailable.".to_string(),
    }
}

use std::io;

use serde_json::Value;

pub fn render_categories(data: &Value) -> io::Result<String> {
    let options = data
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("categories output requires options"))?;
    let source = data.get("source").and_then(Value::as_str).unwrap_or("dataset");

    let mut lines = vec![format!("Categories in {source}:"), String::new()];
    for option in options.iter().filter_map(Value::as_str) {
        lines.push(format!("  {option}"));
    }
    lines.push(String::new());
    lines.push("Pass one to `fuelboard overview --category <name>`.".to_string());

    Ok(lines.join("\n"))
}

mod categories_text;
mod chart_text;
mod consumption_text;
mod error_text;
mod format;
mod json;
mod mode;
mod overconsumption_text;
mod overview_text;
mod section_text;

use std::io;

use fuelboard_client::{ClientError, SuccessEnvelope};
use serde_json::Value;

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "overview" | "overconsumption" | "consumption" => render_view_report(&success.data),
        "dash" => render_dash(&success.data),
        "categories" => categories_text::render_categories(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

fn render_dash(data: &Value) -> io::Result<String> {
    let views = data
        .get("views")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("dash output requires views"))?;

    let mut sections = Vec::with_capacity(views.len());
    for view in views {
        sections.push(render_view_report(view)?);
    }
    Ok(sections.join("\n\n"))
}

fn render_view_report(report: &Value) -> io::Result<String> {
    let title = report
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("view output requires title"))?;
    let source = report
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or("dataset");

    let body = match report.get("view").and_then(Value::as_str) {
        Some("overview") => overview_text::render_overview(report),
        Some("overconsumption") => overconsumption_text::render_overconsumption(report),
        Some("consumption") => consumption_text::render_consumption(report),
        other => {
            return Err(io::Error::other(format!(
                "unsupported view `{}`",
                other.unwrap_or("missing")
            )));
        }
    };

    let mut lines = vec![format!("{title} ({source})"), String::new()];
    lines.extend(body);
    Ok(lines.join("\n"))
}

use fuelboard_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Check the dataset and retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use fuelboard_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::data_source_unreadable(Path::new("Data.csv"), "not found");

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    data_source_unreadable"));
        assert!(rendered.contains("  Details:  Could not read dataset `Data.csv`: not found"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  2. Pass `--data <path>` or set `FUELBOARD_DATA`"));
    }

    #[test]
    fn falls_back_to_a_generic_step() {
        let error = ClientError::new("internal_serialization_error", "boom", Vec::new());
        assert!(render_error(&error).ends_with("  1. Check the dataset and retry the command."));
    }
}

use fuelboard_client::commands;
use fuelboard_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let source = cli.command.source();
    let data_path = source.data.as_deref();
    let delimiter = source.delimiter.as_deref();

    match &cli.command {
        Commands::Overview { category, .. } => {
            commands::overview::run(category.as_deref(), data_path, delimiter)
        }
        Commands::Overconsumption { .. } => commands::overconsumption::run(data_path, delimiter),
        Commands::Consumption { .. } => commands::consumption::run(data_path, delimiter),
        Commands::Categories { .. } => commands::categories::run(data_path, delimiter),
        Commands::Dash { category, .. } => {
            commands::dash::run(category.as_deref(), data_path, delimiter)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::cli::parse_from;

    use super::dispatch;

    const FIXTURE: &str = "\
Transaction Id,Plate #,Long Description,Fuel Qty,ODO Diff,Overconsumption %,Overconsumption Liter
T1,P-1,Pickup,40,300,,
T2,P-2,Bus,120,600,10,12
";

    #[test]
    fn dispatches_to_expected_command_names() {
        let dir = tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let path = dir.path().join("fleet.csv");
            assert!(fs::write(&path, FIXTURE).is_ok());
            let path = path.display().to_string();

            let cases: [(&str, &str); 5] = [
                ("overview", "overview"),
                ("overconsumption", "overconsumption"),
                ("consumption", "consumption"),
                ("categories", "categories"),
                ("dash", "dash"),
            ];

            for (subcommand, expected_command) in cases {
                let parsed = parse_from(["fuelboard", subcommand, "--data", path.as_str()]);
                assert!(parsed.is_ok());
                if let Ok(cli) = parsed {
                    let response = dispatch(&cli);
                    assert!(response.is_ok());
                    if let Ok(success) = response {
                        assert_eq!(success.command, expected_command);
                    }
                }
            }
        }
    }

    #[test]
    fn missing_dataset_surfaces_client_error() {
        let parsed = parse_from(["fuelboard", "categories", "--data", "/no/such/dir/Data.csv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "data_source_unreadable");
            }
        }
    }
}

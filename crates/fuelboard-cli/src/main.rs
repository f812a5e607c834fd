mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use fuelboard_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Fuelboard - fuel transaction analytics

Usage:
  fuelboard <command>

Start here:
  fuelboard categories
  fuelboard dash
  fuelboard overview --help
";

const TOP_LEVEL_HELP: &str = "Fuelboard - fuel transaction analytics

USAGE: fuelboard <command> [--data <path>] [--delimiter <char>] [--json]

Views:
  fuelboard overview [--category <name>]          Histograms and the distance-vs-fuel regression
  fuelboard overconsumption                       Transactions and liters above limit
  fuelboard consumption                           Average consumption per category and vehicle
  fuelboard dash [--category <name>]              Every view in one report

Discover your data:
  fuelboard categories                            List categories accepted by --category

Dataset:
  Reads Data.csv from the current directory unless --data or FUELBOARD_DATA
  points elsewhere. Run `fuelboard overview --help` for the required columns.

Having issues or errors?
  Set FUELBOARD_LOG=debug to trace loading on stderr,
  or run `fuelboard <command> --help` for command usage.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    logging::init_logging();

    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing Usage line and "For more information" hint so the
/// recovery steps are the only guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// The first non-flag argument, when it names a known command.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let command = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;
    match command.as_str() {
        "overview" | "overconsumption" | "consumption" | "categories" | "dash" => {
            Some(command.clone())
        }
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_hint_uses_first_known_command() {
        assert_eq!(
            command_path_from_args(&args(&["fuelboard", "--json", "overview", "--bogus"])),
            Some("overview".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["fuelboard", "export", "x.csv"])),
            None
        );
    }

    #[test]
    fn clap_usage_tail_is_removed() {
        let message = "error: unexpected argument '--bogus' found\n\nUsage: fuelboard overview";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--bogus' found"
        );
    }
}

use clap::{Args, Parser, Subcommand};

/// Extended help shown after `fuelboard overview --help`.
/// Describes where the dataset comes from and which columns it needs.
pub const DATASET_AFTER_HELP: &str = "\
Dataset:
  Fuelboard reads one delimited text file with a header row.
  Resolution order for the file:
    1. --data <path>
    2. FUELBOARD_DATA environment variable
    3. Data.csv in the current directory
  Use `-` as the path to read stdin.
  The delimiter is `,` unless --delimiter or FUELBOARD_DELIMITER says
  otherwise. Pass `tab` for tab-separated files.

Required columns:
  Transaction Id          Non-empty identifier
  Plate #                 Vehicle plate, non-empty
  Long Description        Vehicle category, non-empty
  Fuel Qty                Liters dispensed, a finite number
  ODO Diff                Distance since the previous fill, a finite number
  Overconsumption %       Empty when the transaction is within its limit
  Overconsumption Liter   Empty when the transaction is within its limit

Optional columns:
  Txn FCU                 Transaction quantity; enables its histogram

  Extra columns are ignored. A trailing `%` on numbers is accepted.

Example:
  Transaction Id,Plate #,Long Description,Fuel Qty,ODO Diff,Overconsumption %,Overconsumption Liter,Txn FCU
  T001,ABC-101,Pickup,50,400,,,50
  T002,ABC-101,Pickup,60,420,12%,6.5,60

Logging:
  Set FUELBOARD_LOG (for example `debug`) to trace loading and rendering on stderr.
";

#[derive(Debug, Parser)]
#[command(
    name = "fuelboard",
    version,
    about = "fuel transaction analytics",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Dataset location flags shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// Dataset path, or `-` for stdin [default: $FUELBOARD_DATA, then Data.csv]
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,
    /// Field delimiter: one ASCII character, or `tab` [default: ,]
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Distribution histograms and the distance-vs-fuel regression
    #[command(after_help = DATASET_AFTER_HELP)]
    Overview {
        /// Vehicle category to analyze, or `All`
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: DataArgs,
    },
    /// Transactions and liters above the consumption limit
    Overconsumption {
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: DataArgs,
    },
    /// Average consumption per category and per vehicle
    Consumption {
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: DataArgs,
    },
    /// List the categories accepted by --category
    Categories {
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: DataArgs,
    },
    /// Render every view in one report
    Dash {
        /// Vehicle category for the overview section, or `All`
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: DataArgs,
    },
}

impl Commands {
    pub fn json(&self) -> bool {
        match self {
            Self::Overview { json, .. }
            | Self::Overconsumption { json, .. }
            | Self::Consumption { json, .. }
            | Self::Categories { json, .. }
            | Self::Dash { json, .. } => *json,
        }
    }

    pub fn source(&self) -> &DataArgs {
        match self {
            Self::Overview { source, .. }
            | Self::Overconsumption { source, .. }
            | Self::Consumption { source, .. }
            | Self::Categories { source, .. }
            | Self::Dash { source, .. } => source,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["fuelboard", "overview"],
            vec!["fuelboard", "overview", "--category", "Pickup"],
            vec!["fuelboard", "overview", "--category", "All", "--json"],
            vec!["fuelboard", "overconsumption", "--data", "fleet.csv"],
            vec!["fuelboard", "consumption", "--delimiter", ";"],
            vec!["fuelboard", "consumption", "--json", "--data", "-"],
            vec!["fuelboard", "categories"],
            vec!["fuelboard", "categories", "--json"],
            vec!["fuelboard", "dash"],
            vec!["fuelboard", "dash", "--category", "Bus", "--delimiter", "tab"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn overview_collects_category_and_source() {
        let parsed = parse_from([
            "fuelboard",
            "overview",
            "--category",
            "Pickup",
            "--data",
            "fleet.csv",
            "--delimiter",
            ";",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                &cli.command,
                Commands::Overview { category: Some(name), json: false, .. } if name == "Pickup"
            ));
            assert_eq!(cli.command.source().data.as_deref(), Some("fleet.csv"));
            assert_eq!(cli.command.source().delimiter.as_deref(), Some(";"));
        }
    }

    #[test]
    fn category_is_not_accepted_by_table_commands() {
        let parsed = parse_from(["fuelboard", "consumption", "--category", "Bus"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let parsed = parse_from(["fuelboard", "export"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        }
    }
}

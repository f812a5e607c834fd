use crate::dataset::source::DataSource;
use crate::{ClientError, ClientResult};

pub const DATA_ENV: &str = "FUELBOARD_DATA";
pub const DELIMITER_ENV: &str = "FUELBOARD_DELIMITER";
pub const DEFAULT_DATA_FILE: &str = "Data.csv";
pub const DEFAULT_DELIMITER: u8 = b',';

/// Where the dataset comes from and how its rows are split.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DatasetConfig {
    pub source: DataSource,
    pub delimiter: u8,
}

impl DatasetConfig {
    pub fn from_path(path: &str) -> Self {
        Self {
            source: DataSource::from_arg(path),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Explicit overrides win, then the environment, then `Data.csv` in the
    /// working directory.
    pub fn resolve(
        path_override: Option<&str>,
        delimiter_override: Option<&str>,
    ) -> ClientResult<Self> {
        let path = match path_override {
            Some(value) => value.to_string(),
            None => std::env::var(DATA_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
        };

        let delimiter = match delimiter_override {
            Some(value) => parse_delimiter(value)?,
            None => match std::env::var(DELIMITER_ENV) {
                Ok(value) if !value.is_empty() => parse_delimiter(&value)?,
                _ => DEFAULT_DELIMITER,
            },
        };

        Ok(Self::from_path(&path).with_delimiter(delimiter))
    }
}

/// Accepts a single ASCII character, or `tab` / `\t` for tab-separated files.
pub fn parse_delimiter(value: &str) -> ClientResult<u8> {
    if matches!(value, "tab" | "\\t" | "\t") {
        return Ok(b'\t');
    }

    let bytes = value.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii() && bytes[0] != b'"' && bytes[0] != b'\n' {
        return Ok(bytes[0]);
    }

    Err(ClientError::invalid_argument_with_recovery(
        &format!("Delimiter `{value}` must be a single ASCII character."),
        vec![
            "Pass `--delimiter ,` or `--delimiter ';'`.".to_string(),
            "Use `--delimiter tab` for tab-separated files.".to_string(),
        ],
    ))
}

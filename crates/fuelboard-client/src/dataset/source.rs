use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::config::DatasetConfig;
use crate::dataset::{Dataset, parse_dataset};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum DataSource {
    File(PathBuf),
    Stdin,
}

impl DataSource {
    pub fn from_arg(value: &str) -> Self {
        if value == "-" {
            return Self::Stdin;
        }
        Self::File(PathBuf::from(value))
    }

    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
        }
    }

    /// Canonical form used as the cache identity. Falls back to the given path
    /// when it cannot be canonicalized so the read reports the real error.
    pub(crate) fn identity(&self) -> Self {
        match self {
            Self::File(path) => Self::File(fs::canonicalize(path).unwrap_or_else(|_| path.clone())),
            Self::Stdin => Self::Stdin,
        }
    }
}

pub fn load_dataset(config: &DatasetConfig) -> ClientResult<Dataset> {
    let content = read_source(&config.source, None)?;
    parse_dataset(&content, config.delimiter, &config.source.label())
}

pub(crate) fn read_source(
    source: &DataSource,
    stdin_override: Option<Vec<u8>>,
) -> ClientResult<Vec<u8>> {
    match source {
        DataSource::File(path) => read_file(path),
        DataSource::Stdin => match read_stdin(stdin_override)? {
            Some(body) => Ok(body),
            None => Err(ClientError::stdin_empty()),
        },
    }
}

fn read_file(path: &Path) -> ClientResult<Vec<u8>> {
    fs::read(path)
        .map_err(|error| ClientError::data_source_unreadable(path, &error.to_string()))
}

fn read_stdin(stdin_override: Option<Vec<u8>>) -> ClientResult<Option<Vec<u8>>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value).filter(|body| !is_blank(body)));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|error| ClientError::data_source_unreadable(Path::new("-"), &error.to_string()))?;

    if is_blank(&buffer) {
        return Ok(None);
    }

    Ok(Some(buffer))
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

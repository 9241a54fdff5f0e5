//! Application configuration loaded from a TOML document.
//!
//! The core consumes these values as plain parameters; only the binary
//! knows about the config file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The batch job and dashboard configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Symbols to download on each batch run.
    pub tickers: Vec<String>,

    /// Inclusive download range.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Filesystem location of the SQLite store.
    pub database_path: PathBuf,
}

impl AppConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tickers = ["AAPL", "MSFT", "GOOG", "AMZN", "NVDA"]
start_date = "2023-01-01"
end_date = "2024-12-31"
database_path = "data/stocks.db"
"#;

    #[test]
    fn parses_sample_config() {
        let config = AppConfig::from_toml(SAMPLE).unwrap();

        assert_eq!(config.tickers.len(), 5);
        assert_eq!(config.tickers[0], "AAPL");
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.database_path, PathBuf::from("data/stocks.db"));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let err = AppConfig::from_toml("tickers = [\"AAPL\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_date_is_a_parse_error() {
        let content = SAMPLE.replace("2023-01-01", "not-a-date");
        assert!(AppConfig::from_toml(&content).is_err());
    }
}

//! Data loading for the allegations dashboard

pub mod config;
pub mod sources;

use std::path::PathBuf;
use thiserror::Error;
use rand::distributions::WeightedError;
use tokio::task::JoinError;

// Re-exports
pub use config::{ColumnMapping, DashboardConfig, LoaderConfig, NullConfig, CONFIG_ENV_VAR};
pub use sources::{read_records, CsvRecordSource, DemoSource};

/// Errors that make a dataset unusable
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("The dataset contains no usable rows")]
    Empty,

    #[error("Background load failed: {0}")]
    Join(#[from] JoinError),

    #[error("Demo data generation failed: {0}")]
    Generator(#[from] WeightedError),
}

impl From<csv::Error> for LoadError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => LoadError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => LoadError::Csv(error.to_string()),
        }
    }
}

/// Errors reading the dashboard config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let error = LoadError::MissingColumns(vec!["year_received".into(), "fado_type".into()]);
        assert_eq!(error.to_string(), "Missing required column(s): year_received, fado_type");
    }

    #[test]
    fn test_csv_framing_error_maps_to_csv_variant() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let error = reader
            .records()
            .find_map(Result::err)
            .map(LoadError::from)
            .unwrap();
        assert!(matches!(error, LoadError::Csv(_)));
    }
}

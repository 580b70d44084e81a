use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};
use dv_core::RecordStore;

use super::normalize::RowNormalizer;
use crate::config::{ColumnMapping, LoaderConfig};
use crate::LoadError;

/// Header positions of the mapped columns
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    year: usize,
    category: usize,
    disposition: usize,
    precinct: Option<usize>,
}

impl ColumnIndices {
    /// Locate the mapped columns. Header names are compared after trimming.
    fn locate(headers: &StringRecord, columns: &ColumnMapping) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = columns
            .required()
            .into_iter()
            .filter(|name| find(*name).is_none())
            .map(str::to_string)
            .collect();

        match (find(&columns.year), find(&columns.category), find(&columns.disposition)) {
            (Some(year), Some(category), Some(disposition)) => Ok(Self {
                year,
                category,
                disposition,
                precinct: columns.precinct.as_deref().and_then(find),
            }),
            _ => Err(LoadError::MissingColumns(missing)),
        }
    }
}

/// Read every row of a CSV stream into a [`RecordStore`]
pub fn read_records<R: Read>(reader: R, source_name: &str, config: &LoaderConfig) -> Result<RecordStore, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let indices = ColumnIndices::locate(&headers, &config.columns)?;
    debug!("Column positions for {}: {:?}", source_name, indices);

    let mut normalizer = RowNormalizer::new(&config.null_config);
    let mut records = Vec::new();
    let mut row = StringRecord::new();

    while csv_reader.read_record(&mut row)? {
        let record = normalizer.normalize(
            row.get(indices.year),
            row.get(indices.category),
            row.get(indices.disposition),
            indices.precinct.and_then(|i| row.get(i)),
        );
        records.extend(record);
    }

    let skipped = normalizer.skipped();
    if skipped > 0 {
        warn!("Skipped {} row(s) of {} without a valid year", skipped, source_name);
    }

    let store = RecordStore::new(source_name, records, skipped).ok_or(LoadError::Empty)?;
    info!(
        "Loaded {} records from {} ({}, {} dispositions)",
        store.len(),
        source_name,
        store.extent(),
        normalizer.distinct_dispositions()
    );
    Ok(store)
}

/// CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
    config: LoaderConfig,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in the UI
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Load the file synchronously
    pub fn load_blocking(&self) -> Result<RecordStore, LoadError> {
        info!("Loading CSV from {}", self.path.display());
        let file = File::open(&self.path)?;
        read_records(BufReader::new(file), &self.source_name(), &self.config)
    }

    /// Load the file on the blocking thread pool
    pub async fn load(self) -> Result<RecordStore, LoadError> {
        tokio::task::spawn_blocking(move || self.load_blocking()).await?
    }
}

//! Record store: the immutable, load-once dataset

use crate::record::{Record, YearRange};

/// Ordered sequence of normalized records plus its global year extent.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct RecordStore {
    source_name: String,
    records: Vec<Record>,
    extent: YearRange,
    skipped_rows: usize,
}

impl RecordStore {
    /// Build a store. Returns `None` for an empty record list since no
    /// extent exists without data.
    pub fn new(source_name: impl Into<String>, records: Vec<Record>, skipped_rows: usize) -> Option<Self> {
        let first = records.first()?.year;
        let (lo, hi) = records
            .iter()
            .fold((first, first), |(lo, hi), r| (lo.min(r.year), hi.max(r.year)));

        Some(Self {
            source_name: source_name.into(),
            records,
            extent: YearRange::new(lo, hi),
            skipped_rows,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Global min..max year over the whole dataset
    pub fn extent(&self) -> YearRange {
        self.extent
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Rows dropped during loading because their year was unusable
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

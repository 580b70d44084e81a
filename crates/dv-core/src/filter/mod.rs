//! Filter state: the single mutable source of truth for the dashboard

mod engine;
mod subscriber;

pub use engine::FilterEngine;
pub use subscriber::FilterSubscriber;

use crate::record::{Category, CategorySet, Record, YearRange};

/// Active selection: an inclusive year range and the enabled categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub year_range: YearRange,
    pub enabled_categories: CategorySet,
}

impl FilterState {
    /// The unfiltered state for a dataset: full extent, every category
    pub fn full(extent: YearRange) -> Self {
        Self {
            year_range: extent,
            enabled_categories: CategorySet::all(),
        }
    }

    /// Whether a record passes both the year and category filters
    pub fn matches(&self, record: &Record) -> bool {
        self.year_range.contains(record.year) && self.enabled_categories.contains(record.category)
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled_categories.contains(category)
    }
}

/// Snapshot handed to subscribers and views after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    pub state: FilterState,
    /// Global year extent of the dataset
    pub extent: YearRange,
    /// Incremented on every effective change
    pub revision: u64,
}

impl FilterContext {
    /// True when no year restriction is active
    pub fn is_full_range(&self) -> bool {
        self.state.year_range == self.extent
    }
}

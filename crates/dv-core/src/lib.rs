//! Core functionality for the allegations dashboard
//!
//! This crate holds the record model, the filter state shared by every view,
//! the derived-view aggregations and the controller that keeps the two
//! year-range widgets in sync with the filter state.

pub mod aggregate;
pub mod filter;
pub mod record;
pub mod scale;
pub mod settings;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use aggregate::{
    aggregate_by_disposition, aggregate_by_year_and_category, filtered_records, summarize,
    SelectionSnapshot, SelectionSummary, YearCounts, TOP_DISPOSITIONS,
};
pub use filter::{FilterContext, FilterEngine, FilterState, FilterSubscriber};
pub use record::{Category, CategorySet, Disposition, Record, YearRange};
pub use scale::LinearScale;
pub use settings::{AppSettings, ThemeSettings};
pub use store::RecordStore;
pub use sync::{ControlEvent, RangeSelectionController};

//! Record sources

pub mod csv_source;
pub mod demo;
pub mod normalize;

pub use csv_source::{read_records, CsvRecordSource};
pub use demo::DemoSource;
pub use normalize::RowNormalizer;

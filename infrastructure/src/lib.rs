//! Infrastructure layer for twentyq
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, dataset ingestion, and configuration file loading.

pub mod catalog;
pub mod category;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod report;

// Re-export commonly used types
pub use catalog::{CatalogError, CatalogLoader};
pub use category::{CategoryTreeError, CategoryTreeLoader};
pub use config::{
    ConfigLoader, FileAnswersConfig, FileConfig, FileDatasetConfig, FileGameConfig,
    FileLogConfig, FileOutputConfig,
};
pub use dataset::{
    ConversionStats, DatasetError, DatasetFormat, DatasetLoader, DuplicatePolicy, MetaIssue,
    MetaProblem, check_meta, check_meta_file, convert_long_to_wide, long_to_wide,
};
pub use logging::JsonlSessionLogger;
pub use report::CategoryReport;

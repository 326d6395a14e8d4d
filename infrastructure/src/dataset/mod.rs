//! Dataset adapters: ingestion, conversion and checks for JSON Lines files.

mod check;
mod convert;
mod error;
mod jsonl;
mod loader;

pub use check::{MetaIssue, MetaProblem, check_meta, check_meta_file};
pub use convert::{ConversionStats, DuplicatePolicy, convert_long_to_wide, long_to_wide};
pub use error::DatasetError;
pub use loader::{DatasetFormat, DatasetLoader, META_KEY};

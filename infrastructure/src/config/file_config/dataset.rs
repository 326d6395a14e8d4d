//! Dataset configuration from TOML (`[dataset]` section)

use crate::dataset::DatasetFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw dataset configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatasetConfig {
    /// Dataset used when `--dataset` is not given
    pub path: Option<PathBuf>,
    pub format: DatasetFormat,
    /// Category tree JSON for the pre-filter
    pub category_tree: Option<PathBuf>,
    /// Predicate catalog TOML replacing the built-in catalog
    pub catalog: Option<PathBuf>,
}

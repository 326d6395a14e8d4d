//! Category reports for a loaded dataset.
//!
//! Writes a Markdown count table (`category_counts.md`) and a grouped JSON
//! listing (`nouns_by_category.json`).

use crate::dataset::DatasetError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::info;
use twentyq_domain::AttributeStore;

/// Label for entities without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

pub const COUNTS_FILE: &str = "category_counts.md";
pub const GROUPED_FILE: &str = "nouns_by_category.json";

/// Entities grouped by category label, both sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl CategoryReport {
    pub fn from_store(store: &AttributeStore) -> Self {
        let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for entity in store.entities() {
            let label = store.category_of(entity).unwrap_or(UNCATEGORIZED);
            groups
                .entry(label.to_string())
                .or_default()
                .insert(entity.name().to_string());
        }
        Self { groups }
    }

    pub fn categories(&self) -> usize {
        self.groups.len()
    }

    /// `| Category | Count |` table, one row per category
    pub fn markdown_counts(&self) -> String {
        let mut out = String::from("| Category | Count |\n|---|---:|\n");
        for (label, names) in &self.groups {
            out.push_str(&format!("| {} | {} |\n", label, names.len()));
        }
        out
    }

    /// `{category: [sorted names]}`
    pub fn grouped_json(&self) -> serde_json::Value {
        serde_json::json!(self.groups)
    }

    /// Write both report files into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
        std::fs::create_dir_all(dir).map_err(|source| DatasetError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let files = [
            (dir.join(COUNTS_FILE), self.markdown_counts()),
            (dir.join(GROUPED_FILE), format!("{:#}\n", self.grouped_json())),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (path, content) in files {
            std::fs::write(&path, content).map_err(|source| DatasetError::Write {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
        info!(
            "Wrote category report for {} categories to {}",
            self.groups.len(),
            dir.display()
        );
        Ok(written)
    }
}

//! Category tree files (JSON).

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use twentyq_domain::CategoryTree;

#[derive(Debug, Error)]
pub enum CategoryTreeError {
    #[error("Failed to read category tree {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid category tree {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads [`CategoryTree`] files
pub struct CategoryTreeLoader;

impl CategoryTreeLoader {
    pub fn load(path: &Path) -> Result<CategoryTree, CategoryTreeError> {
        let content = std::fs::read_to_string(path).map_err(|source| CategoryTreeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tree: CategoryTree =
            serde_json::from_str(&content).map_err(|source| CategoryTreeError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let labels = tree.root.labels();
        for label in &labels {
            if !tree.categories.is_empty() && !tree.categories.contains_key(*label) {
                warn!("Category '{}' has no listed options", label);
            }
        }
        info!(
            "Loaded category tree from {} ({} leaves)",
            path.display(),
            labels.len()
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twentyq_domain::{CategoryWalker, WalkStep};

    #[test]
    fn test_load_tree_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(
            &path,
            r#"{"Questions": {"Question": "Is it alive?", "YES": "animals", "NO": "objects"},
                "Categories": {"animals": ["cat"], "objects": ["rock", "car"]}}"#,
        )
        .unwrap();

        let tree = CategoryTreeLoader::load(&path).unwrap();
        assert_eq!(tree.option_count("objects"), 2);
        let mut walker = CategoryWalker::new(&tree);
        assert_eq!(walker.answer(true).unwrap(), WalkStep::Selected("animals"));
    }

    #[test]
    fn test_invalid_tree_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"Categories": {}}"#).unwrap();
        assert!(matches!(
            CategoryTreeLoader::load(&path),
            Err(CategoryTreeError::Parse { .. })
        ));
    }
}

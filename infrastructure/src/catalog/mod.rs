//! Predicate catalog files.
//!
//! A catalog file replaces the built-in catalog:
//!
//! ```toml
//! [[primary]]
//! id = "contains_r"
//! prompt = "Does the word contain the letter R?"
//! test = { kind = "contains", text = "r" }
//!
//! [[secondary]]
//! id = "state"
//! prompt = "Is it a US state?"
//! test = { kind = "one_of", names = ["ohio", "utah"] }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use twentyq_domain::PredicateCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Duplicate predicate id '{0}'")]
    DuplicateId(String),
}

/// Loads [`PredicateCatalog`] files
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load(path: &Path) -> Result<PredicateCatalog, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse_str(&content).map_err(|e| match e {
            CatalogError::Parse { message, .. } => CatalogError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        info!(
            "Loaded predicate catalog from {} ({} primary, {} secondary)",
            path.display(),
            catalog.primary.len(),
            catalog.secondary.len()
        );
        Ok(catalog)
    }

    pub fn parse_str(content: &str) -> Result<PredicateCatalog, CatalogError> {
        let catalog: PredicateCatalog =
            toml::from_str(content).map_err(|e| CatalogError::Parse {
                path: PathBuf::new(),
                message: e.to_string(),
            })?;

        let mut seen = BTreeSet::new();
        for predicate in catalog.primary.iter().chain(&catalog.secondary) {
            if !seen.insert(predicate.id.as_str()) {
                return Err(CatalogError::DuplicateId(predicate.id.clone()));
            }
        }
        Ok(catalog)
    }

    /// The catalog at `path`, or the built-in one
    pub fn load_or_builtin(path: Option<&Path>) -> Result<PredicateCatalog, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(PredicateCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twentyq_domain::NameTest;

    const CATALOG: &str = r#"
[[primary]]
id = "contains_r"
prompt = "Does the word contain the letter R?"
test = { kind = "contains", text = "r" }

[[primary]]
id = "long_word"
prompt = "Is it a long word?"
test = { kind = "min_length", count = 10 }

[[secondary]]
id = "state"
prompt = "Is it a US state?"
test = { kind = "one_of", names = ["ohio", "utah"] }
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = CatalogLoader::parse_str(CATALOG).unwrap();
        assert_eq!(catalog.primary.len(), 2);
        assert_eq!(catalog.primary[0].test, NameTest::contains("r"));
        assert_eq!(catalog.primary[1].test, NameTest::MinLength { count: 10 });
        assert!(catalog.secondary[0].matches("Utah"));
    }

    #[test]
    fn test_missing_tier_is_empty() {
        let catalog = CatalogLoader::parse_str(
            "[[primary]]\nid = \"a\"\nprompt = \"A?\"\ntest = { kind = \"contains_digit\" }\n",
        )
        .unwrap();
        assert_eq!(catalog.primary.len(), 1);
        assert!(catalog.secondary.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let content = format!(
            "{}\n[[secondary]]\nid = \"contains_r\"\nprompt = \"R?\"\ntest = {{ kind = \"contains\", text = \"r\" }}\n",
            CATALOG
        );
        assert!(matches!(
            CatalogLoader::parse_str(&content),
            Err(CatalogError::DuplicateId(id)) if id == "contains_r"
        ));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[[primary]]\nid = 3\n").unwrap();
        match CatalogLoader::load(&path) {
            Err(CatalogError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_builtin_when_no_path() {
        let catalog = CatalogLoader::load_or_builtin(None).unwrap();
        assert_eq!(catalog, PredicateCatalog::builtin());
    }
}

//! Metadata check for wide-format datasets

use super::error::DatasetError;
use super::jsonl::read_file;
use super::loader::META_KEY;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaProblem {
    InvalidJson(String),
    MissingMeta,
    MetaNotObject,
    MissingCategory,
}

impl std::fmt::Display for MetaProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaProblem::InvalidJson(msg) => write!(f, "invalid JSON ({})", msg),
            MetaProblem::MissingMeta => write!(f, "missing {}", META_KEY),
            MetaProblem::MetaNotObject => write!(f, "{} is not an object", META_KEY),
            MetaProblem::MissingCategory => write!(f, "missing {}.category", META_KEY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaIssue {
    pub line: usize,
    pub problem: MetaProblem,
}

impl std::fmt::Display for MetaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.problem)
    }
}

/// Report every line lacking a usable `_meta.category`.
pub fn check_meta(content: &str) -> Vec<MetaIssue> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| {
            check_line(line).map(|problem| MetaIssue {
                line: idx + 1,
                problem,
            })
        })
        .collect()
}

pub fn check_meta_file(path: &Path) -> Result<Vec<MetaIssue>, DatasetError> {
    Ok(check_meta(&read_file(path)?))
}

fn check_line(line: &str) -> Option<MetaProblem> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return Some(MetaProblem::InvalidJson(e.to_string())),
    };
    match value.get(META_KEY) {
        None => Some(MetaProblem::MissingMeta),
        Some(Value::Object(meta)) if meta.contains_key("category") => None,
        Some(Value::Object(_)) => Some(MetaProblem::MissingCategory),
        Some(_) => Some(MetaProblem::MetaNotObject),
    }
}

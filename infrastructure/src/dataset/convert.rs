//! Long-to-wide dataset conversion

use super::error::DatasetError;
use super::jsonl::{declare_kind, optional_str, parse_rows, raw_rating, read_file, required_str};
use super::loader::META_KEY;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use twentyq_domain::{AttributeKind, DomainError, RawRating};

/// What to keep when a (noun, property) pair appears more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Last,
    First,
    /// Arithmetic mean of the ratings that read as numbers
    Mean,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(Self::Last),
            "first" => Ok(Self::First),
            "mean" => Ok(Self::Mean),
            other => Err(format!("unknown duplicate policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub rows_in: usize,
    pub entities_out: usize,
    pub attributes: usize,
}

impl std::fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows -> {} entities, {} properties",
            self.rows_in, self.entities_out, self.attributes
        )
    }
}

#[derive(Default)]
struct WideEntity {
    category: Option<String>,
    ratings: BTreeMap<String, Vec<Value>>,
}

/// Convert long-format JSONL text into wide-format JSONL text.
///
/// Output lines are sorted by noun. Boolean properties, declared through
/// `property_type` or holding only JSON flags, are written as `true`/`false`
/// so the wide file infers the same kinds the long file declared.
pub fn long_to_wide(
    content: &str,
    policy: DuplicatePolicy,
) -> Result<(String, ConversionStats), DatasetError> {
    let rows = parse_rows(content)?;
    let mut entities: BTreeMap<String, WideEntity> = BTreeMap::new();
    let mut properties = BTreeSet::new();
    let mut declared: BTreeMap<String, AttributeKind> = BTreeMap::new();
    let mut observed: BTreeMap<String, Vec<RawRating>> = BTreeMap::new();

    for (line, map) in &rows {
        let noun = required_str(map, "noun", *line)?;
        let property = required_str(map, "property", *line)?;
        let rating = map.get("rating").cloned().ok_or(DatasetError::MissingField {
            line: *line,
            field: "rating",
        })?;

        declare_kind(map, &noun, &property, *line, &mut declared)?;
        if let Some(raw) = raw_rating(&rating, *line)? {
            observed.entry(property.clone()).or_default().push(raw);
        }

        let entity = entities.entry(noun).or_default();
        if let Some(category) = optional_str(map, "category") {
            entity.category = Some(category);
        }
        entity
            .ratings
            .entry(property.clone())
            .or_default()
            .push(rating);
        properties.insert(property);
    }

    let kinds: BTreeMap<&str, AttributeKind> = properties
        .iter()
        .filter_map(|property| {
            let kind = declared.get(property).copied().or_else(|| {
                observed
                    .get(property)
                    .and_then(|raws| AttributeKind::infer(raws).ok())
            })?;
            Some((property.as_str(), kind))
        })
        .collect();

    let mut output = String::new();
    for (noun, entity) in &entities {
        let mut record = Map::new();
        record.insert("noun".to_string(), Value::String(noun.clone()));
        for (property, values) in &entity.ratings {
            let value = match kinds.get(property.as_str()) {
                Some(AttributeKind::Boolean) => {
                    resolve_flag(values, policy).map_err(|reason| {
                        DomainError::DatasetInconsistency {
                            entity: noun.clone(),
                            attribute: property.clone(),
                            reason,
                        }
                    })?
                }
                _ => resolve(values, policy),
            };
            record.insert(property.clone(), value);
        }
        if let Some(category) = &entity.category {
            let mut meta = Map::new();
            meta.insert("category".to_string(), Value::String(category.clone()));
            record.insert(META_KEY.to_string(), Value::Object(meta));
        }
        output.push_str(&Value::Object(record).to_string());
        output.push('\n');
    }

    let stats = ConversionStats {
        rows_in: rows.len(),
        entities_out: entities.len(),
        attributes: properties.len(),
    };
    Ok((output, stats))
}

/// File-to-file [`long_to_wide`].
pub fn convert_long_to_wide(
    input: &Path,
    output: &Path,
    policy: DuplicatePolicy,
) -> Result<ConversionStats, DatasetError> {
    let content = read_file(input)?;
    let (wide, stats) = long_to_wide(&content, policy)?;

    let write_err = |source| DatasetError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let file = std::fs::File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(wide.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    info!(
        "Converted {} to {} ({})",
        input.display(),
        output.display(),
        stats
    );
    Ok(stats)
}

fn resolve(values: &[Value], policy: DuplicatePolicy) -> Value {
    match policy {
        DuplicatePolicy::Last => values.last().cloned().unwrap_or(Value::Null),
        DuplicatePolicy::First => values.first().cloned().unwrap_or(Value::Null),
        DuplicatePolicy::Mean => {
            let numbers: Vec<f64> = values.iter().filter_map(as_number).collect();
            if numbers.is_empty() {
                return Value::Null;
            }
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            serde_json::Number::from_f64(mean).map_or(Value::Null, Value::Number)
        }
    }
}

/// [`resolve`] for a boolean property; the mean of flags is a majority
/// vote with ties reading as yes.
fn resolve_flag(values: &[Value], policy: DuplicatePolicy) -> Result<Value, String> {
    if policy == DuplicatePolicy::Mean {
        let flags = values
            .iter()
            .filter(|v| !v.is_null())
            .map(as_flag)
            .collect::<Result<Vec<bool>, String>>()?;
        if flags.is_empty() {
            return Ok(Value::Null);
        }
        let yes = flags.iter().filter(|f| **f).count();
        return Ok(Value::Bool(yes * 2 >= flags.len()));
    }
    match resolve(values, policy) {
        Value::Null => Ok(Value::Null),
        value => as_flag(&value).map(Value::Bool),
    }
}

fn as_flag(value: &Value) -> Result<bool, String> {
    let raw = match value {
        Value::Bool(b) => RawRating::Flag(*b),
        Value::Number(n) => RawRating::Number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => RawRating::Text(s.clone()),
        other => return Err(format!("expected a boolean flag, got {}", other)),
    };
    AttributeKind::Boolean
        .coerce(&raw)?
        .as_flag()
        .ok_or_else(|| format!("expected a boolean flag, got {}", raw))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

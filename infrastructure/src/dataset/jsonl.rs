//! JSON Lines helpers shared by the dataset adapters.

use super::error::DatasetError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use twentyq_domain::{AttributeKind, DomainError, RawRating};

/// One JSON object and the 1-based line it came from
pub(crate) type Row = (usize, Map<String, Value>);

pub(crate) fn read_file(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse every non-blank line as a JSON object.
pub(crate) fn parse_rows(content: &str) -> Result<Vec<Row>, DatasetError> {
    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(line).map_err(|e| DatasetError::InvalidJson {
                line: line_no,
                message: e.to_string(),
            })?;
        match value {
            Value::Object(map) => rows.push((line_no, map)),
            other => {
                return Err(DatasetError::InvalidRecord {
                    line: line_no,
                    message: format!("expected a JSON object, got {}", type_name(&other)),
                });
            }
        }
    }
    Ok(rows)
}

pub(crate) fn required_str(
    map: &Map<String, Value>,
    field: &'static str,
    line: usize,
) -> Result<String, DatasetError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(DatasetError::MissingField { line, field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(DatasetError::InvalidRecord {
            line,
            message: format!("'{}' must be a string, got {}", field, type_name(other)),
        }),
    }
}

pub(crate) fn optional_str(map: &Map<String, Value>, field: &str) -> Option<String> {
    map.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Convert a JSON rating; `null` means no value.
pub(crate) fn raw_rating(value: &Value, line: usize) -> Result<Option<RawRating>, DatasetError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(RawRating::Flag(*b))),
        Value::Number(n) => n
            .as_f64()
            .map(|n| Some(RawRating::Number(n)))
            .ok_or_else(|| DatasetError::InvalidRecord {
                line,
                message: format!("rating {} is not representable", n),
            }),
        Value::String(s) => Ok(Some(RawRating::Text(s.clone()))),
        other => Err(DatasetError::InvalidRecord {
            line,
            message: format!("rating must be a flag, number or string, got {}", type_name(other)),
        }),
    }
}

/// Record the row's `property_type`, if any, for `property`.
///
/// A property declared with two different kinds is inconsistent.
pub(crate) fn declare_kind(
    map: &Map<String, Value>,
    noun: &str,
    property: &str,
    line: usize,
    declared: &mut BTreeMap<String, AttributeKind>,
) -> Result<(), DatasetError> {
    let Some(declared_type) = optional_str(map, "property_type") else {
        return Ok(());
    };
    let kind: AttributeKind = declared_type
        .parse()
        .map_err(|message| DatasetError::InvalidRecord { line, message })?;
    match declared.get(property) {
        Some(existing) if *existing != kind => Err(DomainError::DatasetInconsistency {
            entity: noun.to_string(),
            attribute: property.to_string(),
            reason: format!("declared as both {} and {}", existing, kind),
        }
        .into()),
        Some(_) => Ok(()),
        None => {
            declared.insert(property.to_string(), kind);
            Ok(())
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let rows = parse_rows("{\"a\": 1}\n\n   \n{\"b\": 2}\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[1].0, 4);
    }

    #[test]
    fn test_parse_rows_reports_line() {
        let err = parse_rows("{\"a\": 1}\n{oops}\n").unwrap_err();
        assert_eq!(err.line(), Some(2));

        let err = parse_rows("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_raw_rating() {
        assert_eq!(raw_rating(&Value::Null, 1).unwrap(), None);
        assert_eq!(
            raw_rating(&serde_json::json!(true), 1).unwrap(),
            Some(RawRating::Flag(true))
        );
        assert_eq!(
            raw_rating(&serde_json::json!(2.5), 1).unwrap(),
            Some(RawRating::Number(2.5))
        );
        assert!(raw_rating(&serde_json::json!([1]), 1).is_err());
    }
}

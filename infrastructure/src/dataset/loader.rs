//! Dataset loader for long and wide JSON Lines files
//!
//! Long format has one rating per line:
//! `{"noun": "cat", "property": "size", "property_type": "scale", "rating": 3, "category": "animals"}`
//!
//! Wide format has one entity per line:
//! `{"noun": "cat", "size": 3, "alive": true, "_meta": {"category": "animals"}}`

use super::error::DatasetError;
use super::jsonl::{
    Row, declare_kind, optional_str, parse_rows, raw_rating, read_file, required_str,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};
use twentyq_domain::{AttributeKind, AttributeStore, DomainError, EntityRecord, RawRating};

/// Key holding per-entity metadata in wide files
pub const META_KEY: &str = "_meta";

/// Layout of a dataset file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Decide from the first record
    #[default]
    Auto,
    Long,
    Wide,
}

impl DatasetFormat {
    /// A record with both `property` and `rating` is long format.
    fn detect(rows: &[Row]) -> DatasetFormat {
        match rows.first() {
            Some((_, map)) if map.contains_key("property") && map.contains_key("rating") => {
                DatasetFormat::Long
            }
            _ => DatasetFormat::Wide,
        }
    }
}

impl std::str::FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "long" => Ok(Self::Long),
            "wide" => Ok(Self::Wide),
            other => Err(format!("unknown dataset format: {}", other)),
        }
    }
}

/// Builds an [`AttributeStore`] from a JSON Lines dataset
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    format: DatasetFormat,
}

impl DatasetLoader {
    pub fn new(format: DatasetFormat) -> Self {
        Self { format }
    }

    pub fn load(&self, path: &Path) -> Result<AttributeStore, DatasetError> {
        let content = read_file(path)?;
        let store = self.parse_str(&content)?;
        info!(
            "Loaded {} entities with {} attributes from {}",
            store.len(),
            store.all_attributes().len(),
            path.display()
        );
        Ok(store)
    }

    pub fn parse_str(&self, content: &str) -> Result<AttributeStore, DatasetError> {
        let rows = parse_rows(content)?;
        let format = match self.format {
            DatasetFormat::Auto => DatasetFormat::detect(&rows),
            explicit => explicit,
        };
        debug!("Parsing {} records as {:?} format", rows.len(), format);

        let (records, kinds) = match format {
            DatasetFormat::Long => reshape_long(&rows)?,
            _ => reshape_wide(&rows)?,
        };
        Ok(AttributeStore::build(records, &kinds)?)
    }
}

type Reshaped = (Vec<EntityRecord>, BTreeMap<String, AttributeKind>);

fn reshape_long(rows: &[Row]) -> Result<Reshaped, DatasetError> {
    let mut records: BTreeMap<String, EntityRecord> = BTreeMap::new();
    let mut declared: BTreeMap<String, AttributeKind> = BTreeMap::new();
    let mut properties = BTreeSet::new();

    for (line, map) in rows {
        let line = *line;
        let noun = required_str(map, "noun", line)?;
        let property = required_str(map, "property", line)?;
        let rating = map.get("rating").ok_or(DatasetError::MissingField {
            line,
            field: "rating",
        })?;

        declare_kind(map, &noun, &property, line, &mut declared)?;

        let record = records
            .entry(noun.clone())
            .or_insert_with(|| EntityRecord::new(noun));
        if let Some(category) = optional_str(map, "category") {
            record.category = Some(category);
        }
        // Duplicate (noun, property) rows keep the last rating
        match raw_rating(rating, line)? {
            Some(raw) => {
                record.ratings.insert(property.clone(), raw);
            }
            None => {
                record.ratings.remove(&property);
            }
        }
        properties.insert(property);
    }

    let records: Vec<EntityRecord> = records.into_values().collect();
    let kinds = resolve_kinds(&records, properties, declared)?;
    Ok((records, kinds))
}

fn reshape_wide(rows: &[Row]) -> Result<Reshaped, DatasetError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut properties = BTreeSet::new();

    for (line, map) in rows {
        let line = *line;
        let mut record = EntityRecord::new(required_str(map, "noun", line)?);
        if let Some(meta) = map.get(META_KEY).and_then(|m| m.as_object()) {
            record.category = optional_str(meta, "category");
        }

        for (key, value) in map {
            if key == "noun" || key == META_KEY {
                continue;
            }
            properties.insert(key.clone());
            if let Some(raw) = raw_rating(value, line)? {
                record.ratings.insert(key.clone(), raw);
            }
        }
        records.push(record);
    }

    let kinds = resolve_kinds(&records, properties, BTreeMap::new())?;
    Ok((records, kinds))
}

/// Declared kinds win; the rest are inferred from the recorded values.
///
/// A property with no values anywhere and no declaration is dropped.
fn resolve_kinds(
    records: &[EntityRecord],
    properties: BTreeSet<String>,
    mut declared: BTreeMap<String, AttributeKind>,
) -> Result<BTreeMap<String, AttributeKind>, DatasetError> {
    for property in properties {
        if declared.contains_key(&property) {
            continue;
        }
        let values: Vec<(&str, &RawRating)> = records
            .iter()
            .filter_map(|r| r.ratings.get(&property).map(|raw| (r.name.as_str(), raw)))
            .collect();
        let Some((first_entity, _)) = values.first() else {
            debug!("Dropping property '{}' with no values", property);
            continue;
        };
        let kind = AttributeKind::infer(values.iter().map(|(_, raw)| *raw)).map_err(|reason| {
            DomainError::DatasetInconsistency {
                entity: first_entity.to_string(),
                attribute: property.clone(),
                reason,
            }
        })?;
        declared.insert(property, kind);
    }
    Ok(declared)
}

//! Dataset loading
//!
//! Reads person and relation exports (JSON arrays), applies manual overrides
//! and builds the person graph.

use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::algorithm::graph_builder::{GraphBuilder, LoadReport};
use crate::collections::PersonRegistry;
use crate::error::util::open_file;
use crate::error::{Result, StemmaError};
use crate::models::lenient::value_as_i64;
use crate::models::person::{PersonRecord, RelationRecord};
use crate::utils::logging::{log_read_complete, log_read_start, log_warning};

/// Paths of the files making up a dataset
#[derive(Debug, Clone, Copy)]
pub struct DatasetPaths<'p> {
    /// Person records
    pub people: &'p Path,
    /// Relation records, if kept in a separate file
    pub relations: Option<&'p Path>,
    /// Manual overrides of person fields
    pub overrides: Option<&'p Path>,
}

impl<'p> DatasetPaths<'p> {
    /// Dataset consisting of a single person file
    #[must_use]
    pub const fn new(people: &'p Path) -> Self {
        Self {
            people,
            relations: None,
            overrides: None,
        }
    }

    /// Set the relation file
    #[must_use]
    pub const fn with_relations(mut self, relations: Option<&'p Path>) -> Self {
        self.relations = relations;
        self
    }

    /// Set the overrides file
    #[must_use]
    pub const fn with_overrides(mut self, overrides: Option<&'p Path>) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Read a JSON file holding an array of objects
pub fn read_json_array(path: &Path, purpose: &str) -> Result<Vec<Value>> {
    let file = open_file(path, purpose)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(StemmaError::invalid_record(format!(
            "{} must contain a JSON array, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Replace fields of person records with manual overrides
///
/// Each override is an object with an `id` and the fields to replace. Field
/// values may be plain or wrapped as `{"value": ...}`. Returns the number of
/// records changed.
pub fn apply_overrides(records: &mut [Value], overrides: &[Value]) -> usize {
    let mut by_id: FxHashMap<i64, Map<String, Value>> = FxHashMap::default();
    for entry in overrides {
        let Some(object) = entry.as_object() else {
            log::warn!("Ignoring override that is not an object");
            continue;
        };
        let Some(id) = object.get("id").and_then(value_as_i64) else {
            log::warn!("Ignoring override without an id");
            continue;
        };
        let fields = by_id.entry(id).or_default();
        for (key, value) in object.iter().filter(|(key, _)| *key != "id") {
            fields.insert(key.clone(), unwrap_value(value));
        }
    }

    let mut applied = 0;
    for record in records.iter_mut() {
        let Some(id) = record.get("id").and_then(value_as_i64) else {
            continue;
        };
        let Some(fields) = by_id.remove(&id) else {
            continue;
        };
        if let Some(object) = record.as_object_mut() {
            object.extend(fields);
            applied += 1;
        }
    }

    for id in by_id.keys() {
        log::warn!("Override for unknown person {id} ignored");
    }
    applied
}

fn unwrap_value(value: &Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 && map.contains_key("value") => {
            map.get("value").cloned().unwrap_or(Value::Null)
        }
        other => other.clone(),
    }
}

/// Deserialize records one by one, skipping and logging the bad ones
pub fn parse_records<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> (Vec<T>, usize) {
    let mut skipped = 0;
    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping {kind} record #{position}: {e}");
                skipped += 1;
                None
            }
        })
        .collect();
    (records, skipped)
}

/// Load person records, applying overrides when given
pub fn load_people(path: &Path, overrides: Option<&Path>) -> Result<(Vec<PersonRecord>, usize)> {
    let start = Instant::now();
    log_read_start("person records", path);
    let mut values = read_json_array(path, "person records")?;

    if let Some(overrides_path) = overrides {
        let overrides = read_json_array(overrides_path, "person overrides")?;
        let applied = apply_overrides(&mut values, &overrides);
        log::info!("Applied {applied} manual overrides from {}", overrides_path.display());
    }

    let (records, skipped) = parse_records(values, "person");
    log_read_complete("person records", path, records.len(), skipped, Some(start.elapsed()));
    Ok((records, skipped))
}

/// Load relation records
pub fn load_relations(path: &Path) -> Result<(Vec<RelationRecord>, usize)> {
    log_read_start("relation records", path);
    let values = read_json_array(path, "relation records")?;
    let (records, skipped) = parse_records(values, "relation");
    log_read_complete("relation records", path, records.len(), skipped, None);
    Ok((records, skipped))
}

/// Load a full dataset into a registry
pub fn load_dataset(paths: DatasetPaths<'_>) -> Result<(PersonRegistry, LoadReport)> {
    let (people, people_skipped) = load_people(paths.people, paths.overrides)?;
    let (relations, relations_skipped) = match paths.relations {
        Some(path) => load_relations(path)?,
        None => (Vec::new(), 0),
    };

    let mut builder = GraphBuilder::new();
    builder.add_people(&people);
    builder.add_relations(&relations);
    let (registry, mut report) = builder.build();
    report.persons_skipped += people_skipped;
    report.relations_skipped += relations_skipped;

    if registry.is_empty() {
        log_warning("No persons loaded", Some(paths.people));
    }
    Ok((registry, report))
}

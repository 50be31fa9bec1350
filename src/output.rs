//! Presenter output
//!
//! Lookup tables for the visualization front-ends and the writers for the
//! generated JSON and JavaScript data files.

use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value, json};

use crate::algorithm::aggregate::FuneralReport;
use crate::algorithm::family_tree::{FamilyForest, FamilyTree};
use crate::collections::PersonRegistry;
use crate::error::Result;
use crate::error::util::create_file;
use crate::models::types::{CertaintyModel, PersonId};

/// Header line of every generated JavaScript file
pub const GENERATED_HEADER: &str = "// File automatically generated by stemma.";

/// Entry of the person autocomplete list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteEntry {
    /// `"<name>, d. <death>"`
    pub value: String,
    /// Person identifier
    pub id: PersonId,
}

/// Entry of the gens selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GensEntry {
    /// Nomen
    pub value: String,
    /// Nomen, used as the option id
    pub id: String,
}

/// Autocomplete entries for every real person, in load order
#[must_use]
pub fn autocomplete(registry: &PersonRegistry) -> Vec<AutocompleteEntry> {
    registry
        .iter()
        .filter(|person| !person.id.is_placeholder())
        .map(|person| AutocompleteEntry {
            value: person.lookup_label(),
            id: person.id,
        })
        .collect()
}

/// Sorted, unique nomina
#[must_use]
pub fn gens_lookup(registry: &PersonRegistry) -> Vec<GensEntry> {
    registry
        .iter()
        .filter_map(|person| person.nomen.as_deref())
        .unique()
        .sorted_unstable()
        .map(|nomen| GensEntry {
            value: nomen.to_string(),
            id: nomen.to_string(),
        })
        .collect()
}

/// Serialize a value as JSON indented with four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, value)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Write a value to a JSON file
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = create_file(path, "JSON output")?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// JavaScript constant name holding a model's funeral data
#[must_use]
pub const fn funeral_constant(model: CertaintyModel) -> &'static str {
    match model {
        CertaintyModel::Conservative => "conservativeFuneralData",
        CertaintyModel::Aggressive => "aggressiveFuneralData",
        CertaintyModel::Hyperaggressive => "hyperaggressiveFuneralData",
    }
}

/// Write the funeral data file
///
/// The file declares one constant per report followed by `autocompleteJSON`
/// and `gensJSON`.
pub fn write_funeral_data<W: Write>(
    writer: &mut W,
    reports: &[FuneralReport],
    registry: &PersonRegistry,
) -> Result<()> {
    writeln!(writer, "{GENERATED_HEADER}")?;
    for report in reports {
        write_constant(writer, funeral_constant(report.model), report)?;
    }
    write_constant(writer, "autocompleteJSON", &autocomplete(registry))?;
    write_constant(writer, "gensJSON", &gens_lookup(registry))?;
    Ok(())
}

/// Write the funeral data file to disk
pub fn write_funeral_data_file(
    path: &Path,
    reports: &[FuneralReport],
    registry: &PersonRegistry,
) -> Result<()> {
    let file = create_file(path, "funeral data file")?;
    let mut writer = BufWriter::new(file);
    write_funeral_data(&mut writer, reports, registry)?;
    writer.flush()?;
    Ok(())
}

/// File name of the data file holding one family tree
#[must_use]
pub fn family_tree_file_name(tree: &FamilyTree) -> String {
    format!("roman_data_{}.js", tree.start)
}

/// Write one `roman_data_<start>.js` file per family tree plus `all_people.js`
///
/// Tree files assign a compact JSON object to `data`. The index file maps
/// every real person to the name and file of their tree (`people_mapping`)
/// and carries the autocomplete list (`peopleJSON`). Returns the number of
/// files written.
pub fn write_family_tree_files(dir: &Path, forest: &FamilyForest) -> Result<usize> {
    for tree in &forest.trees {
        let path = dir.join(family_tree_file_name(tree));
        let mut writer = BufWriter::new(create_file(&path, "family tree data")?);
        write!(writer, "data = ")?;
        serde_json::to_writer(&mut writer, tree)?;
        writer.flush()?;
    }

    let mapping: Map<String, Value> = forest
        .people_mapping
        .iter()
        .map(|entry| {
            (
                entry.id.clone(),
                json!({
                    "name": entry.name,
                    "filename": format!("data/roman_data_{}.js", entry.tree),
                }),
            )
        })
        .collect();

    let path = dir.join("all_people.js");
    let mut writer = BufWriter::new(create_file(&path, "family tree index")?);
    write!(writer, "people_mapping = ")?;
    serde_json::to_writer(&mut writer, &mapping)?;
    write!(writer, ";\npeopleJSON = ")?;
    serde_json::to_writer(&mut writer, &forest.autocomplete)?;
    writeln!(writer, ";")?;
    writer.flush()?;

    Ok(forest.trees.len() + 1)
}

fn write_constant<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    name: &str,
    value: &T,
) -> Result<()> {
    write!(writer, "\nconst {name} =\n")?;
    write_pretty(&mut *writer, value)?;
    writeln!(writer, ";")?;
    Ok(())
}

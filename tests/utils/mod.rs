//! Shared fixtures for the integration tests

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use stemma::algorithm::graph_builder::build_graph;
use stemma::{PersonRecord, PersonRegistry, RelationRecord, RelationType};

/// Build a person record with nomen, cognomen, years and office
pub fn record(
    id: i64,
    name: &str,
    cognomen: Option<&str>,
    years: (i32, Option<i32>),
    office: Option<&str>,
) -> PersonRecord {
    let mut record = PersonRecord::new(id, name);
    record.nomen = name.split_whitespace().nth(1).map(str::to_string);
    record.cognomen = cognomen.map(str::to_string);
    record.gender = Some("male".to_string());
    record.birth = Some(years.0);
    record.death = years.1;
    record.best_office = office.map(str::to_string);
    record
}

/// Scipiones, a Lentulus and the Gracchi
///
/// 1 → 2 → 3 → 4 is an attested chain; 5 and 6 have no recorded father;
/// 7 is the daughter of 4 and wife of 8, the father of 9.
pub fn scipio_records() -> (Vec<PersonRecord>, Vec<RelationRecord>) {
    let mut people = vec![
        record(1, "L. Cornelius Scipio Barbatus", Some("Scipio"), (-337, Some(-270)), Some("cos. 298")),
        record(2, "L. Cornelius Scipio", Some("Scipio"), (-300, Some(-230)), Some("cos. 259")),
        record(3, "P. Cornelius Scipio", Some("Scipio"), (-270, Some(-211)), Some("cos. 218")),
        record(4, "P. Cornelius Scipio Africanus", Some("Scipio"), (-236, Some(-183)), Some("cos. 205")),
        record(5, "Cn. Cornelius Scipio Hispallus", Some("Scipio"), (-220, Some(-176)), Some("cos. 176")),
        record(6, "P. Cornelius Lentulus", Some("Lentulus"), (-250, Some(-200)), Some("pr. 214")),
        record(8, "Ti. Sempronius Gracchus", Some("Gracchus"), (-217, Some(-154)), Some("cens. 169")),
        record(9, "Ti. Sempronius Gracchus", Some("Gracchus"), (-163, Some(-133)), None),
    ];
    people[1].father_id = Some(1);
    people[2].father_id = Some(2);
    people[3].father_id = Some(3);
    people[7].father_id = Some(8);

    let mut cornelia = PersonRecord::new(7, "Cornelia");
    cornelia.nomen = Some("Cornelia".to_string());
    cornelia.gender = Some("female".to_string());
    cornelia.birth = Some(-190);
    people.insert(6, cornelia);

    let relations = vec![
        RelationRecord::new(4, 7, RelationType::Daughter, true),
        RelationRecord::new(8, 7, RelationType::Spouse, true),
        RelationRecord::new(7, 8, RelationType::Spouse, true),
        RelationRecord::new(7, 9, RelationType::Son, true),
    ];
    (people, relations)
}

/// Registry built from [`scipio_records`]
pub fn scipio_registry() -> PersonRegistry {
    let (people, relations) = scipio_records();
    build_graph(&people, &relations).0
}

/// The same dataset as raw export rows, with string-typed numbers
pub fn scipio_people_json() -> Value {
    json!([
        {"id": "1", "name": "L. Cornelius Scipio Barbatus", "nomen": "Cornelius", "cognomen": "Scipio",
         "gender": "male", "birth": "-337", "death": "-270", "bestOffice": "cos. 298"},
        {"id": "2", "name": "L. Cornelius Scipio", "nomen": "Cornelius", "cognomen": "Scipio",
         "gender": "male", "birth": "-300", "death": "-230", "bestOffice": "cos. 259", "fatherID": "1"},
        {"id": "3", "name": "P. Cornelius Scipio", "nomen": "Cornelius", "cognomen": "Scipio",
         "gender": "male", "birth": -270, "death": -211, "bestOffice": "cos. 218", "fatherID": 2},
        {"id": 4, "name": "P. Cornelius Scipio Africanus", "nomen": "Cornelius", "cognomen": "Scipio",
         "gender": "male", "birth": -236, "death": -183, "bestOffice": "cos. 205", "fatherID": 3},
        {"id": 5, "name": "Cn. Cornelius Scipio Hispallus", "nomen": "Cornelius", "cognomen": "Scipio",
         "gender": "male", "birth": -220, "death": -176, "bestOffice": "cos. 176"},
        {"name": "record without an id"}
    ])
}

/// Write a JSON value to `dir/name` and return the path
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

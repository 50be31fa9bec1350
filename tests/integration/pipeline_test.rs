//! End-to-end runs over files on disk

use serde_json::json;
use stemma::output::write_funeral_data_file;
use stemma::{
    AncestryEngine, CertaintyModel, DatasetPaths, FamilyTreeBuilder, InferenceConfig,
    LineageAggregator, Office, PersonId, RelationType, StemmaConfig, StemmaError, load_dataset,
    write_family_tree_files,
};

use crate::utils::{scipio_people_json, write_json};

#[test]
fn test_load_dataset_with_overrides_and_relations() {
    let dir = tempfile::tempdir().unwrap();
    let people = write_json(dir.path(), "people.json", &scipio_people_json());
    let overrides = write_json(
        dir.path(),
        "overrides.json",
        &json!([
            {"id": 5, "death": {"value": "-150"}},
            {"id": "3", "bestOffice": "cens. 199"},
            {"id": 77, "name": {"value": "Nobody"}}
        ]),
    );
    let relations = write_json(
        dir.path(),
        "relations.json",
        &json!([
            {"aboutPersonId": 1, "relatedPersonId": 2, "type": "son"},
            {"aboutPersonId": "4", "relatedPersonId": 99, "type": "son"},
            {"aboutPersonId": 4, "relatedPersonId": 5, "type": "cousin"},
            {"relatedPersonId": 5}
        ]),
    );

    let paths = DatasetPaths::new(&people)
        .with_relations(Some(&relations))
        .with_overrides(Some(&overrides));
    let (registry, report) = load_dataset(paths).unwrap();

    assert_eq!(report.persons_loaded, 5);
    assert_eq!(report.persons_skipped, 1);
    assert_eq!(report.relations_linked, 4);
    assert_eq!(report.relations_dropped, 1);
    assert_eq!(report.relations_skipped, 2);

    assert_eq!(registry.get(PersonId(5)).unwrap().death, Some(-150));
    assert_eq!(registry.get(PersonId(3)).unwrap().best_office, Some(Office::Censor));
    let father = registry.get(PersonId(2)).unwrap().relation(RelationType::Father).unwrap();
    assert_eq!(father.target, PersonId(1));
    assert!(father.certain);
    assert!(registry.get(PersonId(1)).unwrap().has_relation(RelationType::Son, PersonId(2)));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let result = load_dataset(DatasetPaths::new(&missing));
    match result {
        Err(StemmaError::FileIo { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a file error, got {other:?}"),
    }
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(
        dir.path(),
        "stemma.json",
        &json!({"inference": {"min_generation_gap": 30}, "show_progress": true}),
    );
    let config = StemmaConfig::from_json_file(&path).unwrap();
    assert_eq!(config.inference.min_generation_gap, 30);
    assert_eq!(config.inference.stop_ids, InferenceConfig::default().stop_ids);
    assert_eq!(config.periods.period_width, 25);
    assert!(config.show_progress);

    let bad = write_json(dir.path(), "bad.json", &json!({"periods": {"period_width": 0}}));
    assert!(matches!(
        StemmaConfig::from_json_file(&bad),
        Err(StemmaError::Config(_))
    ));
}

#[test]
fn test_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let people = write_json(dir.path(), "people.json", &scipio_people_json());
    let (mut registry, _) = load_dataset(DatasetPaths::new(&people)).unwrap();
    let config = StemmaConfig::default();

    let engine = AncestryEngine::new(&registry, config.inference.clone());
    let reports = LineageAggregator::new(&engine, config.periods).aggregate_all();
    let lineage = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(5));
    assert_eq!(lineage.ids(), vec![PersonId(5), PersonId(3), PersonId(2), PersonId(1)]);

    let funerals = dir.path().join("out").join("funeralData.js");
    write_funeral_data_file(&funerals, &reports, &registry).unwrap();
    let text = std::fs::read_to_string(&funerals).unwrap();
    assert!(text.contains("const conservativeFuneralData ="));
    assert!(text.contains("const hyperaggressiveFuneralData ="));
    assert!(text.contains("\"timePeriod\": \"275–251 BCE\""));

    let forest = FamilyTreeBuilder::new(&mut registry, config.family_tree).build();
    let trees = dir.path().join("trees");
    std::fs::create_dir_all(&trees).unwrap();
    let written = write_family_tree_files(&trees, &forest).unwrap();
    assert_eq!(written, forest.trees.len() + 1);
    assert!(trees.join("all_people.js").exists());
    assert!(trees.join("roman_data_1.js").exists());
}

//! Tests for the ancestor inference engine

use stemma::algorithm::graph_builder::build_graph;
use stemma::{
    AncestryEngine, CertaintyModel, InferenceConfig, PersonId, PersonRecord, Provenance,
    RelationRecord, RelationType,
};

use crate::utils::{record, scipio_records, scipio_registry};

fn ids(values: &[i64]) -> Vec<PersonId> {
    values.iter().copied().map(PersonId).collect()
}

#[test]
fn test_attested_chain_under_every_model() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    for model in CertaintyModel::ALL {
        let lineage = engine.resolve_ancestry(model, PersonId(4));
        assert_eq!(lineage.ids(), ids(&[4, 3, 2, 1]), "{model}");
        assert_eq!(lineage.nodes[1].provenance, Provenance::Attested);
        assert!(!lineage.has_guess());
        assert_eq!(lineage.render_compact(), "consul consul consul consul");
    }
}

#[test]
fn test_conservative_never_guesses() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    for person in registry.iter() {
        let lineage = engine.resolve_ancestry(CertaintyModel::Conservative, person.id);
        assert!(!lineage.has_guess(), "person {}", person.id);
    }
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Conservative, PersonId(5)).ids(),
        ids(&[5])
    );
}

#[test]
fn test_aggressive_guesses_by_cognomen() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let lineage = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(5));
    assert_eq!(lineage.ids(), ids(&[5, 3, 2, 1]));
    assert_eq!(lineage.nodes[1].provenance, Provenance::CognomenGuess);
    assert_eq!(lineage.nodes[2].provenance, Provenance::Attested);

    // No Lentulus is old enough, and Aggressive ignores nomen-only matches
    let lentulus = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(6));
    assert_eq!(lentulus.ids(), ids(&[6]));
}

#[test]
fn test_hyperaggressive_falls_back_to_nomen() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let lineage = engine.resolve_ancestry(CertaintyModel::Hyperaggressive, PersonId(6));
    assert_eq!(lineage.ids(), ids(&[6, 2, 1]));
    assert_eq!(lineage.nodes[1].provenance, Provenance::NomenGuess);
    assert_eq!(
        lineage.render_verbose(),
        "\tP. Cornelius Lentulus praetor\n\
         \t(Nomen guess)\tL. Cornelius Scipio consul\n\
         \tL. Cornelius Scipio Barbatus consul"
    );
}

#[test]
fn test_cognomen_match_beats_younger_nomen_match() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    // Lentulus (born -250) is the latest-born eligible Cornelius, but the
    // Scipio born -270 shares the cognomen
    let lineage = engine.resolve_ancestry(CertaintyModel::Hyperaggressive, PersonId(5));
    assert_eq!(lineage.ids(), ids(&[5, 3, 2, 1]));
    assert_eq!(lineage.nodes[1].provenance, Provenance::CognomenGuess);
}

#[test]
fn test_generation_gap_is_inclusive() {
    let (mut people, relations) = scipio_records();
    // Exactly 22 years younger than P. Cornelius Scipio (3)
    people.push(record(10, "M. Cornelius Scipio", Some("Scipio"), (-248, Some(-190)), Some("pr. 210")));
    let (registry, _) = build_graph(&people, &relations);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let lineage = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(10));
    assert_eq!(lineage.ids(), ids(&[10, 3, 2, 1]));
    assert_eq!(lineage.nodes[1].provenance, Provenance::CognomenGuess);

    let fabii = [
        record(1, "Q. Fabius Maximus", Some("Maximus"), (-300, None), Some("cos. 233")),
        record(2, "Q. Fabius Maximus", Some("Maximus"), (-278, None), Some("cos. 213")),
        record(3, "Q. Fabius Maximus", Some("Maximus"), (-257, None), Some("cos. 181")),
    ];
    let (registry, _) = build_graph(&fabii, &[]);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(2)).ids(),
        ids(&[2, 1])
    );
    // 21 years is one short
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(3)).ids(),
        ids(&[3, 1])
    );

    let wider = InferenceConfig::builder().min_generation_gap(60).build();
    let engine = AncestryEngine::new(&registry, wider);
    let lineage = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(10));
    assert_eq!(lineage.ids(), ids(&[10, 1]));
}

#[test]
fn test_extreme_birth_years() {
    let people = [
        record(1, "Q. Fabius Maximus", Some("Maximus"), (-2_000_000_000, None), Some("cos. 233")),
        record(2, "Q. Fabius Maximus", Some("Maximus"), (2_000_000_000, None), None),
        record(3, "Q. Fabius Pictor", Some("Pictor"), (i32::MIN, None), None),
        record(4, "N. Fabius Pictor", Some("Pictor"), (i32::MAX, None), None),
    ];
    let (registry, _) = build_graph(&people, &[]);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(2)).ids(),
        ids(&[2, 1])
    );
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(1)).ids(),
        ids(&[1])
    );
    let pictor = engine.resolve_ancestry(CertaintyModel::Hyperaggressive, PersonId(4));
    assert_eq!(pictor.nodes[0].id, PersonId(4));
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Hyperaggressive, PersonId(3)).ids(),
        ids(&[3])
    );
}

#[test]
fn test_stop_ids_and_exclusions() {
    let registry = scipio_registry();

    let stopped = InferenceConfig::builder().stop_ids([5]).build();
    let engine = AncestryEngine::new(&registry, stopped);
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Hyperaggressive, PersonId(5)).ids(),
        ids(&[5])
    );

    let excluded = InferenceConfig::builder().exclude(5, 3).build();
    let engine = AncestryEngine::new(&registry, excluded);
    assert_eq!(
        engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(5)).ids(),
        ids(&[5, 2, 1])
    );
}

#[test]
fn test_certain_grandfather_beats_uncertain_father() {
    let mut son = record(3, "C. Fabius Pictor", Some("Pictor"), (-250, Some(-190)), Some("pr. 200"));
    son.father_id = Some(2);
    son.father_is_uncertain = Some(true);
    son.grandfather_id = Some(1);
    let people = vec![
        record(1, "C. Fabius Ambustus", Some("Ambustus"), (-320, Some(-260)), Some("cos. 290")),
        record(2, "N. Fabius Pictor", Some("Pictor"), (-285, Some(-230)), Some("cos. 266")),
        son,
    ];
    let (registry, _) = build_graph(&people, &[]);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let conservative = engine.resolve_ancestry(CertaintyModel::Conservative, PersonId(3));
    assert_eq!(conservative.ids(), ids(&[3, 2]));
    assert_eq!(conservative.nodes[1].provenance, Provenance::AttestedUncertain);

    let aggressive = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(3));
    assert_eq!(aggressive.ids(), ids(&[3, 1]));
    assert_eq!(aggressive.nodes[1].provenance, Provenance::Grandfather);
}

#[test]
fn test_ancestors_without_office_are_walked_but_not_emitted() {
    let mut people = vec![
        record(1, "Q. Fabius Vibulanus", Some("Vibulanus"), (-520, Some(-470)), Some("cos. 485")),
        record(2, "M. Fabius Vibulanus", Some("Vibulanus"), (-490, Some(-440)), None),
        record(3, "Q. Fabius Vibulanus", Some("Vibulanus"), (-460, Some(-410)), Some("cos. 423")),
    ];
    people[1].father_id = Some(1);
    people[2].father_id = Some(2);
    let (registry, _) = build_graph(&people, &[]);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let lineage = engine.resolve_ancestry(CertaintyModel::Conservative, PersonId(3));
    assert_eq!(lineage.ids(), ids(&[3, 1]));

    // The subject is emitted even without office
    let lineage = engine.resolve_ancestry(CertaintyModel::Conservative, PersonId(2));
    assert_eq!(lineage.ids(), ids(&[2, 1]));
}

#[test]
fn test_cycles_terminate() {
    let mut people = vec![
        record(20, "A. Postumius Albus", Some("Albus"), (-500, Some(-450)), Some("cos. 464")),
        record(21, "Sp. Postumius Albus", Some("Albus"), (-480, Some(-430)), Some("cos. 466")),
    ];
    people[0].father_id = Some(21);
    people[1].father_id = Some(20);
    let (registry, _) = build_graph(&people, &[]);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    for model in CertaintyModel::ALL {
        let lineage = engine.resolve_ancestry(model, PersonId(20));
        assert_eq!(lineage.ids(), ids(&[20, 21]));
        assert_eq!(lineage.cycle_at, Some(PersonId(20)));
    }
}

#[test]
fn test_unknown_person_gives_empty_lineage() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let lineage = engine.resolve_ancestry(CertaintyModel::Aggressive, PersonId(404));
    assert!(lineage.is_empty());
}

#[test]
fn test_next_link_for_daughter_relation_only() {
    // A daughter relation on the father does not give the daughter a father link
    let people = vec![PersonRecord::new(1, "Cn. Domitius"), PersonRecord::new(2, "Domitia")];
    let relations = vec![RelationRecord::new(1, 2, RelationType::Daughter, true)];
    let (registry, _) = build_graph(&people, &relations);
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let daughter = registry.get(PersonId(2)).unwrap();
    assert_eq!(engine.next_link(CertaintyModel::Conservative, daughter), None);
}

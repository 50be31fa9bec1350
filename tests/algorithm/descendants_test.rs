//! Tests for descendant trees

use stemma::{AncestryEngine, CertaintyModel, DescendantForest, InferenceConfig, PersonId, Provenance};

use crate::utils::scipio_registry;

fn roots(forest: &DescendantForest) -> Vec<i64> {
    forest.trees.iter().map(|tree| tree.root.id.get()).collect()
}

#[test]
fn test_conservative_forest() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let forest = DescendantForest::build(&engine, CertaintyModel::Conservative);

    assert_eq!(roots(&forest), vec![1, 5, 6, 7, 8]);
    assert_eq!(forest.tree(PersonId(1)).unwrap().height(), 4);
    assert_eq!(forest.tree(PersonId(8)).unwrap().height(), 2);
    assert_eq!(forest.tree(PersonId(7)).unwrap().height(), 1);
    assert_eq!(forest.branching(2).count(), 2);
}

#[test]
fn test_guessed_children_follow_the_model() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    let aggressive = DescendantForest::build(&engine, CertaintyModel::Aggressive);
    assert_eq!(roots(&aggressive), vec![1, 6, 7, 8]);
    let scipio = &aggressive.tree(PersonId(1)).unwrap().root.children[0].children[0];
    let children: Vec<i64> = scipio.children.iter().map(|c| c.id.get()).collect();
    assert_eq!(children, vec![4, 5]);
    let hispallus = &scipio.children[1];
    assert_eq!(hispallus.closest_ancestor.unwrap().link, Provenance::CognomenGuess);

    let hyper = DescendantForest::build(&engine, CertaintyModel::Hyperaggressive);
    assert_eq!(roots(&hyper), vec![1, 7, 8]);
    let lucius = &hyper.tree(PersonId(1)).unwrap().root.children[0];
    let children: Vec<i64> = lucius.children.iter().map(|c| c.id.get()).collect();
    assert_eq!(children, vec![3, 6]);
}

#[test]
fn test_every_person_in_exactly_one_tree() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());

    for model in CertaintyModel::ALL {
        let forest = DescendantForest::build(&engine, model);
        let total: usize = forest.trees.iter().map(|tree| tree.root.size()).sum();
        assert_eq!(total, registry.len(), "{model}");
    }
}

//! Structural properties checked over seeded synthetic populations

use rustc_hash::FxHashSet;
use stemma::algorithm::graph_builder::build_graph;
use stemma::utils::test::SyntheticPopulation;
use stemma::{
    AncestryEngine, CertaintyModel, DescendantForest, FamilyTreeBuilder, FamilyTreeConfig,
    InferenceConfig, LineageAggregator, NetworkBuilder, NetworkScope, PeriodConfig, PersonId,
    PersonRegistry,
};

const SEEDS: [u64; 4] = [1, 7, 42, 2024];

fn population(seed: u64) -> PersonRegistry {
    let data = SyntheticPopulation::seeded(seed).generate();
    let (registry, report) = build_graph(&data.people, &data.relations);
    assert_eq!(report.persons_skipped, 0);
    assert_eq!(report.relations_skipped, 0);
    registry
}

#[test]
fn test_lineages_are_well_formed() {
    for seed in SEEDS {
        let registry = population(seed);
        let engine = AncestryEngine::new(&registry, InferenceConfig::default());

        for person in registry.iter() {
            for model in CertaintyModel::ALL {
                let lineage = engine.resolve_ancestry(model, person.id);
                assert_eq!(lineage.nodes[0].id, person.id);
                assert!(lineage.cycle_at.is_none());

                let unique: FxHashSet<PersonId> = lineage.ids().into_iter().collect();
                assert_eq!(unique.len(), lineage.len());

                // Every link points to an older person
                let births: Vec<i32> = lineage.nodes.iter().filter_map(|n| n.birth).collect();
                assert!(births.windows(2).all(|pair| pair[1] < pair[0]), "seed {seed}");
            }
        }
    }
}

#[test]
fn test_models_extend_each_other() {
    for seed in SEEDS {
        let registry = population(seed);
        let engine = AncestryEngine::new(&registry, InferenceConfig::default());

        for person in registry.iter() {
            let conservative = engine.resolve_ancestry(CertaintyModel::Conservative, person.id);
            let aggressive = engine.resolve_ancestry(CertaintyModel::Aggressive, person.id);
            let hyper = engine.resolve_ancestry(CertaintyModel::Hyperaggressive, person.id);

            assert!(!conservative.has_guess());
            assert!(aggressive.ids().starts_with(&conservative.ids()), "seed {seed}");
            assert!(hyper.ids().starts_with(&aggressive.ids()), "seed {seed}");
        }
    }
}

#[test]
fn test_aggregation_accounts_for_every_death() {
    for seed in SEEDS {
        let registry = population(seed);
        let engine = AncestryEngine::new(&registry, InferenceConfig::default());
        let periods = PeriodConfig::default();
        let expected = registry
            .iter()
            .filter(|person| person.death.is_some_and(|death| !periods.is_after_final(death)))
            .count();

        for report in LineageAggregator::new(&engine, periods).aggregate_all() {
            assert_eq!(report.funeral_count(), expected);
            for period in &report.periods {
                assert!(period.funerals.windows(2).all(|pair| pair[0].len() >= pair[1].len()));
            }
        }
    }
}

#[test]
fn test_trees_partition_the_population() {
    for seed in SEEDS {
        let mut registry = population(seed);
        let engine = AncestryEngine::new(&registry, InferenceConfig::default());
        for model in CertaintyModel::ALL {
            let forest = DescendantForest::build(&engine, model);
            let total: usize = forest.trees.iter().map(|tree| tree.root.size()).sum();
            assert_eq!(total, registry.len());
        }

        let graphs = NetworkBuilder::new(&registry).components(NetworkScope::WithSpouses);
        let covered: FxHashSet<PersonId> = graphs
            .iter()
            .flat_map(|graph| graph.nodes.iter().map(|node| node.id))
            .collect();
        assert_eq!(covered.len(), registry.len());

        let real = registry.len();
        let config = FamilyTreeConfig {
            max_birth_year: None,
        };
        let forest = FamilyTreeBuilder::new(&mut registry, config).build();
        assert_eq!(forest.people_mapping.len(), real);
        let persons: usize = forest.trees.iter().map(|tree| tree.persons.len()).sum();
        assert_eq!(persons, real + forest.placeholders);
    }
}

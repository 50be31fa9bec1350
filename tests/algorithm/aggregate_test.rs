//! Tests for death-period aggregation and the funeral data file

use serde_json::Value;
use stemma::output::write_funeral_data;
use stemma::{
    AncestryEngine, CertaintyModel, InferenceConfig, LineageAggregator, LineageNode,
    PeriodConfig, PersonId,
};

use crate::utils::scipio_registry;

#[test]
fn test_periods_follow_death_years() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let report = LineageAggregator::new(&engine, PeriodConfig::default())
        .aggregate(CertaintyModel::Conservative);

    let labels: Vec<&str> = report.periods.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "275–251 BCE",
            "250–226 BCE",
            "225–201 BCE",
            "200–176 BCE",
            "175–151 BCE",
            "150–126 BCE",
        ]
    );
    // Cornelia has no recorded death
    assert_eq!(report.funeral_count(), 8);

    for period in &report.periods {
        for lineage in &period.funerals {
            let death = registry.get(lineage.subject).unwrap().death.unwrap();
            assert!(period.start <= death && death <= period.end);
        }
    }
}

#[test]
fn test_longest_lineages_first() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let aggregator = LineageAggregator::new(&engine, PeriodConfig::default());

    // Deaths -200 (6), -183 (4), -176 (5)
    let conservative = aggregator.aggregate(CertaintyModel::Conservative);
    let subjects: Vec<PersonId> = conservative.periods[3].funerals.iter().map(|l| l.subject).collect();
    assert_eq!(subjects, vec![PersonId(4), PersonId(6), PersonId(5)]);

    // Equal lengths keep death order
    let aggressive = aggregator.aggregate(CertaintyModel::Aggressive);
    let subjects: Vec<PersonId> = aggressive.periods[3].funerals.iter().map(|l| l.subject).collect();
    assert_eq!(subjects, vec![PersonId(4), PersonId(5), PersonId(6)]);
}

#[test]
fn test_final_year_and_early_deaths() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let periods = PeriodConfig {
        start_year: -250,
        final_year: Some(-180),
        period_width: 50,
    };
    let report = LineageAggregator::new(&engine, periods).aggregate(CertaintyModel::Conservative);

    // Deaths before the start year land in the first period
    assert_eq!(report.periods[0].label, "250–201 BCE");
    let first: Vec<PersonId> = report.periods[0].funerals.iter().map(|l| l.subject).collect();
    assert_eq!(first.len(), 3);
    assert!(first.contains(&PersonId(1)));
    // -176 and later are dropped
    assert_eq!(report.funeral_count(), 5);
}

#[test]
fn test_funeral_data_round_trip() {
    let registry = scipio_registry();
    let engine = AncestryEngine::new(&registry, InferenceConfig::default());
    let reports = LineageAggregator::new(&engine, PeriodConfig::default()).aggregate_all();
    assert_eq!(reports.len(), 3);

    let mut out = Vec::new();
    write_funeral_data(&mut out, &reports, &registry).unwrap();
    let text = String::from_utf8(out).unwrap();

    for report in &reports {
        let constant = stemma::output::funeral_constant(report.model);
        let value = constant_value(&text, constant);
        let periods = value["timePeriods"].as_array().unwrap();
        assert_eq!(periods.len(), report.periods.len());

        for (json, period) in periods.iter().zip(&report.periods) {
            assert_eq!(json["timePeriod"], period.label.as_str());
            let funerals: Vec<Vec<LineageNode>> =
                serde_json::from_value(json["funerals"].clone()).unwrap();
            let expected: Vec<Vec<LineageNode>> =
                period.funerals.iter().map(|l| l.nodes.clone()).collect();
            assert_eq!(funerals, expected);
        }
    }

    let autocomplete = constant_value(&text, "autocompleteJSON");
    assert_eq!(autocomplete.as_array().unwrap().len(), 9);
    assert_eq!(autocomplete[6]["value"], "Cornelia, d. ?");

    let gens = constant_value(&text, "gensJSON");
    assert_eq!(gens[0]["value"], "Cornelia");
    assert_eq!(gens[1]["id"], "Cornelius");
}

fn constant_value(text: &str, name: &str) -> Value {
    let marker = format!("const {name} =\n");
    let start = text.find(&marker).unwrap() + marker.len();
    let rest = &text[start..];
    let end = rest.find("\nconst ").unwrap_or(rest.len());
    serde_json::from_str(rest[..end].trim().trim_end_matches(';')).unwrap()
}

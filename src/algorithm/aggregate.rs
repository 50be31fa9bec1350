//! Lineage aggregation
//!
//! Groups the lineage of every person by the period of their death, the shape
//! consumed by the funeral visualizations:
//!
//! ```json
//! {"timePeriods": [{"timePeriod": "600–576 BCE", "funerals": [[node, ...], ...]}]}
//! ```

use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::inference::{AncestryEngine, Lineage};
use crate::config::PeriodConfig;
use crate::models::person::Person;
use crate::models::types::CertaintyModel;
use crate::utils::logging::{finish_progress_bar, optional_progress_bar};

/// Funerals held within one period
#[derive(Debug, Clone, Serialize)]
pub struct TimePeriod {
    /// Display label, e.g. `"600–576 BCE"`
    #[serde(rename = "timePeriod")]
    pub label: String,
    /// First year of the period
    #[serde(skip)]
    pub start: i32,
    /// Last year of the period
    #[serde(skip)]
    pub end: i32,
    /// Lineages of the persons who died in the period, longest first
    pub funerals: Vec<Lineage>,
}

/// All non-empty periods for one certainty model
#[derive(Debug, Clone, Serialize)]
pub struct FuneralReport {
    /// Model the lineages were resolved under
    #[serde(skip)]
    pub model: CertaintyModel,
    /// Periods in chronological order
    #[serde(rename = "timePeriods")]
    pub periods: Vec<TimePeriod>,
}

impl FuneralReport {
    /// Total number of funerals over all periods
    #[must_use]
    pub fn funeral_count(&self) -> usize {
        self.periods.iter().map(|period| period.funerals.len()).sum()
    }
}

/// Aggregates lineages into death periods
#[derive(Debug)]
pub struct LineageAggregator<'e, 'a> {
    engine: &'e AncestryEngine<'a>,
    periods: PeriodConfig,
    show_progress: bool,
}

impl<'e, 'a> LineageAggregator<'e, 'a> {
    /// Create an aggregator over an engine
    #[must_use]
    pub const fn new(engine: &'e AncestryEngine<'a>, periods: PeriodConfig) -> Self {
        Self {
            engine,
            periods,
            show_progress: false,
        }
    }

    /// Draw a progress bar while resolving lineages
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Persons with a known death year inside the aggregated range, sorted by
    /// death year (ties keep load order)
    #[must_use]
    pub fn deceased(&self) -> Vec<&'a Person> {
        self.engine
            .registry()
            .iter()
            .filter(|person| {
                person
                    .death
                    .is_some_and(|death| !self.periods.is_after_final(death))
            })
            .sorted_by_key(|person| person.death)
            .collect()
    }

    /// Resolve and group the lineages of every deceased person
    #[must_use]
    pub fn aggregate(&self, model: CertaintyModel) -> FuneralReport {
        let deceased = self.deceased();
        let pb = optional_progress_bar(
            self.show_progress,
            deceased.len() as u64,
            &format!("Resolving {model} lineages"),
        );

        let resolved: Vec<(usize, Lineage)> = deceased
            .par_iter()
            .progress_with(pb.clone())
            .filter_map(|person| {
                let death = person.death?;
                let lineage = self.engine.resolve_ancestry(model, person.id);
                Some((self.periods.period_index(death), lineage))
            })
            .collect();
        finish_progress_bar(&pb, Some("done"));

        let periods: Vec<TimePeriod> = resolved
            .into_iter()
            .chunk_by(|(index, _)| *index)
            .into_iter()
            .map(|(index, group)| {
                let mut funerals: Vec<Lineage> = group.map(|(_, lineage)| lineage).collect();
                funerals.sort_by(|a, b| b.len().cmp(&a.len()));
                let (start, end) = self.periods.bounds(index);
                TimePeriod {
                    label: self.periods.label(index),
                    start,
                    end,
                    funerals,
                }
            })
            .collect();

        let report = FuneralReport { model, periods };
        log::info!(
            "Aggregated {} {model} funerals into {} periods",
            report.funeral_count(),
            report.periods.len()
        );
        report
    }

    /// Reports for every certainty model, least aggressive first
    #[must_use]
    pub fn aggregate_all(&self) -> Vec<FuneralReport> {
        CertaintyModel::ALL
            .iter()
            .map(|model| self.aggregate(*model))
            .collect()
    }
}

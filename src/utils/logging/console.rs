//! Console output utilities
//!
//! Plain-text summaries printed by the command line tool.

use crate::algorithm::aggregate::FuneralReport;
use crate::algorithm::graph_builder::LoadReport;
use crate::algorithm::inference::Lineage;
use crate::collections::PersonRegistry;

/// Print the load summary
pub fn print_load_summary(report: &LoadReport, elapsed: std::time::Duration) {
    println!("Loaded person graph in {elapsed:?}");
    println!("{report}");
}

/// Print a lineage headed by the subject's name and death year
pub fn print_lineage(registry: &PersonRegistry, lineage: &Lineage, verbose: bool) {
    if let Some(subject) = registry.get(lineage.subject) {
        match subject.death {
            Some(death) => println!("{} {death}", subject.name),
            None => println!("{}", subject.name),
        }
    }
    if verbose {
        println!("{}", lineage.render_verbose());
    } else {
        println!("{}", lineage.render_compact());
    }
    if let Some(cycle) = lineage.cycle_at {
        println!("(cycle at {cycle})");
    }
}

/// Print the number of funerals per period
pub fn print_period_summary(report: &FuneralReport) {
    println!("{} ({} periods):", report.model, report.periods.len());
    for period in &report.periods {
        println!("  {:<16} {:>5} funerals", period.label, period.funerals.len());
    }
}

//! Relationship graph builder
//!
//! Turns parsed person and relation records into a [`PersonRegistry`] with
//! linked relations. Bad records are skipped and counted; they never abort a
//! load.

use std::fmt;

use crate::collections::PersonRegistry;
use crate::models::person::{PersonRecord, RelationRecord};

/// Counts collected while building the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Persons added to the registry
    pub persons_loaded: usize,
    /// Person records rejected (missing id, duplicate id)
    pub persons_skipped: usize,
    /// Relations stored on a person
    pub relations_linked: usize,
    /// Relation records rejected (missing ids, unknown type)
    pub relations_skipped: usize,
    /// Relations dropped because one side is unknown
    pub relations_dropped: usize,
    /// Dangling relations removed after load
    pub relations_pruned: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Load Report:")?;
        writeln!(f, "  Persons loaded: {}", self.persons_loaded)?;
        writeln!(f, "  Persons skipped: {}", self.persons_skipped)?;
        writeln!(f, "  Relations linked: {}", self.relations_linked)?;
        writeln!(f, "  Relations skipped: {}", self.relations_skipped)?;
        writeln!(f, "  Relations dropped: {}", self.relations_dropped)?;
        write!(f, "  Relations pruned: {}", self.relations_pruned)
    }
}

/// Incremental builder of the person graph
#[derive(Debug, Default)]
pub struct GraphBuilder {
    registry: PersonRegistry,
    report: LoadReport,
    pending: Vec<RelationRecord>,
}

impl GraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add person records in order
    ///
    /// Inline father/grandfather fields are queued as relations and linked in
    /// [`Self::build`], once every person is known.
    pub fn add_people<'r>(&mut self, records: impl IntoIterator<Item = &'r PersonRecord>) {
        for record in records {
            match self.registry.add_person(record) {
                Ok(_) => {
                    self.report.persons_loaded += 1;
                    self.pending.extend(record.inline_relations());
                }
                Err(e) if e.is_record_level() => {
                    log::warn!("Skipping person record {:?}: {e}", record.id);
                    self.report.persons_skipped += 1;
                }
                Err(e) => {
                    log::error!("Unexpected error for person record {:?}: {e}", record.id);
                    self.report.persons_skipped += 1;
                }
            }
        }
    }

    /// Queue relation records
    pub fn add_relations<'r>(&mut self, records: impl IntoIterator<Item = &'r RelationRecord>) {
        self.pending.extend(records.into_iter().cloned());
    }

    /// Link all queued relations and return the finished registry
    #[must_use]
    pub fn build(mut self) -> (PersonRegistry, LoadReport) {
        for record in std::mem::take(&mut self.pending) {
            self.link(&record);
        }
        self.report.relations_pruned = self.registry.prune_dangling();

        log::info!(
            "Built person graph: {} persons, {} relations ({} records skipped)",
            self.report.persons_loaded,
            self.report.relations_linked,
            self.report.persons_skipped + self.report.relations_skipped
        );
        (self.registry, self.report)
    }

    fn link(&mut self, record: &RelationRecord) {
        let link = match record.parse() {
            Ok(link) => link,
            Err(e) => {
                log::warn!(
                    "Skipping relation {:?} -> {:?}: {e}",
                    record.about_person_id,
                    record.related_person_id
                );
                self.report.relations_skipped += 1;
                return;
            }
        };

        if self
            .registry
            .link_relation(link.about, link.related, link.kind, link.certain)
        {
            self.report.relations_linked += 1;
        } else {
            self.report.relations_dropped += 1;
        }
    }
}

/// Build a registry from person and relation records in one go
#[must_use]
pub fn build_graph(
    people: &[PersonRecord],
    relations: &[RelationRecord],
) -> (PersonRegistry, LoadReport) {
    let mut builder = GraphBuilder::new();
    builder.add_people(people);
    builder.add_relations(relations);
    builder.build()
}

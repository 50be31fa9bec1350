//! Nomen index
//!
//! Groups persons by nomen for father-candidate search.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::collections::registry::PersonRegistry;
use crate::models::types::PersonId;

/// Mapping from nomen to the persons bearing it, in load order
#[derive(Debug, Default, Clone)]
pub struct NomenIndex {
    groups: FxHashMap<String, Vec<PersonId>>,
}

impl NomenIndex {
    /// Build the index from a registry
    ///
    /// Persons without a nomen are not indexed.
    #[must_use]
    pub fn build(registry: &PersonRegistry) -> Self {
        let mut groups: FxHashMap<String, Vec<PersonId>> = FxHashMap::default();
        for person in registry.iter() {
            if let Some(nomen) = &person.nomen {
                groups.entry(nomen.clone()).or_default().push(person.id);
            }
        }
        log::debug!("Indexed {} nomina", groups.len());
        Self { groups }
    }

    /// Persons sharing a nomen, in load order
    #[must_use]
    pub fn group(&self, nomen: &str) -> &[PersonId] {
        self.groups.get(nomen).map_or(&[], Vec::as_slice)
    }

    /// All nomina, sorted
    #[must_use]
    pub fn nomina(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).sorted_unstable().collect()
    }

    /// Number of distinct nomina
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no nomen was indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

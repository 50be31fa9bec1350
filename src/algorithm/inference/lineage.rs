//! Lineage results
//!
//! A [`Lineage`] is the ordered list of nodes produced by one ancestor walk:
//! the subject first, then each emitted ancestor.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::person::Person;
use crate::models::types::{CertaintyModel, IconCategory, Office, PersonId, Provenance};

/// One emitted person of a lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    /// Person identifier
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Nomen, if known
    pub nomen: Option<String>,
    /// Best office held
    #[serde(rename = "bestPos")]
    pub best_office: Option<Office>,
    /// Birth year
    #[serde(rename = "birthDate")]
    pub birth: Option<i32>,
    /// Death year
    #[serde(rename = "deathDate")]
    pub death: Option<i32>,
    /// Toga icon
    pub icon: IconCategory,
    /// How this node was reached from the previous one
    #[serde(rename = "link")]
    pub provenance: Provenance,
}

impl LineageNode {
    /// Build a node from a person
    #[must_use]
    pub fn from_person(person: &Person, provenance: Provenance) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            nomen: person.nomen.clone(),
            best_office: person.best_office,
            birth: person.birth,
            death: person.death,
            icon: person.icon(),
            provenance,
        }
    }

    fn office_label(&self) -> &'static str {
        self.best_office.map_or("", Office::as_str)
    }
}

/// Result of resolving the paternal ancestry of one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    /// Queried person
    pub subject: PersonId,
    /// Model the lineage was resolved under
    pub model: CertaintyModel,
    /// Emitted nodes, subject first
    pub nodes: Vec<LineageNode>,
    /// Person at which a cycle was detected, if any
    pub cycle_at: Option<PersonId>,
}

impl Lineage {
    /// Create an empty lineage
    #[must_use]
    pub const fn new(subject: PersonId, model: CertaintyModel) -> Self {
        Self {
            subject,
            model,
            nodes: Vec::new(),
            cycle_at: None,
        }
    }

    /// Number of emitted nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was emitted (unknown subject)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Emitted identifiers in order
    #[must_use]
    pub fn ids(&self) -> Vec<PersonId> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    /// Whether any emitted link was guessed
    #[must_use]
    pub fn has_guess(&self) -> bool {
        self.nodes.iter().any(|node| node.provenance.is_guess())
    }

    /// Offices of the lineage separated by spaces
    #[must_use]
    pub fn render_compact(&self) -> String {
        self.nodes
            .iter()
            .map(LineageNode::office_label)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One line per node, guessed links marked
    ///
    /// ```text
    ///     Q. Fabius Maximus consul
    ///     (Cognomen guess)    Q. Fabius Gurges consul
    /// ```
    #[must_use]
    pub fn render_verbose(&self) -> String {
        self.nodes
            .iter()
            .map(|node| {
                let marker = node
                    .provenance
                    .marker()
                    .map(|marker| format!("\t{marker}"))
                    .unwrap_or_default();
                format!("{marker}\t{} {}", node.name, node.office_label())
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for Lineage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.nodes.len()))?;
        for node in &self.nodes {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

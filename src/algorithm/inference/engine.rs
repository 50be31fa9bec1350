//! Ancestor inference engine
//!
//! Walks the paternal chain of a person one link at a time. Each link is,
//! in order of preference:
//!
//! 1. the attested father, unless a certain grandfather is known and the
//!    father is uncertain (models other than Conservative);
//! 2. the attested grandfather;
//! 3. under Aggressive and Hyperaggressive, a father guessed among older
//!    members of the same gens, preferring the same cognomen.
//!
//! The walk is a loop over [`AncestryEngine::next_link`] guarded by a visited
//! set, so cyclic source data terminates.

use rustc_hash::FxHashSet;

use crate::algorithm::inference::lineage::{Lineage, LineageNode};
use crate::collections::{NomenIndex, PersonRegistry};
use crate::config::InferenceConfig;
use crate::models::person::Person;
use crate::models::types::{CertaintyModel, PersonId, Provenance, RelationType};

/// A single inferred paternal link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// The next ancestor
    pub target: PersonId,
    /// How the ancestor was found
    pub provenance: Provenance,
}

impl Step {
    const fn new(target: PersonId, provenance: Provenance) -> Self {
        Self { target, provenance }
    }
}

/// Engine resolving paternal lineages over an immutable registry
#[derive(Debug)]
pub struct AncestryEngine<'a> {
    registry: &'a PersonRegistry,
    index: NomenIndex,
    config: InferenceConfig,
}

impl<'a> AncestryEngine<'a> {
    /// Create an engine, building the nomen index from the registry
    #[must_use]
    pub fn new(registry: &'a PersonRegistry, config: InferenceConfig) -> Self {
        Self::with_index(registry, NomenIndex::build(registry), config)
    }

    /// Create an engine over a prebuilt nomen index
    #[must_use]
    pub const fn with_index(
        registry: &'a PersonRegistry,
        index: NomenIndex,
        config: InferenceConfig,
    ) -> Self {
        Self {
            registry,
            index,
            config,
        }
    }

    /// Registry the engine reads from
    #[must_use]
    pub const fn registry(&self) -> &'a PersonRegistry {
        self.registry
    }

    /// Nomen index used for candidate search
    #[must_use]
    pub const fn index(&self) -> &NomenIndex {
        &self.index
    }

    /// Inference settings
    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Resolve the paternal lineage of a person
    ///
    /// The subject is always the first node. Ancestors are emitted only when
    /// they hold a ranked office, but the walk continues through them. An
    /// unknown subject yields an empty lineage.
    #[must_use]
    pub fn resolve_ancestry(&self, model: CertaintyModel, person_id: PersonId) -> Lineage {
        let mut lineage = Lineage::new(person_id, model);
        let mut visited: FxHashSet<PersonId> = FxHashSet::default();
        let mut current = Some(Step::new(person_id, Provenance::Subject));

        while let Some(step) = current {
            if !visited.insert(step.target) {
                log::warn!(
                    "Reached an infinite loop around person {} while resolving {person_id} ({model})",
                    step.target
                );
                lineage.cycle_at = Some(step.target);
                break;
            }

            let Some(person) = self.registry.get(step.target) else {
                break;
            };

            if step.provenance == Provenance::Subject || person.best_office.is_some() {
                lineage
                    .nodes
                    .push(LineageNode::from_person(person, step.provenance));
            }

            current = self.next_link(model, person);
        }

        lineage
    }

    /// Decide the next paternal link of a person under a model
    #[must_use]
    pub fn next_link(&self, model: CertaintyModel, person: &Person) -> Option<Step> {
        let father = person.relation(RelationType::Father);
        let grandfather = person.relation(RelationType::Grandfather);

        if let Some(father) = father {
            let keep_father = model == CertaintyModel::Conservative
                || father.certain
                || grandfather.is_none_or(|grandfather| !grandfather.certain);
            if keep_father {
                let provenance = if father.certain {
                    Provenance::Attested
                } else {
                    Provenance::AttestedUncertain
                };
                return Some(Step::new(father.target, provenance));
            }
        }

        if let Some(grandfather) = grandfather {
            return Some(Step::new(grandfather.target, Provenance::Grandfather));
        }

        if !model.allows_guessing() || self.config.is_stop(person.id) {
            return None;
        }

        self.guess_father(model, person)
    }

    /// Guess a father among older members of the same gens
    fn guess_father(&self, model: CertaintyModel, person: &Person) -> Option<Step> {
        let nomen = person.nomen.as_deref()?;
        let birth = person.birth?;
        let gap = i64::from(self.config.min_generation_gap);

        let candidates: Vec<&Person> = self
            .index
            .group(nomen)
            .iter()
            .filter(|id| !self.config.is_excluded(person.id, **id))
            .filter_map(|id| self.registry.get(*id))
            .filter(|candidate| {
                candidate
                    .birth
                    .is_some_and(|b| i64::from(birth) - i64::from(b) >= gap)
            })
            .collect();

        let same_cognomen = latest_born(
            candidates
                .iter()
                .copied()
                .filter(|candidate| candidate.shares_cognomen(person)),
        );
        if let Some(candidate) = same_cognomen {
            return Some(Step::new(candidate.id, Provenance::CognomenGuess));
        }

        if model == CertaintyModel::Hyperaggressive {
            if let Some(candidate) = latest_born(candidates.iter().copied()) {
                return Some(Step::new(candidate.id, Provenance::NomenGuess));
            }
        }

        None
    }
}

/// Latest-born person; ties keep the first in iteration order
fn latest_born<'p>(people: impl Iterator<Item = &'p Person>) -> Option<&'p Person> {
    people.fold(None, |best: Option<&Person>, candidate| match best {
        Some(current) if current.birth >= candidate.birth => Some(current),
        _ => Some(candidate),
    })
}

//! Person registry
//!
//! Owns every loaded person, keyed by identifier, and remembers load order.
//! Relations are stored on their owning person; the registry only guarantees
//! that both ends of a stored relation exist.

use rustc_hash::FxHashMap;

use crate::error::{Result, StemmaError};
use crate::models::person::{Person, PersonRecord, Relation};
use crate::models::types::{Gender, PersonId, RelationType};

/// Registry of all persons, keyed by identifier
#[derive(Debug, Default, Clone)]
pub struct PersonRegistry {
    people: FxHashMap<PersonId, Person>,
    order: Vec<PersonId>,
    unknown_men: usize,
    unknown_women: usize,
    /// Per-gender ordinal of each placeholder, assigned on insertion
    placeholder_ordinals: FxHashMap<PersonId, usize>,
    last_placeholder: i64,
}

impl PersonRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already constructed persons
    ///
    /// Later duplicates are rejected exactly as in [`Self::insert`].
    pub fn from_people(people: impl IntoIterator<Item = Person>) -> Result<Self> {
        let mut registry = Self::new();
        for person in people {
            registry.insert(person)?;
        }
        Ok(registry)
    }

    /// Create a person from a parsed record and register it
    pub fn add_person(&mut self, record: &PersonRecord) -> Result<PersonId> {
        let person = Person::from_record(record)?;
        self.insert(person)
    }

    /// Register an already constructed person
    pub fn insert(&mut self, person: Person) -> Result<PersonId> {
        let id = person.id;
        if self.people.contains_key(&id) {
            return Err(StemmaError::DuplicateId(id));
        }
        self.people.insert(id, person);
        self.order.push(id);
        Ok(id)
    }

    /// Look up a person by identifier
    #[must_use]
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Whether a person with this identifier exists
    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        self.people.contains_key(&id)
    }

    /// Number of registered persons
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate persons in load order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.order.iter().filter_map(|id| self.people.get(id))
    }

    /// Identifiers in load order
    #[must_use]
    pub fn ids(&self) -> &[PersonId] {
        &self.order
    }

    /// Position of a person in load order
    #[must_use]
    pub fn position(&self, id: PersonId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Append a relation to the owner's relation list
    ///
    /// Returns `false`, and stores nothing, when either side is unknown.
    pub fn link_relation(
        &mut self,
        person_id: PersonId,
        related_id: PersonId,
        kind: RelationType,
        certain: bool,
    ) -> bool {
        if !self.people.contains_key(&related_id) {
            log::debug!("Dropping {kind} relation {person_id} -> {related_id}: unknown target");
            return false;
        }
        match self.people.get_mut(&person_id) {
            Some(person) => {
                person.push_relation(Relation::new(kind, related_id, certain));
                true
            }
            None => {
                log::debug!("Dropping {kind} relation {person_id} -> {related_id}: unknown owner");
                false
            }
        }
    }

    /// Remove relations pointing at unknown persons
    ///
    /// Returns the number of removed relations. Survivors keep their order.
    pub fn prune_dangling(&mut self) -> usize {
        let known: rustc_hash::FxHashSet<PersonId> = self.people.keys().copied().collect();
        let mut removed = 0;
        for person in self.people.values_mut() {
            removed += person.retain_relations(|relation| known.contains(&relation.target));
        }
        if removed > 0 {
            log::debug!("Pruned {removed} dangling relations");
        }
        removed
    }

    /// Insert an "Unknown Man"/"Unknown Woman" placeholder
    ///
    /// Placeholders get decreasing negative identifiers starting at -1 and
    /// are never certain. Identifiers already taken are skipped. Unknown
    /// gender is treated as male.
    pub fn insert_placeholder(&mut self, gender: Gender) -> PersonId {
        let mut next = self.last_placeholder - 1;
        while self.people.contains_key(&PersonId(next)) {
            next -= 1;
        }
        self.last_placeholder = next;
        let id = PersonId(next);

        let (name, gender, ordinal) = match gender {
            Gender::Female => {
                self.unknown_women += 1;
                ("Unknown Woman", Gender::Female, self.unknown_women)
            }
            Gender::Male | Gender::Unknown => {
                self.unknown_men += 1;
                ("Unknown Man", Gender::Male, self.unknown_men)
            }
        };
        self.placeholder_ordinals.insert(id, ordinal);

        let mut person = Person::new(id, name).with_gender(gender);
        person.is_certain = false;
        self.people.insert(id, person);
        self.order.push(id);
        id
    }

    /// Label for a person in family-tree output
    ///
    /// Placeholders are labelled `unknownman<n>` / `unknownwoman<n>` counted
    /// per gender in creation order; every other person uses its identifier.
    #[must_use]
    pub fn label(&self, id: PersonId) -> String {
        let (Some(ordinal), Some(person)) = (self.placeholder_ordinals.get(&id), self.get(id))
        else {
            return id.to_string();
        };
        match person.gender {
            Gender::Female => format!("unknownwoman{ordinal}"),
            Gender::Male | Gender::Unknown => format!("unknownman{ordinal}"),
        }
    }

    /// Number of placeholders created so far, as `(men, women)`
    #[must_use]
    pub const fn placeholder_counts(&self) -> (usize, usize) {
        (self.unknown_men, self.unknown_women)
    }
}

//! Union-based family trees
//!
//! Family trees connect partners to a union node and unions to their
//! children. When only one parent of a child is known, the child is attached
//! to that parent's first union, or to a new union with a synthesized
//! "Unknown Man"/"Unknown Woman" partner. The finished graph is split into
//! connected components, one tree each.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::collections::PersonRegistry;
use crate::config::FamilyTreeConfig;
use crate::models::person::Person;
use crate::models::types::{Gender, IconCategory, PersonId, RelationType};

/// Person node of a family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreePerson {
    /// Identifier label (`unknownman<n>` for placeholders)
    pub id: String,
    /// Display name
    pub name: String,
    /// Birth year
    pub birthyear: Option<i32>,
    /// Death year
    pub deathyear: Option<i32>,
    /// Unions this person is a partner in
    pub own_unions: Vec<String>,
    /// False for placeholders
    pub is_certain: bool,
    /// Gender
    pub gender: Gender,
    /// Toga icon, absent for placeholders
    pub icon: Option<IconCategory>,
}

/// Union node of a family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeUnion {
    /// `"<a>_<b>"`
    pub id: String,
    /// Both partners
    pub partner: [String; 2],
    /// Children of the union
    pub children: Vec<String>,
}

/// One connected family tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyTree {
    /// Person the tree was discovered from
    pub start: String,
    /// Person nodes
    pub persons: Vec<TreePerson>,
    /// Union nodes
    pub unions: Vec<TreeUnion>,
    /// Directed edges: partner → union and union → child
    pub links: Vec<[String; 2]>,
}

/// Which tree a real person appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeopleMappingEntry {
    /// Person identifier label
    pub id: String,
    /// Display name
    pub name: String,
    /// `start` of the tree containing the person
    pub tree: String,
}

/// Autocomplete entry of the family-tree front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeAutocompleteEntry {
    /// Display name
    pub value: String,
    /// Person identifier label
    pub id: String,
    /// Display name
    pub label: String,
}

/// All family trees of a registry
#[derive(Debug, Clone, Default, Serialize)]
pub struct FamilyForest {
    /// Connected components
    pub trees: Vec<FamilyTree>,
    /// Tree lookup for every real person
    pub people_mapping: Vec<PeopleMappingEntry>,
    /// Autocomplete entries for every real person
    pub autocomplete: Vec<TreeAutocompleteEntry>,
    /// Number of synthesized placeholders
    pub placeholders: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Parents {
    father: Option<PersonId>,
    mother: Option<PersonId>,
}

#[derive(Debug)]
struct Union {
    partners: (PersonId, PersonId),
    children: Vec<PersonId>,
}

#[derive(Debug, Default)]
struct UnionTable {
    unions: Vec<Union>,
    by_pair: FxHashMap<(PersonId, PersonId), usize>,
    own: FxHashMap<PersonId, Vec<usize>>,
}

impl UnionTable {
    /// Real persons first, then ascending
    fn ordered(a: PersonId, b: PersonId) -> (PersonId, PersonId) {
        match (a.is_placeholder(), b.is_placeholder()) {
            (false, true) => (a, b),
            (true, false) => (b, a),
            _ => (a.min(b), a.max(b)),
        }
    }

    fn ensure(&mut self, a: PersonId, b: PersonId) -> usize {
        let pair = Self::ordered(a, b);
        if let Some(index) = self.by_pair.get(&pair) {
            return *index;
        }
        let index = self.unions.len();
        self.unions.push(Union {
            partners: pair,
            children: Vec::new(),
        });
        self.by_pair.insert(pair, index);
        self.own.entry(pair.0).or_default().push(index);
        self.own.entry(pair.1).or_default().push(index);
        index
    }

    fn first_union(&self, person: PersonId) -> Option<usize> {
        self.own.get(&person).and_then(|unions| unions.first().copied())
    }

    fn partner_of(&self, union: usize, person: PersonId) -> PersonId {
        let (a, b) = self.unions[union].partners;
        if a == person { b } else { a }
    }

    fn attach(&mut self, union: usize, child: PersonId) {
        let children = &mut self.unions[union].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }
}

/// Builds family trees, synthesizing missing parents into the registry
#[derive(Debug)]
pub struct FamilyTreeBuilder<'r> {
    registry: &'r mut PersonRegistry,
    config: FamilyTreeConfig,
}

impl<'r> FamilyTreeBuilder<'r> {
    /// Create a builder
    #[must_use]
    pub const fn new(registry: &'r mut PersonRegistry, config: FamilyTreeConfig) -> Self {
        Self { registry, config }
    }

    fn is_eligible(&self, person: &Person) -> bool {
        match (person.birth, self.config.max_birth_year) {
            (Some(birth), Some(max)) => birth <= max,
            _ => true,
        }
    }

    /// Build every family tree
    #[must_use]
    pub fn build(mut self) -> FamilyForest {
        let members: Vec<PersonId> = self
            .registry
            .iter()
            .filter(|person| self.is_eligible(person))
            .map(|person| person.id)
            .collect();
        let eligible: FxHashSet<PersonId> = members.iter().copied().collect();

        let (children, parents) = self.collect_parents(&members, &eligible);
        let mut unions = self.collect_unions(&members, &eligible);

        let mut placeholders = Vec::new();
        for child in children {
            let Some(found) = parents.get(&child).copied() else {
                continue;
            };
            let union = match (found.father, found.mother) {
                (Some(father), Some(mother)) => unions.ensure(father, mother),
                (Some(known), None) => {
                    self.complete_union(&mut unions, known, Gender::Female, child, &mut placeholders)
                }
                (None, Some(known)) => {
                    self.complete_union(&mut unions, known, Gender::Male, child, &mut placeholders)
                }
                (None, None) => continue,
            };
            unions.attach(union, child);
        }

        let mut all_members = members;
        all_members.extend(placeholders.iter().copied());
        let forest = self.assemble(&all_members, &unions, placeholders.len());
        log::info!(
            "Built {} family trees ({} unions, {} placeholders)",
            forest.trees.len(),
            unions.unions.len(),
            forest.placeholders
        );
        forest
    }

    /// Children in order of discovery with their first found parents
    fn collect_parents(
        &self,
        members: &[PersonId],
        eligible: &FxHashSet<PersonId>,
    ) -> (Vec<PersonId>, FxHashMap<PersonId, Parents>) {
        let mut order = Vec::new();
        let mut parents: FxHashMap<PersonId, Parents> = FxHashMap::default();

        let mut record = |child: PersonId, parent: PersonId, gender: Gender| {
            let entry = parents.entry(child).or_insert_with(|| {
                order.push(child);
                Parents::default()
            });
            match gender {
                Gender::Male if entry.father.is_none() => entry.father = Some(parent),
                Gender::Female if entry.mother.is_none() => entry.mother = Some(parent),
                _ => {}
            }
        };

        for person in members.iter().filter_map(|id| self.registry.get(*id)) {
            for relation in person.relations() {
                if !eligible.contains(&relation.target) {
                    continue;
                }
                match relation.kind {
                    RelationType::Father => record(person.id, relation.target, Gender::Male),
                    RelationType::Son | RelationType::Daughter => {
                        record(relation.target, person.id, person.gender);
                    }
                    _ => {}
                }
            }
        }
        (order, parents)
    }

    fn collect_unions(&self, members: &[PersonId], eligible: &FxHashSet<PersonId>) -> UnionTable {
        let mut unions = UnionTable::default();
        for person in members.iter().filter_map(|id| self.registry.get(*id)) {
            for relation in person.relations() {
                if relation.kind.is_marriage()
                    && relation.target != person.id
                    && eligible.contains(&relation.target)
                {
                    unions.ensure(person.id, relation.target);
                }
            }
        }
        unions
    }

    /// Union for a child with one known parent
    fn complete_union(
        &mut self,
        unions: &mut UnionTable,
        known: PersonId,
        missing: Gender,
        child: PersonId,
        placeholders: &mut Vec<PersonId>,
    ) -> usize {
        if let Some(union) = unions.first_union(known) {
            let partner = unions.partner_of(union, known);
            self.link_parent(partner, child);
            return union;
        }

        let placeholder = self.registry.insert_placeholder(missing);
        placeholders.push(placeholder);
        self.registry
            .link_relation(placeholder, known, RelationType::Spouse, false);
        self.registry
            .link_relation(known, placeholder, RelationType::Spouse, false);
        self.link_parent(placeholder, child);
        unions.ensure(known, placeholder)
    }

    /// Record the parent/child relations between a parent and a child
    fn link_parent(&mut self, parent: PersonId, child: PersonId) {
        let (Some(parent_person), Some(child_person)) =
            (self.registry.get(parent), self.registry.get(child))
        else {
            return;
        };
        let kind = RelationType::child_of_gender(child_person.gender);
        let needs_child = !parent_person.has_relation(kind, child);
        let needs_father = parent_person.gender == Gender::Male
            && child_person.relation(RelationType::Father).is_none();

        if needs_child {
            self.registry.link_relation(parent, child, kind, false);
        }
        if needs_father {
            self.registry
                .link_relation(child, parent, RelationType::Father, false);
        }
    }

    fn assemble(&self, members: &[PersonId], unions: &UnionTable, placeholders: usize) -> FamilyForest {
        let labels: FxHashMap<PersonId, String> = members
            .iter()
            .map(|id| (*id, self.registry.label(*id)))
            .collect();
        let label = |id: PersonId| labels.get(&id).cloned().unwrap_or_else(|| id.to_string());
        let union_label = |index: usize| {
            let (a, b) = unions.unions[index].partners;
            format!("{}_{}", label(a), label(b))
        };

        let mut child_of: FxHashMap<PersonId, Vec<usize>> = FxHashMap::default();
        for (index, union) in unions.unions.iter().enumerate() {
            for child in &union.children {
                child_of.entry(*child).or_default().push(index);
            }
        }

        let mut covered: FxHashSet<PersonId> = FxHashSet::default();
        let mut tree_of: FxHashMap<PersonId, String> = FxHashMap::default();
        let mut forest = FamilyForest {
            placeholders,
            ..FamilyForest::default()
        };

        for start in members {
            if covered.contains(start) {
                continue;
            }
            let (people, union_ids) = component(*start, unions, &child_of);
            covered.extend(people.iter().copied());
            let in_tree: FxHashSet<PersonId> = people.iter().copied().collect();
            let start_label = label(*start);

            let persons: Vec<TreePerson> = members
                .iter()
                .filter(|id| in_tree.contains(id))
                .filter_map(|id| self.registry.get(*id))
                .map(|person| TreePerson {
                    id: label(person.id),
                    name: person.name.clone(),
                    birthyear: person.birth,
                    deathyear: person.death,
                    own_unions: unions
                        .own
                        .get(&person.id)
                        .map(|own| own.iter().map(|u| union_label(*u)).collect())
                        .unwrap_or_default(),
                    is_certain: person.is_certain,
                    gender: person.gender,
                    icon: (!person.id.is_placeholder())
                        .then(|| IconCategory::for_person(person.best_office, person.gender)),
                })
                .collect();

            let mut tree_unions = Vec::with_capacity(union_ids.len());
            let mut links = Vec::new();
            for index in union_ids {
                let union = &unions.unions[index];
                let id = union_label(index);
                let partner = [label(union.partners.0), label(union.partners.1)];
                for spouse in &partner {
                    links.push([spouse.clone(), id.clone()]);
                }
                let children: Vec<String> = union.children.iter().map(|c| label(*c)).collect();
                for child in &children {
                    links.push([id.clone(), child.clone()]);
                }
                tree_unions.push(TreeUnion {
                    id,
                    partner,
                    children,
                });
            }

            for id in &people {
                tree_of.insert(*id, start_label.clone());
            }

            forest.trees.push(FamilyTree {
                start: start_label,
                persons,
                unions: tree_unions,
                links,
            });
        }

        let real: Vec<&Person> = members
            .iter()
            .filter(|id| !id.is_placeholder())
            .filter_map(|id| self.registry.get(*id))
            .collect();
        forest.people_mapping = real
            .iter()
            .filter_map(|person| {
                tree_of.get(&person.id).map(|tree| PeopleMappingEntry {
                    id: label(person.id),
                    name: person.name.clone(),
                    tree: tree.clone(),
                })
            })
            .collect();
        forest.autocomplete = real
            .iter()
            .map(|person| TreeAutocompleteEntry {
                value: person.name.clone(),
                id: label(person.id),
                label: person.name.clone(),
            })
            .collect();
        forest
    }
}

/// Persons and unions connected to `start`, unions in ascending order
fn component(
    start: PersonId,
    unions: &UnionTable,
    child_of: &FxHashMap<PersonId, Vec<usize>>,
) -> (Vec<PersonId>, Vec<usize>) {
    let mut people = vec![start];
    let mut seen_people: FxHashSet<PersonId> = FxHashSet::from_iter([start]);
    let mut seen_unions: FxHashSet<usize> = FxHashSet::default();
    let mut queue = VecDeque::from([start]);

    while let Some(person) = queue.pop_front() {
        let touching = unions
            .own
            .get(&person)
            .into_iter()
            .flatten()
            .chain(child_of.get(&person).into_iter().flatten());
        for union in touching {
            if !seen_unions.insert(*union) {
                continue;
            }
            let entry = &unions.unions[*union];
            let neighbours = [entry.partners.0, entry.partners.1]
                .into_iter()
                .chain(entry.children.iter().copied());
            for next in neighbours {
                if seen_people.insert(next) {
                    people.push(next);
                    queue.push_back(next);
                }
            }
        }
    }

    let mut union_ids: Vec<usize> = seen_unions.into_iter().collect();
    union_ids.sort_unstable();
    (people, union_ids)
}

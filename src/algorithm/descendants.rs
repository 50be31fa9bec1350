//! Descendant trees
//!
//! Inverts the paternal links chosen by the inference engine: every person
//! whose link resolves to a known person becomes a child of that person, and
//! everybody else roots a tree. The result is the nested `children` shape
//! drawn by d3 tree layouts.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::algorithm::inference::{AncestryEngine, Step};
use crate::models::person::Person;
use crate::models::types::{CertaintyModel, IconCategory, Office, PersonId, Provenance};

/// Parent of a node and how it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClosestAncestor {
    /// Parent identifier
    pub id: PersonId,
    /// Kind of link
    pub link: Provenance,
}

impl From<Step> for ClosestAncestor {
    fn from(step: Step) -> Self {
        Self {
            id: step.target,
            link: step.provenance,
        }
    }
}

/// Node of a descendant tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescendantNode {
    pub id: PersonId,
    pub name: String,
    #[serde(rename = "bestPos")]
    pub best_office: Option<Office>,
    #[serde(rename = "birthDate")]
    pub birth: Option<i32>,
    #[serde(rename = "deathDate")]
    pub death: Option<i32>,
    /// `None` for roots
    #[serde(rename = "closestAncestor")]
    pub closest_ancestor: Option<ClosestAncestor>,
    pub icon: IconCategory,
    /// Children in load order
    pub children: Vec<DescendantNode>,
}

impl DescendantNode {
    fn leaf(person: &Person, parent: Option<Step>) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            best_office: person.best_office,
            birth: person.birth,
            death: person.death,
            closest_ancestor: parent.map(ClosestAncestor::from),
            icon: person.icon(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree
    #[must_use]
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// A rooted descendant tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescendantTree {
    /// Number of levels, 1 for a lone root
    pub height: usize,
    pub root: DescendantNode,
}

impl DescendantTree {
    /// Number of levels, 1 for a lone root
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

/// All descendant trees of a registry under one model
#[derive(Debug, Clone, Serialize)]
pub struct DescendantForest {
    #[serde(skip)]
    pub model: CertaintyModel,
    /// Trees in the load order of their roots
    pub trees: Vec<DescendantTree>,
    /// Links dropped to break cycles, as (child, parent)
    #[serde(skip)]
    pub broken_links: Vec<(PersonId, PersonId)>,
}

impl DescendantForest {
    /// Build the forest from the engine's paternal links
    #[must_use]
    pub fn build(engine: &AncestryEngine<'_>, model: CertaintyModel) -> Self {
        let registry = engine.registry();

        let mut parents: FxHashMap<PersonId, Step> = registry
            .iter()
            .filter_map(|person| {
                let step = engine.next_link(model, person)?;
                registry.contains(step.target).then_some((person.id, step))
            })
            .collect();
        let broken_links = break_cycles(registry.ids(), &mut parents);

        let mut children: FxHashMap<PersonId, Vec<PersonId>> = FxHashMap::default();
        for id in registry.ids() {
            if let Some(step) = parents.get(id) {
                children.entry(step.target).or_default().push(*id);
            }
        }

        let mut trees = Vec::new();
        for root in registry.ids().iter().filter(|id| !parents.contains_key(id)) {
            // Preorder, then assemble bottom-up so no recursion is needed
            let mut order = Vec::new();
            let mut stack = vec![*root];
            while let Some(id) = stack.pop() {
                order.push(id);
                if let Some(kids) = children.get(&id) {
                    stack.extend(kids.iter().rev());
                }
            }

            let mut built: FxHashMap<PersonId, (DescendantNode, usize)> = FxHashMap::default();
            for id in order.iter().rev() {
                let Some(person) = registry.get(*id) else {
                    continue;
                };
                let mut node = DescendantNode::leaf(person, parents.get(id).copied());
                let mut height = 1;
                for child in children.get(id).into_iter().flatten() {
                    if let Some((child_node, child_height)) = built.remove(child) {
                        height = height.max(child_height + 1);
                        node.children.push(child_node);
                    }
                }
                built.insert(*id, (node, height));
            }

            if let Some((root, height)) = built.remove(root) {
                trees.push(DescendantTree { height, root });
            }
        }

        log::info!(
            "Built {} {model} descendant trees ({} cyclic links broken)",
            trees.len(),
            broken_links.len()
        );
        Self {
            model,
            trees,
            broken_links,
        }
    }

    /// Number of trees
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the forest is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Tree rooted at a person
    #[must_use]
    pub fn tree(&self, root: PersonId) -> Option<&DescendantTree> {
        self.trees.iter().find(|tree| tree.root.id == root)
    }

    /// Trees with at least `min_height` levels
    pub fn branching(&self, min_height: usize) -> impl Iterator<Item = &DescendantTree> {
        self.trees.iter().filter(move |tree| tree.height >= min_height)
    }
}

/// Drop the link closing each cycle of the parent map
///
/// Chains are followed from every person in `order`; when a chain reaches a
/// person already on it, the link of the last person walked is removed.
fn break_cycles(
    order: &[PersonId],
    parents: &mut FxHashMap<PersonId, Step>,
) -> Vec<(PersonId, PersonId)> {
    let mut done: FxHashSet<PersonId> = FxHashSet::default();
    let mut on_path: FxHashSet<PersonId> = FxHashSet::default();
    let mut broken = Vec::new();

    for start in order {
        let mut path = Vec::new();
        let mut current = *start;
        loop {
            if done.contains(&current) {
                break;
            }
            if on_path.contains(&current) {
                if let Some(last) = path.last().copied() {
                    log::warn!("Breaking cyclic paternal link {last} -> {current}");
                    parents.remove(&last);
                    broken.push((last, current));
                }
                break;
            }
            on_path.insert(current);
            path.push(current);
            match parents.get(&current) {
                Some(step) => current = step.target,
                None => break,
            }
        }
        for id in path {
            on_path.remove(&id);
            done.insert(id);
        }
    }
    broken
}

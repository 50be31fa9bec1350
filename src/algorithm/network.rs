//! Relationship network graphs
//!
//! Builds force-graph data (nodes and undirected links) around a person by
//! following the relation kinds selected by a [`NetworkScope`]. Nodes are
//! grouped by nomen stem so that `Cornelius` and `Cornelia` share a colour.

use std::fmt;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::collections::PersonRegistry;
use crate::error::StemmaError;
use crate::models::person::Person;
use crate::models::types::{PersonId, RelationType};

/// Which relations a network traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkScope {
    /// Fathers and grandfathers
    Ancestors,
    /// Ancestors plus sons and daughters
    WithChildren,
    /// Ancestors, children and (divorced) spouses
    WithSpouses,
}

impl NetworkScope {
    /// Whether the traversal follows relations of this kind
    #[must_use]
    pub const fn includes(self, kind: RelationType) -> bool {
        match kind {
            RelationType::Father | RelationType::Grandfather => true,
            RelationType::Son | RelationType::Daughter => {
                matches!(self, Self::WithChildren | Self::WithSpouses)
            }
            RelationType::Spouse | RelationType::Divorced => matches!(self, Self::WithSpouses),
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ancestors => "ancestors",
            Self::WithChildren => "children",
            Self::WithSpouses => "spouses",
        }
    }
}

impl FromStr for NetworkScope {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ancestors" | "simple" | "0" => Ok(Self::Ancestors),
            "children" | "with-children" | "1" => Ok(Self::WithChildren),
            "spouses" | "with-spouses" | "2" => Ok(Self::WithSpouses),
            _ => Err(StemmaError::UnknownScope(s.to_string())),
        }
    }
}

impl fmt::Display for NetworkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender-neutral stem of a nomen
///
/// A trailing `a` is removed (`Cornelia` → `Corneli`), otherwise the last two
/// characters (`Cornelius` → `Corneli`).
#[must_use]
pub fn nomen_stem(nomen: &str) -> &str {
    if let Some(stem) = nomen.strip_suffix('a') {
        return stem;
    }
    let cut = nomen
        .char_indices()
        .rev()
        .nth(1)
        .map_or(0, |(index, _)| index);
    &nomen[..cut]
}

/// Node of a network graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkNode {
    /// Person identifier
    pub id: PersonId,
    /// Nomen-stem group, numbered in discovery order
    pub group: usize,
    /// Display name
    pub name: String,
    /// Birth year
    pub birth: Option<i32>,
    /// Death year
    pub death: Option<i32>,
}

/// Undirected link; `target` is the smaller identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NetworkLink {
    /// Smaller identifier
    pub target: PersonId,
    /// Larger identifier
    pub source: PersonId,
}

impl NetworkLink {
    /// Normalise a pair of persons into a link
    #[must_use]
    pub fn between(a: PersonId, b: PersonId) -> Self {
        Self {
            target: a.min(b),
            source: a.max(b),
        }
    }
}

/// Graph of one traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkGraph {
    /// Person the traversal started from
    pub start: PersonId,
    /// Reached persons in discovery order
    pub nodes: Vec<NetworkNode>,
    /// Links in discovery order
    pub links: Vec<NetworkLink>,
}

/// State of a traversal: reached persons, links and nomen groups
#[derive(Debug, Default, Clone)]
pub struct TraversalContext {
    visited: FxHashSet<PersonId>,
    nodes: Vec<NetworkNode>,
    seen_links: FxHashSet<NetworkLink>,
    links: Vec<NetworkLink>,
    groups: FxHashMap<String, usize>,
}

impl TraversalContext {
    /// Fresh context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the person was already reached
    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        self.visited.contains(&id)
    }

    /// Number of reached persons
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nobody was reached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn group_of(&mut self, person: &Person) -> usize {
        let stem = nomen_stem(person.nomen.as_deref().unwrap_or_default());
        let next = self.groups.len();
        *self.groups.entry(stem.to_string()).or_insert(next)
    }

    fn visit(&mut self, person: &Person) {
        self.visited.insert(person.id);
        let group = self.group_of(person);
        self.nodes.push(NetworkNode {
            id: person.id,
            group,
            name: person.name.clone(),
            birth: person.birth,
            death: person.death,
        });
    }

    fn add_link(&mut self, a: PersonId, b: PersonId) {
        let link = NetworkLink::between(a, b);
        if self.seen_links.insert(link) {
            self.links.push(link);
        }
    }

    /// Finish the traversal into a graph
    #[must_use]
    pub fn into_graph(self, start: PersonId) -> NetworkGraph {
        NetworkGraph {
            start,
            nodes: self.nodes,
            links: self.links,
        }
    }
}

/// Builds network graphs over a registry
#[derive(Debug, Clone, Copy)]
pub struct NetworkBuilder<'a> {
    registry: &'a PersonRegistry,
}

impl<'a> NetworkBuilder<'a> {
    /// Create a builder
    #[must_use]
    pub const fn new(registry: &'a PersonRegistry) -> Self {
        Self { registry }
    }

    /// Walk the relation graph from `start`, extending the context
    ///
    /// Persons already in the context are linked but not expanded again.
    /// Relations are followed depth-first in their stored order.
    #[must_use]
    pub fn traverse(
        &self,
        start: PersonId,
        scope: NetworkScope,
        mut ctx: TraversalContext,
    ) -> TraversalContext {
        let Some(person) = self.registry.get(start) else {
            return ctx;
        };
        if ctx.contains(start) {
            return ctx;
        }
        ctx.visit(person);

        // (person, index of the next relation to examine)
        let mut stack: Vec<(&Person, usize)> = vec![(person, 0)];
        while let Some(frame) = stack.last_mut() {
            let (current, position) = (frame.0, frame.1);
            let Some(relation) = current.relations().get(position) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if !scope.includes(relation.kind) {
                continue;
            }
            let Some(relative) = self.registry.get(relation.target) else {
                continue;
            };
            ctx.add_link(current.id, relative.id);
            if !ctx.contains(relative.id) {
                ctx.visit(relative);
                stack.push((relative, 0));
            }
        }
        ctx
    }

    /// Graph around a single person
    #[must_use]
    pub fn graph(&self, start: PersonId, scope: NetworkScope) -> Option<NetworkGraph> {
        self.registry.get(start)?;
        Some(
            self.traverse(start, scope, TraversalContext::new())
                .into_graph(start),
        )
    }

    /// One graph per person not covered by an earlier graph, in load order
    #[must_use]
    pub fn components(&self, scope: NetworkScope) -> Vec<NetworkGraph> {
        let mut covered: FxHashSet<PersonId> = FxHashSet::default();
        let mut graphs = Vec::new();
        for id in self.registry.ids() {
            if covered.contains(id) {
                continue;
            }
            let graph = self
                .traverse(*id, scope, TraversalContext::new())
                .into_graph(*id);
            covered.extend(graph.nodes.iter().map(|node| node.id));
            graphs.push(graph);
        }
        log::info!("Built {} {scope} network graphs", graphs.len());
        graphs
    }
}

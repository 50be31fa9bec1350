//! Genealogical algorithms
//!
//! Graph construction, paternal-lineage inference, aggregation into death
//! periods, relationship networks, union family trees and descendant trees.

pub mod aggregate;
pub mod descendants;
pub mod family_tree;
pub mod graph_builder;
pub mod inference;
pub mod network;

pub use aggregate::{FuneralReport, LineageAggregator, TimePeriod};
pub use descendants::{ClosestAncestor, DescendantForest, DescendantNode, DescendantTree};
pub use family_tree::{FamilyForest, FamilyTree, FamilyTreeBuilder};
pub use graph_builder::{GraphBuilder, LoadReport, build_graph};
pub use inference::{AncestryEngine, Lineage, LineageNode, Step};
pub use network::{NetworkBuilder, NetworkGraph, NetworkScope, TraversalContext};

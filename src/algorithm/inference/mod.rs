//! Paternal ancestry inference
//!
//! [`engine`] decides each paternal link and walks the chain; [`lineage`]
//! holds the resulting nodes and their text and JSON renderings.

pub mod engine;
pub mod lineage;

pub use engine::{AncestryEngine, Step};
pub use lineage::{Lineage, LineageNode};
